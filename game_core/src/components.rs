use crate::{Arena, Config, GameRng, Params};
use glam::{IVec2, Vec2};

/// Which end of the arena a paddle (and its player) defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,    // paddle 1, master board
    Bottom, // paddle 2, slave board
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Top, Side::Bottom];

    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Bottom => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddle {
    pub side: Side,
    pub pos: IVec2, // Top-left corner
    pub width: i32,
    pub height: i32,
    pub last_drawn: Option<IVec2>,
}

impl Paddle {
    pub fn new(side: Side, pos: IVec2, width: i32, height: i32) -> Self {
        Self {
            side,
            pos,
            width,
            height,
            last_drawn: None,
        }
    }

    /// Paddle at its start position for `side`
    pub fn spawn(side: Side, arena: &Arena, config: &Config) -> Self {
        Self::new(
            side,
            config.paddle_start(side, arena),
            config.paddle_width(arena),
            config.paddle_height,
        )
    }

    /// Horizontal distance covered by one button press
    pub fn step(&self) -> i32 {
        ((self.width as f32 * Params::PADDLE_STEP_RATIO).round() as i32).max(1)
    }

    /// Returns false when already against the left bound
    pub fn move_left(&mut self, arena: &Arena) -> bool {
        if self.pos.x <= arena.min_x {
            return false;
        }
        self.pos.x = (self.pos.x - self.step()).max(arena.min_x);
        true
    }

    /// Returns false when already against the right bound
    pub fn move_right(&mut self, arena: &Arena) -> bool {
        let max_x = arena.max_x - self.width;
        if self.pos.x >= max_x {
            return false;
        }
        self.pos.x = (self.pos.x + self.step()).min(max_x);
        true
    }

    /// Jump to an absolute x received over the link
    pub fn move_to(&mut self, x: i32, arena: &Arena) {
        self.pos.x = arena.clamp_x(x, self.width);
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x as f32 + self.width as f32 / 2.0
    }

    pub fn bottom(&self) -> i32 {
        self.pos.y + self.height
    }

    /// Whether `x` lies within the paddle's horizontal span
    pub fn spans(&self, x: f32) -> bool {
        x >= self.pos.x as f32 && x <= (self.pos.x + self.width) as f32
    }
}

/// Ball component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2, // Pixels per tick
    pub radius: i32,
    pub last_drawn: Option<IVec2>,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: i32) -> Self {
        Self {
            pos,
            vel,
            radius,
            last_drawn: None,
        }
    }

    /// Ball at `pos` with a fresh random velocity
    pub fn launch(pos: Vec2, config: &Config, rng: &mut GameRng) -> Self {
        Self::new(pos, random_velocity(config, rng), config.ball_radius)
    }

    /// Position rounded to the pixel grid
    pub fn screen_pos(&self) -> IVec2 {
        self.pos.round().as_ivec2()
    }
}

/// Spawn sequence number; keeps the ball collection ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpawnOrder(pub u32);

/// Random velocity whose magnitude lies in `[ball_speed_min, ball_speed_max)`
/// and whose vertical component is at least `ball_min_y_speed`
pub fn random_velocity(config: &Config, rng: &mut GameRng) -> Vec2 {
    let speed = rng.uniform(config.ball_speed_min, config.ball_speed_max);
    let angle = rng.uniform(0.0, std::f32::consts::TAU);
    let mut vel = Vec2::new(angle.cos(), angle.sin()) * speed;

    if vel.y.abs() < config.ball_min_y_speed {
        // Keep the magnitude, trade horizontal speed for the vertical floor
        let floor = config.ball_min_y_speed.min(speed);
        vel.y = floor.copysign(vel.y);
        vel.x = (speed * speed - floor * floor).max(0.0).sqrt().copysign(vel.x);
    }

    vel
}
