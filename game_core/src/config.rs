use crate::{Arena, Params, Side};
use glam::IVec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub paddle_height: i32,
    pub paddle_width_ratio: f32,
    pub ball_radius: i32,
    pub ball_speed_min: f32,
    pub ball_speed_max: f32,
    pub ball_min_y_speed: f32,
    pub ball_min_x_speed: f32,
    pub ball_speedup_max: f32,
    pub ball_speed_cap: f32,
    pub max_balls: usize,
    pub ai_draw_range: f32,
    pub ai_difficulty: u8,
    /// Slave re-runs one physics step after mirroring a master frame
    pub replay_step_on_mirror: bool,
    /// Slave ignores the frame's copy of its own paddle, which is a round
    /// trip old. Off: the frame sets both paddles.
    pub keep_local_paddle_on_mirror: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_width_ratio: Params::PADDLE_WIDTH_RATIO,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_min: Params::BALL_SPEED_MIN,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_min_y_speed: Params::BALL_MIN_Y_SPEED,
            ball_min_x_speed: Params::BALL_MIN_X_SPEED,
            ball_speedup_max: Params::BALL_SPEEDUP_MAX,
            ball_speed_cap: Params::BALL_SPEED_CAP,
            max_balls: Params::MAX_BALLS,
            ai_draw_range: Params::AI_DRAW_RANGE,
            ai_difficulty: Params::AI_DIFFICULTY_DEFAULT,
            replay_step_on_mirror: true,
            keep_local_paddle_on_mirror: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paddle width for an arena (15% of its width by default)
    pub fn paddle_width(&self, arena: &Arena) -> i32 {
        ((arena.width() as f32 * self.paddle_width_ratio) as i32).max(1)
    }

    /// Start position (top-left corner) of a paddle, horizontally centred
    pub fn paddle_start(&self, side: Side, arena: &Arena) -> IVec2 {
        let width = self.paddle_width(arena);
        let x = arena.min_x + (arena.width() - width) / 2;
        let y = match side {
            Side::Top => arena.min_y + self.paddle_height,
            Side::Bottom => arena.max_y - 2 * self.paddle_height,
        };
        IVec2::new(x, y)
    }
}
