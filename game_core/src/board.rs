//! The Board owns everything on the playfield: the arena, the balls, both
//! paddles, the score and the per-game flags.

use crate::systems::{drive_ai, respawn_if_empty};
use crate::{
    create_ball, create_paddle, ordered_balls, step, AiControl, Arena, Ball, Config, Events,
    GameEvent, GameRng, Paddle, Score, Side, SpawnCounter,
};
use glam::Vec2;
use hecs::World;

pub struct Board {
    world: World,
    arena: Arena,
    config: Config,
    score: Score,
    ai: AiControl,
    wireless: bool,
    events: Events,
    rng: GameRng,
    spawns: SpawnCounter,
}

impl Board {
    pub fn new(arena: Arena, config: Config, rng: GameRng) -> Self {
        let ai = AiControl::new(config.ai_difficulty);
        let mut board = Self {
            world: World::new(),
            arena,
            config,
            score: Score::new(),
            ai,
            wireless: false,
            events: Events::new(),
            rng,
            spawns: SpawnCounter::default(),
        };
        board.populate();
        board
    }

    /// Board with default tuning and a fixed-seed generator
    pub fn with_bounds(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::new(
            Arena::new(min_x, min_y, max_x, max_y),
            Config::default(),
            GameRng::default(),
        )
    }

    fn populate(&mut self) {
        for side in Side::ALL {
            create_paddle(&mut self.world, Paddle::spawn(side, &self.arena, &self.config));
        }
        let ball = Ball::launch(self.arena.center(), &self.config, &mut self.rng);
        create_ball(&mut self.world, ball, self.spawns.next());
    }

    /// Clear balls, paddles and scores; one ball at centre, paddles at start.
    /// AI and wireless flags are kept.
    pub fn reset(&mut self) {
        self.world.clear();
        self.score = Score::new();
        self.events.clear();
        self.populate();
    }

    /// One simulation tick: physics for every ball, then AI paddles
    pub fn move_balls(&mut self) {
        self.step_physics();
        drive_ai(
            &mut self.world,
            &self.arena,
            &self.config,
            &self.ai,
            &mut self.rng,
        );
    }

    /// Physics part of a tick: motion, scoring, walls, paddles, respawn
    pub fn step_physics(&mut self) {
        step(
            &mut self.world,
            &self.arena,
            &self.config,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
            &mut self.spawns,
        );
    }

    /// Add a ball at the centre. Returns false once the cap is reached.
    pub fn spawn_ball(&mut self) -> bool {
        if self.ball_count() >= self.config.max_balls {
            return false;
        }
        let ball = Ball::launch(self.arena.center(), &self.config, &mut self.rng);
        create_ball(&mut self.world, ball, self.spawns.next());
        self.events.push(GameEvent::BallSpawned);
        true
    }

    /// Swap every ball for new ones at `positions` (with fresh velocities)
    pub fn replace_balls(&mut self, positions: &[Vec2]) {
        for (entity, ball) in ordered_balls(&self.world) {
            let _ = self.world.despawn(entity);
            self.events.push(GameEvent::BallRemoved {
                last_drawn: ball.last_drawn,
                radius: ball.radius,
            });
        }

        for pos in positions.iter().take(self.config.max_balls) {
            let ball = Ball::launch(*pos, &self.config, &mut self.rng);
            create_ball(&mut self.world, ball, self.spawns.next());
        }

        respawn_if_empty(
            &mut self.world,
            &self.arena,
            &self.config,
            &mut self.rng,
            &mut self.spawns,
            &mut self.events,
        );
    }

    /// Balls in spawn order
    pub fn balls(&self) -> Vec<Ball> {
        ordered_balls(&self.world)
            .into_iter()
            .map(|(_entity, ball)| ball)
            .collect()
    }

    pub fn ball_count(&self) -> usize {
        self.world.query::<&Ball>().iter().count()
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| *p)
    }

    fn with_paddle<T>(
        &mut self,
        side: Side,
        f: impl FnOnce(&mut Paddle, &Arena) -> T,
    ) -> Option<T> {
        let arena = self.arena;
        self.world
            .query_mut::<&mut Paddle>()
            .into_iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| f(p, &arena))
    }

    pub fn move_paddle_left(&mut self, side: Side) -> bool {
        self.with_paddle(side, |p, arena| p.move_left(arena)).unwrap_or_default()
    }

    pub fn move_paddle_right(&mut self, side: Side) -> bool {
        self.with_paddle(side, |p, arena| p.move_right(arena)).unwrap_or_default()
    }

    /// Clamped absolute move, for a position received over the link
    pub fn move_paddle_to(&mut self, side: Side, x: i32) {
        self.with_paddle(side, |p, arena| p.move_to(x, arena));
    }

    /// Overwrite a paddle's x as-is (mirroring the master's state)
    pub fn set_paddle_x(&mut self, side: Side, x: i32) {
        self.with_paddle(side, |p, _arena| p.pos.x = x);
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn set_score(&mut self, score: Score) {
        self.score = score;
    }

    pub fn ai(&self) -> AiControl {
        self.ai
    }

    pub fn ai_mut(&mut self) -> &mut AiControl {
        &mut self.ai
    }

    /// Returns the new state
    pub fn toggle_ai(&mut self, side: Side) -> bool {
        self.ai.toggle(side)
    }

    /// Step both difficulties, 10 wraps to 0. Returns the top paddle's level.
    pub fn cycle_difficulty(&mut self) -> u8 {
        self.ai.cycle_difficulty();
        self.ai.difficulty(Side::Top)
    }

    pub fn wireless(&self) -> bool {
        self.wireless
    }

    /// Returns the new state
    pub fn toggle_wireless(&mut self) -> bool {
        self.wireless = !self.wireless;
        self.wireless
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access for the renderer's last-drawn bookkeeping
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Mark everything as not yet drawn (after the screen was cleared)
    pub fn forget_drawn(&mut self) {
        for (_e, ball) in self.world.query_mut::<&mut Ball>() {
            ball.last_drawn = None;
        }
        for (_e, paddle) in self.world.query_mut::<&mut Paddle>() {
            paddle.last_drawn = None;
        }
    }
}
