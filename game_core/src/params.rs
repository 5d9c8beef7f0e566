/// Game tuning parameters for LCD Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Arena (LCD pixels; rows above ARENA_MIN_Y hold the score line)
    pub const ARENA_MIN_X: i32 = 0;
    pub const ARENA_MIN_Y: i32 = 20;
    pub const ARENA_MAX_X: i32 = 240;
    pub const ARENA_MAX_Y: i32 = 320;

    // Paddle
    pub const PADDLE_HEIGHT: i32 = 5;
    pub const PADDLE_WIDTH_RATIO: f32 = 0.15; // of arena width
    pub const PADDLE_STEP_RATIO: f32 = 0.25; // of paddle width

    // Ball (speeds in pixels per tick)
    pub const BALL_RADIUS: i32 = 5;
    pub const BALL_SPEED_MIN: f32 = 2.0;
    pub const BALL_SPEED_MAX: f32 = 4.0;
    pub const BALL_MIN_Y_SPEED: f32 = 1.0;
    pub const BALL_MIN_X_SPEED: f32 = 0.5;
    pub const BALL_SPEEDUP_MAX: f32 = 1.1; // Multiply speed on paddle hit by [1.0, this)
    pub const BALL_SPEED_CAP: f32 = 6.0;
    pub const MAX_BALLS: usize = 8;

    // AI
    pub const AI_DRAW_RANGE: f32 = 11.0;
    pub const AI_DIFFICULTY_DEFAULT: u8 = 6;
    pub const AI_DIFFICULTY_MAX: u8 = 10;

    // Timing
    pub const TICK_MS: u64 = 20;
}
