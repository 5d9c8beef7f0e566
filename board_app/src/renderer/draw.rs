use super::{Color, Display};
use game_core::{Ball, Board, GameEvent, Paddle, Score, Side};
use glam::IVec2;
use hecs::World;

const BACKGROUND: Color = Color::Black;
const TEXT_X: i32 = 8;
const LINE_HEIGHT: i32 = 20;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

/// Draws the board incrementally: only what moved since the last frame is
/// erased and redrawn.
#[derive(Debug, Default)]
pub struct BoardRenderer {
    last_score: Option<Score>,
}

impl BoardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh game screen; everything is drawn again on the next frame
    pub fn enter_game(&mut self, board: &mut Board, display: &mut dyn Display) {
        display.clear();
        board.forget_drawn();
        self.last_score = None;
    }

    pub fn draw_game(&mut self, board: &mut Board, display: &mut dyn Display) {
        for event in board.drain_events() {
            if let GameEvent::BallRemoved {
                last_drawn: Some(pos),
                radius,
            } = event
            {
                display.set_color(BACKGROUND);
                display.fill_circle(pos.x, pos.y, radius);
            }
        }

        draw_sprites(board.world_mut(), display);

        let score = board.score();
        if self.last_score != Some(score) {
            let width = board.arena().width();
            display.set_color(BACKGROUND);
            display.fill_rect(0, 0, width, board.arena().min_y);
            display.set_color(Color::White);
            display.display_text(
                TEXT_X,
                2,
                &format!("P1: {}   P2: {}", score.top, score.bottom),
            );
            self.last_score = Some(score);
        }
    }

    pub fn draw_menu(&mut self, board: &Board, display: &mut dyn Display) {
        display.clear();
        let ai = board.ai();
        let lines = [
            "PONG".to_string(),
            String::new(),
            format!("1: AI top     {}", on_off(ai.is_enabled(Side::Top))),
            format!("2: AI bottom  {}", on_off(ai.is_enabled(Side::Bottom))),
            format!("3: Wireless   {}", on_off(board.wireless())),
            format!("4: Difficulty {}", ai.difficulty(Side::Top)),
            String::new(),
            "Press onboard button".to_string(),
        ];

        display.set_color(Color::Green);
        for (i, line) in lines.iter().enumerate() {
            display.display_text(TEXT_X, LINE_HEIGHT * (i as i32 + 1), line);
        }
        self.last_score = None;
    }

    pub fn draw_pause(&mut self, board: &Board, display: &mut dyn Display) {
        let mid = board.arena().center().as_ivec2();
        display.set_color(Color::Yellow);
        display.display_text(mid.x - 30, mid.y, "PAUSED");
        display.display_text(mid.x - 60, mid.y + LINE_HEIGHT, "5: reset  6: quit");
    }
}

/// Erase every sprite that moved, then draw them all at their new spots
fn draw_sprites(world: &mut World, display: &mut dyn Display) {
    for (_entity, ball) in world.query_mut::<&Ball>() {
        if let Some(old) = ball.last_drawn.filter(|old| *old != ball.screen_pos()) {
            display.set_color(BACKGROUND);
            display.fill_circle(old.x, old.y, ball.radius);
        }
    }
    for (_entity, paddle) in world.query_mut::<&Paddle>() {
        if let Some(old) = paddle.last_drawn.filter(|old| *old != paddle.pos) {
            display.set_color(BACKGROUND);
            display.fill_rect(old.x, old.y, paddle.width, paddle.height);
        }
    }

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        draw_ball(ball, display);
    }
    // Paddles last so a ball never covers them
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        draw_paddle(paddle, display);
    }
}

fn draw_ball(ball: &mut Ball, display: &mut dyn Display) {
    let pos = ball.screen_pos();
    if ball.last_drawn == Some(pos) {
        return;
    }
    display.set_color(Color::White);
    display.fill_circle(pos.x, pos.y, ball.radius);
    ball.last_drawn = Some(pos);
}

fn draw_paddle(paddle: &mut Paddle, display: &mut dyn Display) {
    let pos: IVec2 = paddle.pos;
    display.set_color(match paddle.side {
        Side::Top => Color::Red,
        Side::Bottom => Color::Green,
    });
    display.fill_rect(pos.x, pos.y, paddle.width, paddle.height);
    paddle.last_drawn = Some(pos);
}
