use crate::{Arena, Ball, Config, GameRng, Paddle, Side};
use hecs::World;

/// Reflect balls off the left and right walls
pub fn check_walls(world: &mut World, arena: &Arena) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        bounce_off_walls(ball, arena);
    }
}

/// Left wall first, then right; returns true on a bounce
pub fn bounce_off_walls(ball: &mut Ball, arena: &Arena) -> bool {
    let r = ball.radius as f32;
    let lo = arena.min_x as f32 + r;
    let hi = arena.max_x as f32 - r;

    if ball.pos.x <= lo {
        ball.vel.x = ball.vel.x.abs();
        ball.pos.x = (2.0 * lo - ball.pos.x).min(hi).max(lo);
        true
    } else if ball.pos.x >= hi {
        ball.vel.x = -ball.vel.x.abs();
        ball.pos.x = (2.0 * hi - ball.pos.x).min(hi).max(lo);
        true
    } else {
        false
    }
}

/// Check ball collisions with both paddles
pub fn check_paddles(world: &mut World, config: &Config, rng: &mut GameRng) {
    // Paddles don't move during this pass; copy them out to free the borrow
    let paddles: Vec<Paddle> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, p)| *p)
        .collect();

    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        if let Some(paddle) = paddles.iter().find(|p| touches_paddle(ball, p)) {
            deflect(ball, paddle.side, config, rng);
        }
    }
}

/// Ball edge has reached the paddle's inner edge, within its span, while
/// travelling toward it
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    if !paddle.spans(ball.pos.x) {
        return false;
    }
    let r = ball.radius as f32;
    match paddle.side {
        Side::Top => ball.vel.y < 0.0 && ball.pos.y - r <= paddle.bottom() as f32,
        Side::Bottom => ball.vel.y > 0.0 && ball.pos.y + r >= paddle.pos.y as f32,
    }
}

/// Send the ball back into the arena, slightly faster: speed-up, then the
/// horizontal floor, then the cap
fn deflect(ball: &mut Ball, side: Side, config: &Config, rng: &mut GameRng) {
    ball.vel.y = match side {
        Side::Top => ball.vel.y.abs(),
        Side::Bottom => -ball.vel.y.abs(),
    };

    ball.vel *= rng.uniform(1.0, config.ball_speedup_max);

    // Never let play become purely vertical
    if ball.vel.x.abs() < config.ball_min_x_speed {
        ball.vel.x = if ball.vel.x < 0.0 {
            -config.ball_min_x_speed
        } else {
            config.ball_min_x_speed
        };
    }

    let speed = ball.vel.length();
    if speed > config.ball_speed_cap {
        ball.vel *= config.ball_speed_cap / speed;
    }
}
