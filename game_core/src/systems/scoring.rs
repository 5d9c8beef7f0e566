use crate::{Arena, Ball, Events, GameEvent, Score, Side, SpawnOrder};
use hecs::World;

/// Boundary a ball has crossed, if any
pub fn crossed_boundary(ball: &Ball, arena: &Arena) -> Option<Side> {
    let r = ball.radius as f32;
    if ball.pos.y - r <= arena.min_y as f32 {
        Some(Side::Top)
    } else if ball.pos.y + r >= arena.max_y as f32 {
        Some(Side::Bottom)
    } else {
        None
    }
}

/// Remove balls that crossed the top or bottom boundary and credit the
/// player defending the other end
pub fn check_scoring(world: &mut World, arena: &Arena, score: &mut Score, events: &mut Events) {
    // Collect first so removal never disturbs the iteration
    let mut out: Vec<_> = world
        .query::<(&Ball, &SpawnOrder)>()
        .iter()
        .filter_map(|(entity, (ball, order))| {
            crossed_boundary(ball, arena).map(|side| (*order, entity, side, *ball))
        })
        .collect();
    out.sort_by_key(|(order, ..)| *order);

    for (_order, entity, side, ball) in out {
        let _ = world.despawn(entity);
        let scorer = side.opponent();
        score.increment(scorer);
        events.push(GameEvent::BallRemoved {
            last_drawn: ball.last_drawn,
            radius: ball.radius,
        });
        events.push(GameEvent::Scored(scorer));
    }
}
