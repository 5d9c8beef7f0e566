use crate::Ball;
use hecs::World;

/// Move every ball by its velocity
pub fn advance_balls(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel;
    }
}
