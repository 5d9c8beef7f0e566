pub mod arena;
pub mod board;
pub mod components;
pub mod config;
pub mod params;
pub mod resources;
pub mod rng;
pub mod systems;

pub use arena::*;
pub use board::*;
pub use components::*;
pub use config::*;
pub use params::*;
pub use resources::*;
pub use rng::*;

use hecs::World;
use systems::*;

/// Run one physics tick of the Pong simulation (no AI)
pub fn step(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
    spawns: &mut SpawnCounter,
) {
    // 1. Move balls
    advance_balls(world);

    // 2. Remove balls that crossed the top or bottom boundary
    check_scoring(world, arena, score, events);

    // 3. Side walls (survivors only)
    check_walls(world, arena);

    // 4. Paddles
    check_paddles(world, config, rng);

    // 5. Never leave the board without a ball
    respawn_if_empty(world, arena, config, rng, spawns, events);
}

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, paddle: Paddle) -> hecs::Entity {
    world.spawn((paddle,))
}

/// Helper to create a ball entity
pub fn create_ball(world: &mut World, ball: Ball, order: SpawnOrder) -> hecs::Entity {
    world.spawn((ball, order))
}

/// Balls in spawn order
pub fn ordered_balls(world: &World) -> Vec<(hecs::Entity, Ball)> {
    let mut balls: Vec<_> = world
        .query::<(&Ball, &SpawnOrder)>()
        .iter()
        .map(|(entity, (ball, order))| (*order, entity, *ball))
        .collect();
    balls.sort_by_key(|(order, ..)| *order);
    balls
        .into_iter()
        .map(|(_order, entity, ball)| (entity, ball))
        .collect()
}
