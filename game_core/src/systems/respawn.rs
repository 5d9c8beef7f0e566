use crate::{create_ball, Arena, Ball, Config, Events, GameEvent, GameRng, SpawnCounter};
use hecs::World;

/// Put a fresh ball at the arena centre when none are left.
/// Returns true if a ball was spawned.
pub fn respawn_if_empty(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    rng: &mut GameRng,
    spawns: &mut SpawnCounter,
    events: &mut Events,
) -> bool {
    if world.query::<&Ball>().iter().next().is_some() {
        return false;
    }

    let ball = Ball::launch(arena.center(), config, rng);
    create_ball(world, ball, spawns.next());
    events.push(GameEvent::BallSpawned);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpawnOrder;
    use glam::Vec2;

    #[test]
    fn test_respawns_at_center_when_empty() {
        let mut world = World::new();
        let arena = Arena::new(0, 20, 240, 320);
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let mut spawns = SpawnCounter::default();
        let mut events = Events::new();

        assert!(respawn_if_empty(
            &mut world,
            &arena,
            &config,
            &mut rng,
            &mut spawns,
            &mut events
        ));

        let balls: Vec<Ball> = world.query::<&Ball>().iter().map(|(_e, b)| *b).collect();
        assert_eq!(balls.len(), 1);
        assert_eq!(balls[0].pos, Vec2::new(120.0, 170.0));
        assert!(balls[0].vel.length() > 0.0);
        assert_eq!(events.drain(), vec![GameEvent::BallSpawned]);
    }

    #[test]
    fn test_no_respawn_while_a_ball_exists() {
        let mut world = World::new();
        let arena = Arena::new(0, 20, 240, 320);
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let mut spawns = SpawnCounter::default();
        let mut events = Events::new();
        create_ball(
            &mut world,
            Ball::new(Vec2::new(50.0, 50.0), Vec2::ONE, 5),
            SpawnOrder(0),
        );

        assert!(!respawn_if_empty(
            &mut world,
            &arena,
            &config,
            &mut rng,
            &mut spawns,
            &mut events
        ));
        assert_eq!(world.query::<&Ball>().iter().count(), 1);
    }
}
