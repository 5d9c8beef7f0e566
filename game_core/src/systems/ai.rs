use crate::{ordered_balls, AiControl, Arena, Config, GameRng, Paddle};
use hecs::World;

/// Computer paddle control.
///
/// One draw in `[0, ai_draw_range)` per tick is shared by both paddles. A
/// paddle under AI control takes one step toward the first ball when its
/// difficulty exceeds the draw, so difficulty 0 never moves.
pub fn drive_ai(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    ai: &AiControl,
    rng: &mut GameRng,
) {
    let draw = rng.uniform(0.0, config.ai_draw_range);

    let target_x = match ordered_balls(world).first() {
        Some((_entity, ball)) => ball.pos.x,
        None => return,
    };

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        let side = paddle.side;
        if !ai.is_enabled(side) || draw >= ai.difficulty(side) as f32 {
            continue;
        }

        let center = paddle.center_x();
        if target_x < center {
            paddle.move_left(arena);
        } else if target_x > center {
            paddle.move_right(arena);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Ball, ScriptedSource, Side, SpawnOrder};
    use glam::{IVec2, Vec2};

    fn setup(ball_x: f32) -> (World, Arena, Config) {
        let mut world = World::new();
        let arena = Arena::new(0, 20, 240, 320);
        let config = Config::new();
        create_paddle(
            &mut world,
            Paddle::new(Side::Top, IVec2::new(102, 25), 36, 5),
        );
        create_paddle(
            &mut world,
            Paddle::new(Side::Bottom, IVec2::new(102, 310), 36, 5),
        );
        create_ball(
            &mut world,
            Ball::new(Vec2::new(ball_x, 170.0), Vec2::ONE, 5),
            SpawnOrder(0),
        );
        (world, arena, config)
    }

    fn paddle_x(world: &World, side: Side) -> i32 {
        world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| p.pos.x)
            .unwrap_or(i32::MIN)
    }

    #[test]
    fn test_ai_difficulty_zero_never_moves() {
        let (mut world, arena, config) = setup(10.0);
        let mut ai = AiControl::new(0);
        ai.set_enabled(Side::Top, true);
        ai.set_enabled(Side::Bottom, true);
        // Word 0 draws exactly 0.0, the most favourable draw there is
        let mut rng = GameRng::from_source(ScriptedSource::new(vec![0]));

        for _ in 0..50 {
            drive_ai(&mut world, &arena, &config, &ai, &mut rng);
        }

        assert_eq!(paddle_x(&world, Side::Top), 102);
        assert_eq!(paddle_x(&world, Side::Bottom), 102);
    }

    #[test]
    fn test_ai_moves_toward_ball() {
        let (mut world, arena, config) = setup(10.0);
        let mut ai = AiControl::new(10);
        ai.set_enabled(Side::Top, true);
        let mut rng = GameRng::from_source(ScriptedSource::new(vec![0]));

        drive_ai(&mut world, &arena, &config, &ai, &mut rng);

        assert_eq!(paddle_x(&world, Side::Top), 93, "One step left");
        assert_eq!(paddle_x(&world, Side::Bottom), 102, "AI disabled");
    }

    #[test]
    fn test_ai_moves_right_for_ball_on_right() {
        let (mut world, arena, config) = setup(230.0);
        let mut ai = AiControl::new(10);
        ai.set_enabled(Side::Bottom, true);
        let mut rng = GameRng::from_source(ScriptedSource::new(vec![0]));

        drive_ai(&mut world, &arena, &config, &ai, &mut rng);

        assert_eq!(paddle_x(&world, Side::Bottom), 111);
    }

    #[test]
    fn test_ai_skips_tick_when_draw_exceeds_difficulty() {
        let (mut world, arena, config) = setup(10.0);
        let mut ai = AiControl::new(5);
        ai.set_enabled(Side::Top, true);
        // 600_000 / 1e6 * 11 = 6.6 >= 5
        let mut rng = GameRng::from_source(ScriptedSource::new(vec![600_000]));

        drive_ai(&mut world, &arena, &config, &ai, &mut rng);

        assert_eq!(paddle_x(&world, Side::Top), 102);
    }

    #[test]
    fn test_ai_holds_when_ball_is_centred() {
        let (mut world, arena, config) = setup(120.0);
        let mut ai = AiControl::new(10);
        ai.set_enabled(Side::Top, true);
        let mut rng = GameRng::from_source(ScriptedSource::new(vec![0]));

        drive_ai(&mut world, &arena, &config, &ai, &mut rng);

        assert_eq!(paddle_x(&world, Side::Top), 102);
    }
}
