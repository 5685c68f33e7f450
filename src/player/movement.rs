use bevy::prelude::*;
use crate::shared::*;

/// Velocity for one frame of intent: keys at full speed, drags scaled.
pub fn intent_velocity(input: &PlayerInput, tuning: &PlayerTuning) -> Vec2 {
    input.move_axis * tuning.speed + input.drag * tuning.touch_speed
}

/// Keeps a body of `radius` fully inside the arena.
pub fn clamp_to_arena(pos: Vec2, radius: f32, arena: &ArenaTuning) -> Vec2 {
    let min = Vec2::splat(radius);
    let max = (Vec2::new(arena.width, arena.height) - min).max(min);
    pos.clamp(min, max)
}

pub fn move_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    balance: Res<Balance>,
    mut query: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    let delta = intent_velocity(&input, &balance.player) * time.delta_secs();
    if delta == Vec2::ZERO {
        return;
    }
    let next = clamp_to_arena(
        transform.translation.truncate() + delta,
        balance.player.radius,
        &balance.arena,
    );
    transform.translation.x = next.x;
    transform.translation.y = next.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_player_inside() {
        let arena = ArenaTuning::default();
        assert_eq!(
            clamp_to_arena(Vec2::new(-50.0, 3000.0), 22.0, &arena),
            Vec2::new(22.0, 1898.0)
        );
        assert_eq!(
            clamp_to_arena(Vec2::new(500.0, 600.0), 22.0, &arena),
            Vec2::new(500.0, 600.0)
        );
    }

    #[test]
    fn test_intent_velocity_combines_keys_and_drag() {
        let tuning = PlayerTuning::default();
        let input = PlayerInput {
            move_axis: Vec2::X,
            drag: Vec2::new(0.0, 2.0),
        };
        assert_eq!(intent_velocity(&input, &tuning), Vec2::new(320.0, 80.0));
    }
}
