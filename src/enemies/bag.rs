//! Bag: a melee chaser that walks straight at the player.

use crate::fsm::StateHooks;
use crate::shared::*;

use super::actor::Actor;

pub(super) fn hooks<'a>(state: EnemyState) -> StateHooks<Actor<'a>> {
    match state {
        EnemyState::Move => StateHooks::new().on_update(chase),
        _ => StateHooks::new(),
    }
}

fn chase(actor: &mut Actor) -> Option<EnemyState> {
    actor.step_toward_player(actor.stats.speed);
    None
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::actor::testing::Rig;
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_bag_closes_distance_at_fixed_speed() {
        let mut rig = Rig::new(Archetype::Bag, Vec2::ZERO, Vec2::new(500.0, 0.0));
        rig.run(1.0, DT);
        assert_eq!(rig.state(), EnemyState::Move);
        assert!((rig.pos.x - 60.0).abs() < 0.5, "moved {}", rig.pos.x);
        assert!(rig.pos.y.abs() < 1e-3);
    }

    #[test]
    fn test_bag_stays_put_on_top_of_player() {
        let mut rig = Rig::new(Archetype::Bag, Vec2::splat(5.0), Vec2::splat(5.0));
        rig.run(0.5, DT);
        assert_eq!(rig.pos, Vec2::splat(5.0));
    }

    #[test]
    fn test_bag_never_leaves_move_on_its_own() {
        let mut rig = Rig::new(Archetype::Bag, Vec2::ZERO, Vec2::new(50.0, 0.0));
        rig.run(10.0, DT);
        assert_eq!(rig.state(), EnemyState::Move);
        assert!(rig.effects.is_empty());
    }
}
