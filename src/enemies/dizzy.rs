//! Dizzy is shared by every archetype that defines it. It is only ever entered
//! through an interrupt (trumpet pulse).

use crate::fsm::StateHooks;
use crate::shared::*;

use super::actor::Actor;

pub(super) fn hooks<'a>() -> StateHooks<Actor<'a>> {
    StateHooks::new()
        .on_enter(enter)
        .on_update(spin)
        .on_exit(exit)
}

fn enter(actor: &mut Actor) {
    let recovery = actor.archetype.dizzy_recovery();
    actor.wait_then(actor.tuning.dizzy_secs, recovery);
}

fn spin(actor: &mut Actor) -> Option<EnemyState> {
    actor.motion.spin += actor.dt * actor.tuning.dizzy_spin;
    None
}

fn exit(actor: &mut Actor) {
    actor.motion.spin = 0.0;
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::actor::testing::Rig;
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_dizzy_spins_then_recovers_to_archetype_default() {
        for (archetype, recovery) in [
            (Archetype::Bag, EnemyState::Move),
            (Archetype::Butterfly, EnemyState::Idle),
            (Archetype::Dino, EnemyState::Idle),
        ] {
            let mut rig = Rig::new(archetype, Vec2::ZERO, Vec2::new(900.0, 0.0));
            rig.step(DT);
            rig.machine.interrupt(EnemyState::Dizzy);
            rig.run(1.0, DT);
            assert_eq!(rig.state(), EnemyState::Dizzy, "{archetype:?}");
            assert!(rig.motion.spin > 900.0);

            rig.run(1.1, DT);
            assert_eq!(rig.state(), recovery, "{archetype:?}");
            assert_eq!(rig.motion.spin, 0.0);
        }
    }

    #[test]
    fn test_second_pulse_extends_dizzy() {
        let mut rig = Rig::new(Archetype::Bag, Vec2::ZERO, Vec2::new(900.0, 0.0));
        rig.machine.interrupt(EnemyState::Dizzy);
        rig.run(1.5, DT);
        rig.machine.interrupt(EnemyState::Dizzy);
        rig.run(1.0, DT);
        // The first dizzy would have ended at 2.0s.
        assert_eq!(rig.state(), EnemyState::Dizzy);
        rig.run(1.2, DT);
        assert_eq!(rig.state(), EnemyState::Move);
    }

    #[test]
    fn test_dizzy_enemy_does_not_move() {
        let mut rig = Rig::new(Archetype::Bag, Vec2::ZERO, Vec2::new(900.0, 0.0));
        rig.machine.interrupt(EnemyState::Dizzy);
        rig.run(1.0, DT);
        assert_eq!(rig.pos, Vec2::ZERO);
    }
}
