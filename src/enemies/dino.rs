//! Dino: shoots along its facing, then walks until lined up with the player.

use bevy::prelude::*;

use crate::fsm::StateHooks;
use crate::shared::*;

use super::actor::Actor;

/// Muzzle offset from the dino's centre along its facing.
const MUZZLE: f32 = 24.0;

pub(super) fn hooks<'a>(state: EnemyState) -> StateHooks<Actor<'a>> {
    match state {
        EnemyState::Idle => StateHooks::new().on_enter(rest),
        EnemyState::Attack => StateHooks::new().on_enter(shoot),
        EnemyState::Move => StateHooks::new().on_update(approach),
        _ => StateHooks::new(),
    }
}

pub(super) fn face_player(actor: &mut Actor) {
    actor.motion.facing_left = actor.player.x < actor.pos.x;
}

fn rest(actor: &mut Actor) {
    actor.wait_then(actor.tuning.dino_idle_secs, EnemyState::Attack);
}

fn shoot(actor: &mut Actor) {
    let side = if actor.motion.facing_left { -1.0 } else { 1.0 };
    let origin = actor.pos + Vec2::new(side * MUZZLE, 0.0);
    let velocity = Vec2::new(side * actor.tuning.dino_bullet_speed, 0.0);
    actor.fire(origin, velocity, Hitbox::rect(24.0, 8.0));
    actor.positional_sound("shoot");
    actor.wait_then(actor.tuning.dino_reload_secs, EnemyState::Move);
}

fn approach(actor: &mut Actor) -> Option<EnemyState> {
    actor.step_toward_player(actor.stats.speed);
    let aligned = (actor.player.y - actor.pos.y).abs() < actor.tuning.dino_band;
    let close = actor.distance_to_player() < actor.tuning.dino_range;
    (aligned && close).then_some(EnemyState::Idle)
}

#[cfg(test)]
mod tests {
    use super::super::actor::testing::Rig;
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_dino_faces_and_shoots_toward_player_side() {
        let mut rig = Rig::new(Archetype::Dino, Vec2::ZERO, Vec2::new(-200.0, 10.0));
        rig.run(1.1, DT);
        assert!(rig.motion.facing_left);
        assert_eq!(rig.state(), EnemyState::Attack);
        let shots = rig.shots();
        assert_eq!(shots.len(), 1);
        assert_eq!(shots[0], Vec2::new(-400.0, 0.0));
        assert!(rig.sounds().iter().any(|sfx| sfx.sfx_id == "shoot"));
    }

    #[test]
    fn test_dino_cycle_idle_attack_move_idle() {
        // Far away and out of line: the dino has to walk after reloading.
        let mut rig = Rig::new(Archetype::Dino, Vec2::ZERO, Vec2::new(100.0, 300.0));
        rig.run(1.1, DT);
        assert_eq!(rig.state(), EnemyState::Attack);
        rig.run(1.0, DT);
        assert_eq!(rig.state(), EnemyState::Move);

        let mut reengaged = false;
        for _ in 0..600 {
            rig.step(DT);
            if rig.state() == EnemyState::Idle {
                reengaged = true;
                break;
            }
        }
        assert!(reengaged);
        assert!((rig.player.y - rig.pos.y).abs() < 50.0);
    }

    #[test]
    fn test_dino_move_does_not_stop_when_far_but_aligned() {
        let mut rig = Rig::new(Archetype::Dino, Vec2::ZERO, Vec2::new(2000.0, 0.0));
        rig.machine.interrupt(EnemyState::Move);
        rig.run(1.0, DT);
        assert_eq!(rig.state(), EnemyState::Move);
        assert!((rig.pos.x - 80.0).abs() < 0.5);
    }
}
