//! Boss: alternates between a bullet ring and a telegraphed dash.

use std::f32::consts::{FRAC_PI_4, TAU};

use bevy::prelude::*;
use rand::Rng;

use crate::fsm::{Segment, StateHooks};
use crate::shared::*;

use super::actor::Actor;

const ARROW_START: f32 = 80.0;
const ARROW_TIP: f32 = 240.0;
const ARROW_BARB: f32 = 40.0;
/// Flash rate of the telegraph, radians per second.
const ARROW_FLASH: f32 = 12.0;

pub(super) fn hooks<'a>(state: EnemyState) -> StateHooks<Actor<'a>> {
    match state {
        EnemyState::Idle => StateHooks::new().on_enter(choose_phase),
        EnemyState::Charge1 => StateHooks::new().on_enter(charge_ring).on_update(jitter),
        EnemyState::Attack1 => StateHooks::new().on_enter(fire_ring),
        EnemyState::Charge2 => StateHooks::new().on_enter(charge_dash).on_draw(telegraph),
        EnemyState::Attack2 => StateHooks::new()
            .on_enter(dash)
            .on_update(land)
            .on_exit(stop),
        EnemyState::Move => StateHooks::new().on_enter(pursue).on_update(approach),
        _ => StateHooks::new(),
    }
}

fn choose_phase(actor: &mut Actor) {
    let next = if actor.rng.gen_bool(0.5) {
        EnemyState::Charge1
    } else {
        EnemyState::Charge2
    };
    actor.wait_then(actor.tuning.boss_phase_secs, next);
}

fn charge_ring(actor: &mut Actor) {
    actor.wait_then(actor.tuning.boss_phase_secs, EnemyState::Attack1);
}

fn jitter(actor: &mut Actor) -> Option<EnemyState> {
    let range = actor.tuning.boss_jitter;
    let offset = Vec2::new(
        actor.rng.gen_range(-range..=range),
        actor.rng.gen_range(-range..=range),
    );
    actor.pos += offset;
    None
}

fn fire_ring(actor: &mut Actor) {
    let count = actor.tuning.boss_ring_count.max(1);
    let speed = actor.tuning.boss_ring_speed;
    for i in 0..count {
        let angle = TAU * i as f32 / count as f32;
        let velocity = Vec2::from_angle(angle) * speed;
        actor.fire(actor.pos, velocity, Hitbox::circle(6.0));
    }
    actor.sound(PlaySfxEvent::new("error").with_volume(0.3));
    actor.wait_then(actor.tuning.boss_phase_secs, EnemyState::Move);
}

fn charge_dash(actor: &mut Actor) {
    actor.wait_then(actor.tuning.boss_phase_secs, EnemyState::Attack2);
}

/// A flashing arrow from the boss toward the player.
fn telegraph(actor: &Actor, out: &mut Vec<Segment>) {
    let dir = (actor.player - actor.pos).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let opacity = 0.5 + 0.5 * (actor.machine.elapsed() * ARROW_FLASH).sin();
    let start = actor.pos + dir * ARROW_START;
    let tip = actor.pos + dir * ARROW_TIP;
    out.push(Segment {
        from: start,
        to: tip,
        opacity,
    });
    for barb in [FRAC_PI_4, -FRAC_PI_4] {
        out.push(Segment {
            from: tip,
            to: tip + Vec2::from_angle(barb).rotate(-dir) * ARROW_BARB,
            opacity,
        });
    }
}

fn dash(actor: &mut Actor) {
    actor.sound(PlaySfxEvent::new("error"));
    actor.begin_dash(actor.stats.speed * actor.tuning.boss_dash_multiplier);
}

fn land(actor: &mut Actor) -> Option<EnemyState> {
    actor.follow_dash(EnemyState::Idle)
}

fn stop(actor: &mut Actor) {
    actor.end_dash();
}

fn pursue(actor: &mut Actor) {
    actor.wait_then(actor.tuning.boss_phase_secs, EnemyState::Idle);
}

fn approach(actor: &mut Actor) -> Option<EnemyState> {
    actor.step_toward_player(actor.stats.speed);
    None
}

#[cfg(test)]
mod tests {
    use super::super::actor::testing::Rig;
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn rig() -> Rig {
        Rig::new(Archetype::Boss, Vec2::ZERO, Vec2::new(600.0, 0.0))
    }

    #[test]
    fn test_idle_picks_a_charge_phase() {
        let mut seen = Vec::new();
        for seed in 0..16 {
            let mut boss = rig();
            boss.rng = rand::SeedableRng::seed_from_u64(seed);
            boss.run(1.05, DT);
            assert!(matches!(
                boss.state(),
                EnemyState::Charge1 | EnemyState::Charge2
            ));
            seen.push(boss.state());
        }
        assert!(seen.contains(&EnemyState::Charge1));
        assert!(seen.contains(&EnemyState::Charge2));
    }

    #[test]
    fn test_ring_attack_fires_evenly_spaced_bullets() {
        let mut boss = rig();
        boss.step(DT);
        boss.machine.interrupt(EnemyState::Attack1);
        boss.step(DT);
        let shots = boss.shots();
        assert_eq!(shots.len(), 20);
        for shot in &shots {
            assert!((shot.length() - 800.0).abs() < 1e-2);
        }
        assert!((shots[0] - Vec2::new(800.0, 0.0)).length() < 1e-2);
        assert!((shots[5] - Vec2::new(0.0, 800.0)).length() < 1e-2);

        boss.run(1.05, DT);
        assert_eq!(boss.state(), EnemyState::Move);
        boss.run(1.0, DT);
        assert_eq!(boss.state(), EnemyState::Idle);
    }

    #[test]
    fn test_charge1_jitters_in_place() {
        let mut boss = rig();
        boss.step(DT);
        boss.machine.interrupt(EnemyState::Charge1);
        boss.run(0.5, DT);
        assert_ne!(boss.pos, Vec2::ZERO);
        assert!(boss.pos.length() < 5.0 * 30.0 * 2.0);
        boss.run(0.55, DT);
        assert_eq!(boss.state(), EnemyState::Attack1);
    }

    #[test]
    fn test_charge2_telegraphs_only_while_charging() {
        let mut boss = rig();
        boss.step(DT);
        assert!(boss.segments.is_empty());

        boss.machine.interrupt(EnemyState::Charge2);
        boss.step(DT);
        assert_eq!(boss.segments.len(), 3);
        let shaft = boss.segments[0];
        assert!((shaft.from - Vec2::new(80.0, 0.0)).length() < 1e-3);
        assert!((shaft.to - Vec2::new(240.0, 0.0)).length() < 1e-3);
        // Barbs point back toward the boss.
        assert!(boss.segments[1].to.x < 240.0);
        assert!(boss.segments[2].to.x < 240.0);
        assert!(boss.segments[1].to.y * boss.segments[2].to.y < 0.0);

        boss.run(1.05, DT);
        assert_eq!(boss.state(), EnemyState::Attack2);
        assert!(boss.segments.is_empty());
    }

    #[test]
    fn test_dash_attack_is_three_times_faster() {
        let mut boss = rig();
        boss.step(DT);
        boss.machine.interrupt(EnemyState::Attack2);
        boss.step(DT);
        let dash = boss.motion.dash.unwrap();
        assert!((dash.duration - 1.0).abs() < 1e-3);
        assert!((dash.to - Vec2::new(700.0, 0.0)).length() < 1e-3);
        boss.run(1.05, DT);
        assert_eq!(boss.state(), EnemyState::Idle);
        assert!((boss.pos - Vec2::new(700.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn test_boss_ignores_dizzy() {
        assert!(!Archetype::Boss.allows(EnemyState::Dizzy));
    }
}
