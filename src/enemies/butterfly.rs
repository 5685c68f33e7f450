//! Butterfly: drifts erratically, then dashes through the player.

use bevy::prelude::Vec2;
use rand::Rng;

use crate::fsm::StateHooks;
use crate::shared::*;

use super::actor::Actor;

pub(super) fn hooks<'a>(state: EnemyState) -> StateHooks<Actor<'a>> {
    match state {
        EnemyState::Idle => StateHooks::new().on_enter(rest).on_update(drift),
        EnemyState::Attack => StateHooks::new()
            .on_enter(dash)
            .on_update(land)
            .on_exit(stop),
        _ => StateHooks::new(),
    }
}

fn rest(actor: &mut Actor) {
    actor.wait_then(actor.tuning.butterfly_idle_secs, EnemyState::Attack);
}

fn drift(actor: &mut Actor) -> Option<EnemyState> {
    let jitter = Vec2::new(actor.rng.gen_range(-1.0..=1.0), actor.rng.gen_range(-1.0..=1.0));
    actor.pos += jitter * actor.tuning.butterfly_drift * actor.dt;
    None
}

fn dash(actor: &mut Actor) {
    actor.positional_sound("wooosh");
    actor.begin_dash(actor.stats.speed);
}

fn land(actor: &mut Actor) -> Option<EnemyState> {
    actor.follow_dash(EnemyState::Idle)
}

fn stop(actor: &mut Actor) {
    actor.end_dash();
}
