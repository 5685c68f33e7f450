use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;

/// A random minion somewhere in the square of half-width `radius` around the
/// player. The player's own spot is not excluded.
pub fn pick_spawn<R: Rng>(rng: &mut R, player: Vec2, radius: f32) -> (Archetype, Vec2) {
    let archetype = Archetype::MINIONS
        .choose(rng)
        .copied()
        .unwrap_or(Archetype::Bag);
    (archetype, player + spawn_offset(rng, radius))
}

pub fn spawn_offset<R: Rng>(rng: &mut R, radius: f32) -> Vec2 {
    if radius <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(rng.gen_range(-radius..=radius), rng.gen_range(-radius..=radius))
}

/// Spawns one minion per interval while no boss encounter is running.
pub fn spawn_waves(
    time: Res<Time>,
    mut director: ResMut<WaveDirector>,
    encounter: Res<BossEncounter>,
    balance: Res<Balance>,
    mut rng: ResMut<GameRng>,
    players: Query<&Transform, With<Player>>,
    mut spawns: EventWriter<SpawnEnemyEvent>,
) {
    director.timer.tick(time.delta());
    if !director.timer.just_finished() || !director.enabled || encounter.is_active() {
        return;
    }
    let Ok(player) = players.get_single() else {
        return;
    };

    let (archetype, position) = pick_spawn(
        &mut rng.0,
        player.translation.truncate(),
        balance.waves.spawn_radius,
    );
    spawns.send(SpawnEnemyEvent {
        archetype,
        position,
    });
}
