//! The boss encounter: freeze the minions, clear them, bring in the boss.

use bevy::prelude::*;

use crate::shared::*;

use super::director::spawn_offset;

const ALERT_OFFSET: Vec2 = Vec2::new(40.0, 40.0);

/// Starts an encounter unless one is already running.
pub fn begin_encounter(
    mut commands: Commands,
    mut requests: EventReader<StartEncounterEvent>,
    mut encounter: ResMut<BossEncounter>,
    balance: Res<Balance>,
    minions: Query<(Entity, &Transform), (With<Minion>, Without<Suspended>)>,
) {
    let mut requested = requests.read().count();
    if requested == 0 {
        return;
    }
    if encounter.is_active() {
        warn!("Boss encounter already running; ignoring {} request(s)", requested);
        return;
    }
    requested -= 1;
    if requested > 0 {
        warn!("Ignoring {} extra boss encounter request(s)", requested);
    }

    let warning = balance.waves.warning_secs;
    let mut frozen = 0;
    for (entity, transform) in &minions {
        commands.entity(entity).try_insert(Suspended);
        commands.spawn((
            AlertMarker,
            Lifespan::secs(warning),
            Transform::from_translation(transform.translation + ALERT_OFFSET.extend(1.0)),
        ));
        frozen += 1;
    }

    encounter.phase = EncounterPhase::Warning(Timer::from_seconds(warning, TimerMode::Once));
    info!("Boss encounter started; {} minions frozen", frozen);
}

#[allow(clippy::too_many_arguments)]
pub fn advance_encounter(
    mut commands: Commands,
    time: Res<Time>,
    mut encounter: ResMut<BossEncounter>,
    balance: Res<Balance>,
    mut rng: ResMut<GameRng>,
    suspended: Query<(Entity, &Transform), (With<Minion>, With<Suspended>)>,
    players: Query<&Transform, With<Player>>,
    mut fx: EventWriter<FxEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut music: EventWriter<PlayMusicEvent>,
    mut spawns: EventWriter<SpawnEnemyEvent>,
) {
    let next = match &mut encounter.phase {
        EncounterPhase::Warning(timer) => {
            timer.tick(time.delta());
            if !timer.finished() {
                return;
            }
            for (entity, transform) in &suspended {
                fx.send(FxEvent {
                    kind: FxKind::Kaboom,
                    position: transform.translation.truncate(),
                });
                commands.entity(entity).despawn_recursive();
            }
            EncounterPhase::Reveal(Timer::from_seconds(
                balance.waves.reveal_secs,
                TimerMode::Once,
            ))
        }
        EncounterPhase::Reveal(timer) => {
            timer.tick(time.delta());
            if !timer.finished() {
                return;
            }
            let center = players
                .get_single()
                .map(|player| player.translation.truncate())
                .unwrap_or_else(|_| balance.arena.center());
            spawns.send(SpawnEnemyEvent {
                archetype: Archetype::Boss,
                position: center + spawn_offset(&mut rng.0, balance.waves.spawn_radius),
            });
            sfx.send(PlaySfxEvent::new("mystic"));
            music.send(PlayMusicEvent {
                track_id: "music2".to_string(),
            });
            info!("The boss has arrived");
            EncounterPhase::Fighting
        }
        EncounterPhase::Dormant | EncounterPhase::Fighting => return,
    };
    encounter.phase = next;
}

pub fn conclude_encounter(
    mut killed: EventReader<EnemyKilledEvent>,
    mut encounter: ResMut<BossEncounter>,
    mut music: EventWriter<PlayMusicEvent>,
) {
    let boss_down = killed.read().any(|event| event.archetype.is_boss());
    if !boss_down || !matches!(encounter.phase, EncounterPhase::Fighting) {
        return;
    }
    encounter.phase = EncounterPhase::Dormant;
    music.send(PlayMusicEvent {
        track_id: "music".to_string(),
    });
    info!("Boss defeated; waves resume");
}

pub fn reset_encounter(
    mut restarts: EventReader<SessionRestartEvent>,
    mut encounter: ResMut<BossEncounter>,
    mut director: ResMut<WaveDirector>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    encounter.phase = EncounterPhase::Dormant;
    director.timer.reset();
}
