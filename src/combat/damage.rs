use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

const HEART_RADIUS: f32 = 16.0;

/// Applies queued damage. A target that is gone or already at zero health
/// ignores further hits, so each death is reported exactly once.
pub fn apply_damage(
    mut events: EventReader<DamageEvent>,
    mut targets: Query<(&mut Health, &Transform, Option<&Enemy>, Has<Player>)>,
    mut killed: EventWriter<EnemyKilledEvent>,
    mut player_died: EventWriter<PlayerDiedEvent>,
) {
    let mut died_this_frame = HashSet::new();

    for event in events.read() {
        if died_this_frame.contains(&event.target) {
            continue;
        }
        let Ok((mut health, transform, enemy, is_player)) = targets.get_mut(event.target) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        health.take_damage(event.amount);
        if !health.is_dead() {
            continue;
        }
        died_this_frame.insert(event.target);

        if let Some(enemy) = enemy {
            killed.send(EnemyKilledEvent {
                entity: event.target,
                archetype: enemy.archetype,
                position: transform.translation.truncate(),
                exp: enemy.exp,
                score: enemy.score,
            });
        } else if is_player {
            player_died.send(PlayerDiedEvent);
        }
    }
}

/// Removes dead enemies with a burst and sometimes leaves a heart behind.
pub fn despawn_killed_enemies(
    mut commands: Commands,
    mut killed: EventReader<EnemyKilledEvent>,
    mut fx: EventWriter<FxEvent>,
    mut rng: ResMut<GameRng>,
    balance: Res<Balance>,
) {
    for event in killed.read() {
        let Some(mut entity) = commands.get_entity(event.entity) else {
            continue;
        };
        entity.despawn_recursive();
        fx.send(FxEvent {
            kind: FxKind::Kaboom,
            position: event.position,
        });
        debug!("{:?} killed at {:?}", event.archetype, event.position);

        if rng.0.gen_bool(balance.player.heart_drop_chance.clamp(0.0, 1.0)) {
            commands.spawn((
                Heart,
                Hitbox::circle(HEART_RADIUS),
                Transform::from_translation(event.position.extend(0.5)),
            ));
        }
    }
}
