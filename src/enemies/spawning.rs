use bevy::prelude::*;

use crate::shared::*;

/// Collision radius for minions.
const MINION_RADIUS: f32 = 24.0;
const BOSS_SIZE: Vec2 = Vec2::new(80.0, 160.0);
const BOSS_BAR_WIDTH: f32 = 52.0;
const BOSS_BAR_OFFSET: f32 = 120.0;

pub fn spawn_requested_enemies(
    mut commands: Commands,
    mut requests: EventReader<SpawnEnemyEvent>,
    balance: Res<Balance>,
) {
    for request in requests.read() {
        spawn_enemy(&mut commands, request.archetype, request.position, &balance);
    }
}

/// Spawns one enemy in its archetype's initial state.
pub fn spawn_enemy(
    commands: &mut Commands,
    archetype: Archetype,
    position: Vec2,
    balance: &Balance,
) -> Entity {
    let stats = balance.stats(archetype);
    let hitbox = if archetype.is_boss() {
        Hitbox::rect(BOSS_SIZE.x, BOSS_SIZE.y)
    } else {
        Hitbox::circle(MINION_RADIUS)
    };

    let mut entity = commands.spawn((
        Enemy {
            archetype,
            contact_damage: stats.contact_damage,
            exp: stats.exp,
            score: stats.score,
        },
        Health::new(stats.max_hp),
        hitbox,
        StateMachine::new(archetype.initial_state()),
        EnemyMotion::default(),
        Telegraph::default(),
        Transform::from_translation(position.extend(1.0)),
    ));

    if archetype.is_boss() {
        entity.with_children(|parent| {
            parent.spawn((
                BossHealthBar {
                    width: BOSS_BAR_WIDTH,
                    full_width: BOSS_BAR_WIDTH,
                },
                Transform::from_xyz(0.0, BOSS_BAR_OFFSET, 1.0),
            ));
        });
    } else {
        entity.insert(Minion);
    }

    debug!("Spawned {:?} at {:?}", archetype, position);
    entity.id()
}
