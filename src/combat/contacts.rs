use std::collections::HashSet;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

use super::collision::{overlaps, ContactTracker};

type Body = (Entity, Shape, Vec2);

/// World position of an entity, composed through its parents.
fn world_position(entity: Entity, transforms: &Query<(&Transform, Option<&Parent>)>) -> Option<Vec2> {
    let (local, parent) = transforms.get(entity).ok()?;
    let mut world = *local;
    let mut next = parent.map(Parent::get);
    while let Some(ancestor) = next {
        let (transform, parent) = transforms.get(ancestor).ok()?;
        world = transform.mul_transform(world);
        next = parent.map(Parent::get);
    }
    Some(world.translation.truncate())
}

fn pairs(kind: ContactKind, left: &[Body], right: &[Body], out: &mut Vec<(ContactKind, Entity, Entity)>) {
    for &(a, a_shape, a_pos) in left {
        for &(b, b_shape, b_pos) in right {
            if overlaps(a_shape, a_pos, b_shape, b_pos) {
                out.push((kind, a, b));
            }
        }
    }
}

/// Collects every overlapping pair this frame. The first entity of each pair
/// is the player, sword or friendly bullet; the second is what it touched.
#[allow(clippy::type_complexity)]
pub fn detect_contacts(
    mut tracker: ResMut<ContactTracker>,
    mut contacts: EventWriter<ContactEvent>,
    transforms: Query<(&Transform, Option<&Parent>)>,
    bodies: Query<(
        Entity,
        &Hitbox,
        Has<Player>,
        Has<Enemy>,
        Has<Heart>,
        Has<SwordBlade>,
        Option<&Projectile>,
    )>,
) {
    let mut players = Vec::new();
    let mut enemies = Vec::new();
    let mut hearts = Vec::new();
    let mut swords = Vec::new();
    let mut friendly = Vec::new();
    let mut hostile = Vec::new();

    for (entity, hitbox, is_player, is_enemy, is_heart, is_sword, projectile) in &bodies {
        let Some(pos) = world_position(entity, &transforms) else {
            continue;
        };
        let body = (entity, hitbox.0, pos);
        if is_player {
            players.push(body);
        } else if is_enemy {
            enemies.push(body);
        } else if is_heart {
            hearts.push(body);
        } else if is_sword {
            swords.push(body);
        } else if let Some(projectile) = projectile {
            match projectile.faction {
                Faction::Friendly => friendly.push(body),
                Faction::Hostile => hostile.push(body),
            }
        }
    }

    let mut current = Vec::new();
    pairs(ContactKind::PlayerEnemy, &players, &enemies, &mut current);
    pairs(ContactKind::PlayerEnemyBullet, &players, &hostile, &mut current);
    pairs(ContactKind::PlayerHeart, &players, &hearts, &mut current);
    pairs(ContactKind::SwordEnemy, &swords, &enemies, &mut current);
    pairs(ContactKind::BulletEnemy, &friendly, &enemies, &mut current);

    contacts.send_batch(tracker.observe(current));
}

/// Turns contacts into damage, healing and pickups.
#[allow(clippy::too_many_arguments)]
pub fn resolve_contacts(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<Balance>,
    mut rng: ResMut<GameRng>,
    mut contacts: EventReader<ContactEvent>,
    mut damage: EventWriter<DamageEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
    enemies: Query<&Enemy>,
    projectiles: Query<&Projectile>,
    blades: Query<&SwordBlade>,
    mut players: Query<&mut Health, With<Player>>,
) {
    let dt = time.delta_secs();
    let mut spent = HashSet::new();

    for contact in contacts.read() {
        match contact.kind {
            // Sustained: damage accrues with time spent overlapping.
            ContactKind::PlayerEnemy => {
                let Ok(enemy) = enemies.get(contact.second) else {
                    continue;
                };
                damage.send(DamageEvent {
                    target: contact.first,
                    amount: enemy.contact_damage * dt,
                });
            }
            ContactKind::PlayerEnemyBullet => {
                if !contact.started || !spent.insert(contact.second) {
                    continue;
                }
                let Ok(projectile) = projectiles.get(contact.second) else {
                    continue;
                };
                damage.send(DamageEvent {
                    target: contact.first,
                    amount: projectile.damage,
                });
                commands.entity(contact.second).despawn_recursive();
            }
            ContactKind::PlayerHeart => {
                if !contact.started || !spent.insert(contact.second) {
                    continue;
                }
                if let Ok(mut health) = players.get_mut(contact.first) {
                    if health.is_dead() {
                        continue;
                    }
                    health.heal(balance.player.heart_heal);
                }
                sfx.send(PlaySfxEvent::new("powerup"));
                commands.entity(contact.second).despawn_recursive();
            }
            ContactKind::SwordEnemy => {
                if !contact.started {
                    continue;
                }
                let Ok(blade) = blades.get(contact.first) else {
                    continue;
                };
                let cents = balance.behavior.detune_cents;
                sfx.send(PlaySfxEvent::new("sword").with_detune(rng.0.gen_range(-cents..=cents)));
                damage.send(DamageEvent {
                    target: contact.second,
                    amount: blade.damage,
                });
            }
            // Bullets pierce minions but stop at the boss.
            ContactKind::BulletEnemy => {
                if !contact.started || spent.contains(&contact.first) {
                    continue;
                }
                let (Ok(projectile), Ok(enemy)) =
                    (projectiles.get(contact.first), enemies.get(contact.second))
                else {
                    continue;
                };
                damage.send(DamageEvent {
                    target: contact.second,
                    amount: projectile.damage,
                });
                if enemy.archetype.is_boss() {
                    spent.insert(contact.first);
                    commands.entity(contact.first).despawn_recursive();
                }
            }
        }
    }
}

/// Starts the hurt alarm when the player first touches an enemy and stops it
/// once no enemy touches them or they die.
pub fn sound_hurt_alarm(
    mut contacts: EventReader<ContactEvent>,
    mut deaths: EventReader<PlayerDiedEvent>,
    mut alarm: EventWriter<HurtAlarmEvent>,
    mut sounding: Local<bool>,
) {
    let touched = contacts
        .read()
        .any(|contact| contact.kind == ContactKind::PlayerEnemy);
    let died = deaths.read().count() > 0;
    let next = touched && !died;
    if next != *sounding {
        *sounding = next;
        debug!("Hurt alarm {}", if next { "on" } else { "off" });
        alarm.send(HurtAlarmEvent { sounding: next });
    }
}
