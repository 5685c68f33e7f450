use bevy::prelude::*;

use crate::shared::*;

use super::{Gun, Pulse, Spin, Trumpet};

/// Muzzle offset from the gun's centre, mirrored for the left gun.
const MUZZLE: Vec2 = Vec2::new(16.0, 8.0);

pub fn spin_swords(time: Res<Time>, mut mounts: Query<(&mut Spin, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut spin, mut transform) in &mut mounts {
        spin.angle = (spin.angle + spin.speed * dt) % 360.0;
        transform.rotation = Quat::from_rotation_z(-spin.angle.to_radians());
    }
}

pub fn fire_guns(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<Balance>,
    players: Query<&Transform, With<Player>>,
    mounts: Query<&Transform, With<WeaponMount>>,
    mut guns: Query<(&mut Gun, &Transform, &Parent)>,
) {
    let Ok(player) = players.get_single() else {
        return;
    };
    let tuning = &balance.weapons;

    for (mut gun, local, parent) in &mut guns {
        gun.timer.tick(time.delta());
        if !gun.timer.just_finished() {
            continue;
        }
        let mount = mounts.get(parent.get()).copied().unwrap_or_default();
        let world = player.mul_transform(mount).mul_transform(*local);
        let origin = world.translation.truncate() + Vec2::new(MUZZLE.x * gun.side, MUZZLE.y);

        commands.spawn(projectile_bundle(
            Faction::Friendly,
            tuning.gun_damage,
            origin,
            Vec2::new(gun.side * tuning.bullet_speed, 0.0),
            Hitbox::rect(24.0, 8.0),
            tuning.projectile_lifespan,
        ));
    }
}

/// Every trumpet blast dizzies the enemies around the player.
pub fn blow_trumpets(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<Balance>,
    mut sfx: EventWriter<PlaySfxEvent>,
    players: Query<(Entity, &Transform), With<Player>>,
    mut trumpets: Query<&mut Trumpet>,
    mut enemies: Query<(&Enemy, &Transform, &mut StateMachine<EnemyState>), Without<Suspended>>,
) {
    let Ok((player, player_tf)) = players.get_single() else {
        return;
    };
    let center = player_tf.translation.truncate();
    let tuning = &balance.weapons;

    for mut trumpet in &mut trumpets {
        trumpet.timer.tick(time.delta());
        if !trumpet.timer.just_finished() {
            continue;
        }

        let mut dizzied = 0;
        for (enemy, transform, mut machine) in &mut enemies {
            if !enemy.archetype.allows(EnemyState::Dizzy) {
                continue;
            }
            if transform.translation.truncate().distance(center) <= tuning.trumpet_radius {
                machine.interrupt(EnemyState::Dizzy);
                dizzied += 1;
            }
        }
        debug!("Trumpet dizzied {} enemies", dizzied);

        sfx.send(PlaySfxEvent::new("horn"));
        commands.entity(player).with_children(|parent| {
            parent.spawn((
                Pulse {
                    max_radius: tuning.pulse_radius,
                },
                Lifespan::secs(tuning.pulse_secs),
                Transform::from_xyz(0.0, 0.0, -1.0),
            ));
        });
    }
}
