use bevy::prelude::*;

use crate::shared::*;

use super::loadout::{plan, Instance};
use super::{Gun, Spin, Trumpet};

/// Collision radius around a sword's centre.
const BLADE_RADIUS: f32 = 18.0;

/// Tears down every instance of the requested weapon kinds and spawns them
/// again from the current level.
pub fn rebuild_loadouts(
    mut commands: Commands,
    mut requests: EventReader<RebuildLoadoutEvent>,
    levels: Res<WeaponLevels>,
    balance: Res<Balance>,
    mut mounts: Query<(Entity, &WeaponMount, Option<&mut Spin>)>,
) {
    let mut kinds = Vec::new();
    for RebuildLoadoutEvent(kind) in requests.read() {
        if !kinds.contains(kind) {
            kinds.push(*kind);
        }
    }
    if kinds.is_empty() {
        return;
    }
    let tuning = &balance.weapons;

    for (mount, weapon, spin) in &mut mounts {
        if !kinds.contains(&weapon.kind) {
            continue;
        }
        let level = levels.get(weapon.kind);
        let loadout = plan(weapon.kind, level, tuning);

        let mut mount_commands = commands.entity(mount);
        match spin {
            Some(mut spin) => spin.speed = loadout.spin,
            None if weapon.kind == WeaponKind::Sword => {
                mount_commands.insert(Spin {
                    speed: loadout.spin,
                    angle: 0.0,
                });
            }
            None => {}
        }
        mount_commands.despawn_descendants();
        mount_commands.with_children(|parent| {
            for instance in &loadout.instances {
                match *instance {
                    Instance::Blade { angle } => {
                        let rotation = Quat::from_rotation_z(-angle.to_radians());
                        parent.spawn((
                            SwordBlade {
                                damage: tuning.sword_damage,
                            },
                            Hitbox::circle(BLADE_RADIUS),
                            Transform {
                                translation: rotation * Vec3::new(0.0, tuning.sword_orbit, 0.0),
                                rotation,
                                ..default()
                            },
                        ));
                    }
                    Instance::Gun { side } => {
                        let cadence = loadout.cadence.unwrap_or(tuning.gun_interval);
                        parent.spawn((
                            Gun {
                                side,
                                timer: Timer::from_seconds(cadence, TimerMode::Repeating),
                            },
                            Transform::from_xyz(side * tuning.gun_offset, 0.0, 0.0),
                        ));
                    }
                    Instance::Trumpet => {
                        let cadence = loadout.cadence.unwrap_or(tuning.trumpet_interval);
                        parent.spawn((
                            Trumpet {
                                timer: Timer::from_seconds(cadence, TimerMode::Repeating),
                            },
                            Transform::default(),
                        ));
                    }
                }
            }
        });

        debug!(
            "Rebuilt {} at level {}: {} instance(s)",
            weapon.kind.label(),
            level,
            loadout.instances.len()
        );
    }
}

/// A new session starts from the default levels.
pub fn reset_loadouts(
    mut restarts: EventReader<SessionRestartEvent>,
    mut levels: ResMut<WeaponLevels>,
    mut rebuild: EventWriter<RebuildLoadoutEvent>,
) {
    if restarts.read().count() == 0 {
        return;
    }
    *levels = WeaponLevels::default();
    rebuild.send_batch(WeaponKind::ALL.map(RebuildLoadoutEvent));
}
