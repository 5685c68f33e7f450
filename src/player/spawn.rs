use bevy::prelude::*;
use crate::shared::*;

/// Spawn the player at the centre of the arena with one empty mount per
/// weapon kind, then ask for every loadout to be built.
/// Runs on every `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    balance: Res<Balance>,
    existing: Query<Entity, With<Player>>,
    mut rebuild: EventWriter<RebuildLoadoutEvent>,
) {
    // Guard: don't double-spawn when returning from pause or an upgrade.
    if !existing.is_empty() {
        return;
    }

    let center = balance.arena.center();
    commands
        .spawn((
            Player,
            Health::new(balance.player.max_hp),
            Hitbox::circle(balance.player.radius),
            // Z = 10 so the player draws above enemies and pickups.
            Transform::from_translation(center.extend(10.0)),
        ))
        .with_children(|parent| {
            for kind in WeaponKind::ALL {
                parent.spawn((WeaponMount { kind }, Transform::default()));
            }
        });

    rebuild.send_batch(WeaponKind::ALL.map(RebuildLoadoutEvent));
    info!("Player spawned at {:?}", center);
}
