//! Combat resolution: contacts, damage, deaths, projectiles.

use bevy::prelude::*;

use crate::shared::*;

mod collision;
mod contacts;
mod damage;
mod projectiles;

pub use collision::*;
pub use contacts::*;
pub use damage::*;
pub use projectiles::*;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContactTracker>()
            .add_systems(Update, reset_contacts.in_set(ArenaSet::Resets))
            .add_systems(Update, move_projectiles.in_set(ArenaSet::Motion))
            .add_systems(
                Update,
                (detect_contacts, resolve_contacts)
                    .chain()
                    .in_set(ArenaSet::Contacts),
            )
            .add_systems(Update, apply_damage.in_set(ArenaSet::Damage))
            .add_systems(
                Update,
                (despawn_killed_enemies, cull_stray_projectiles, expire_lifespans)
                    .chain()
                    .in_set(ArenaSet::Aftermath),
            )
            .add_systems(Update, sound_hurt_alarm.in_set(ArenaSet::Aftermath));
    }
}

fn reset_contacts(mut restarts: EventReader<SessionRestartEvent>, mut tracker: ResMut<ContactTracker>) {
    if restarts.read().count() > 0 {
        tracker.clear();
    }
}
