//! Wave director and boss encounters.

use bevy::prelude::*;

use crate::shared::*;

mod director;
mod encounter;

pub use director::*;
pub use encounter::*;

pub struct WavesPlugin;

impl Plugin for WavesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, reset_encounter.in_set(ArenaSet::Resets))
            .add_systems(
                Update,
                (advance_encounter, spawn_waves)
                    .chain()
                    .in_set(ArenaSet::Director),
            )
            // Begin first: a boss kill that crosses the next mark is dropped
            // while the fight is still active.
            .add_systems(
                Update,
                (begin_encounter, conclude_encounter)
                    .chain()
                    .in_set(ArenaSet::Aftermath),
            );
    }
}
