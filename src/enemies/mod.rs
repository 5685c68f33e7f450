//! Enemy behavior library: one state-machine table per archetype.

use bevy::prelude::*;

use crate::shared::*;

mod actor;
mod bag;
mod boss;
mod brain;
mod butterfly;
mod dino;
mod dizzy;
mod spawning;

pub use actor::{Actor, Effect};
pub use brain::*;
pub use spawning::*;

pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (spawn_requested_enemies, drive_enemies)
                .chain()
                .in_set(ArenaSet::Behavior),
        )
        .add_systems(Update, ease_boss_health_bars.in_set(ArenaSet::Aftermath));
    }
}
