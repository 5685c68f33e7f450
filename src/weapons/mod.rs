//! Weapon loadout: swords orbit, guns shoot sideways, the trumpet dizzies.

use bevy::prelude::*;

use crate::shared::*;

mod firing;
mod loadout;
mod rebuild;

pub use firing::*;
pub use loadout::*;
pub use rebuild::*;

/// Rotates the sword mount.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Spin {
    /// Degrees per second.
    pub speed: f32,
    pub angle: f32,
}

#[derive(Component, Debug)]
pub struct Gun {
    /// `1.0` fires right, `-1.0` fires left.
    pub side: f32,
    pub timer: Timer,
}

#[derive(Component, Debug)]
pub struct Trumpet {
    pub timer: Timer,
}

/// Cosmetic ring that grows over its `Lifespan`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Pulse {
    pub max_radius: f32,
}

pub struct WeaponsPlugin;

impl Plugin for WeaponsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (reset_loadouts, rebuild_loadouts)
                .chain()
                .in_set(ArenaSet::Resets),
        )
        .add_systems(Update, (fire_guns, blow_trumpets).in_set(ArenaSet::Behavior))
        .add_systems(Update, spin_swords.in_set(ArenaSet::Motion));
    }
}
