mod camera;
mod lifecycle;
mod movement;
mod spawn;

pub use lifecycle::*;
pub use movement::{clamp_to_arena, intent_velocity};

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Requests are honoured in every state --
        app.add_systems(
            Update,
            (
                toggle_pause,
                handle_restart_request.run_if(in_state(GameState::GameOver)),
            )
                .in_set(ArenaSet::Requests),
        );
        app.add_systems(Update, reset_arena.in_set(ArenaSet::Resets));

        // -- Gameplay --
        app.add_systems(Update, movement::move_player.in_set(ArenaSet::Intent));
        app.add_systems(
            Update,
            (handle_player_death, camera::camera_follow_player).in_set(ArenaSet::Aftermath),
        );
    }
}
