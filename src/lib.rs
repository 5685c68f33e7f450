//! Arena survivor library crate.
//!
//! The binary crate (`main.rs`) is the actual game entry point and adds the
//! windowed glue (input, UI, audio). `ArenaPlugin` is the whole simulation, so
//! `tests/` integration tests can drive it without needing a window or GPU.

pub mod shared;
pub mod fsm;
pub mod data;
pub mod enemies;
pub mod combat;
pub mod progression;
pub mod weapons;
pub mod waves;
pub mod player;
pub mod input;
pub mod ui;

use bevy::prelude::*;

use shared::*;

/// Game state, the shared contract, the frame pipeline and every gameplay
/// domain. Needs `StatesPlugin` and a `Time` source from the host app.
pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app
            // Game state
            .init_state::<GameState>()
            // Shared resources
            .init_resource::<Balance>()
            .init_resource::<Progression>()
            .init_resource::<WeaponLevels>()
            .init_resource::<BossEncounter>()
            .init_resource::<WaveDirector>()
            .init_resource::<GameRng>()
            .init_resource::<PlayerInput>()
            // Events
            .add_event::<DamageEvent>()
            .add_event::<EnemyKilledEvent>()
            .add_event::<PlayerDiedEvent>()
            .add_event::<ContactEvent>()
            .add_event::<SpawnEnemyEvent>()
            .add_event::<StartEncounterEvent>()
            .add_event::<RebuildLoadoutEvent>()
            .add_event::<UpgradeChosenEvent>()
            .add_event::<TogglePauseEvent>()
            .add_event::<RestartRequestEvent>()
            .add_event::<SessionRestartEvent>()
            .add_event::<PlaySfxEvent>()
            .add_event::<PlayMusicEvent>()
            .add_event::<HurtAlarmEvent>()
            .add_event::<FxEvent>()
            // Frame pipeline
            .configure_sets(
                Update,
                (
                    ArenaSet::Requests,
                    ArenaSet::Resets,
                    ArenaSet::Intent,
                    ArenaSet::Director,
                    ArenaSet::Behavior,
                    ArenaSet::Motion,
                    ArenaSet::Contacts,
                    ArenaSet::Damage,
                    ArenaSet::Scoring,
                    ArenaSet::Aftermath,
                )
                    .chain(),
            )
            .configure_sets(
                Update,
                (
                    ArenaSet::Intent,
                    ArenaSet::Director,
                    ArenaSet::Behavior,
                    ArenaSet::Motion,
                    ArenaSet::Contacts,
                    ArenaSet::Damage,
                    ArenaSet::Scoring,
                    ArenaSet::Aftermath,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Domain plugins
            .add_plugins((
                data::DataPlugin,
                enemies::EnemyPlugin,
                combat::CombatPlugin,
                progression::ProgressionPlugin,
                weapons::WeaponsPlugin,
                waves::WavesPlugin,
                player::PlayerPlugin,
            ));
    }
}
