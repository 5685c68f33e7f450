mod audio;
mod hud;
mod sprites;

use bevy::prelude::*;
use crate::shared::*;

/// Everything the player sees and hears. Reads the simulation, never drives it.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<audio::MusicState>()
            .init_resource::<audio::AlarmState>()
            .init_resource::<audio::SoundBank>();

        // ─── STARTUP ───
        app.add_systems(
            Startup,
            (spawn_camera, audio::preload_sounds, hud::spawn_hud),
        );

        // ─── AUDIO ───
        app.add_systems(OnEnter(GameState::Playing), audio::start_game_music);
        app.add_systems(OnEnter(GameState::Paused), audio::pause_music);
        app.add_systems(OnExit(GameState::Paused), audio::resume_music);
        app.add_systems(
            Update,
            (
                audio::handle_play_sfx,
                audio::handle_play_music,
                audio::handle_hurt_alarm,
            )
                .after(ArenaSet::Aftermath),
        );

        // ─── WORLD VISUALS ───
        app.add_systems(
            Update,
            (
                sprites::dress_new_entities,
                sprites::flip_enemies,
                sprites::size_health_bars,
                sprites::draw_telegraphs,
                sprites::draw_pulses,
                (sprites::spawn_fx, sprites::animate_bursts).chain(),
            )
                .after(ArenaSet::Aftermath),
        );

        // ─── HUD ───
        app.add_systems(
            Update,
            (hud::update_hud_text, hud::update_exp_bar, hud::update_banner)
                .after(ArenaSet::Aftermath),
        );
    }
}

fn spawn_camera(mut commands: Commands, balance: Res<Balance>) {
    commands.spawn((
        Camera2d,
        Transform::from_translation(balance.arena.center().extend(999.0)),
    ));
}
