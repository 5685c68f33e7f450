use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;
use bevy::utils::HashMap;
use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// SOUND BANK: every clip is requested once at startup
// ═══════════════════════════════════════════════════════════════════════

/// Effect ids other domains may send in a `PlaySfxEvent`.
const SFX_IDS: [&str; 7] = ["sword", "wooosh", "shoot", "powerup", "mystic", "error", "horn"];

/// Looped while an enemy touches the player.
const ALARM_ID: &str = "alarm";

/// Music track ids for `PlayMusicEvent`.
const MUSIC_IDS: [&str; 2] = ["music", "music2"];

#[derive(Resource, Default)]
pub struct SoundBank {
    clips: HashMap<String, Handle<AudioSource>>,
}

impl SoundBank {
    fn get(&self, id: &str) -> Option<Handle<AudioSource>> {
        self.clips.get(id).cloned()
    }
}

fn clip_path(id: &str) -> String {
    format!("sounds/{id}.ogg")
}

/// Playback rate for a pitch offset in cents.
pub fn detune_speed(cents: f32) -> f32 {
    2f32.powf(cents / 1200.0)
}

pub fn preload_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    let clips: HashMap<_, _> = SFX_IDS
        .iter()
        .chain(MUSIC_IDS.iter())
        .chain(std::iter::once(&ALARM_ID))
        .map(|id| (id.to_string(), asset_server.load(clip_path(id))))
        .collect();
    info!("Requested {} sound clips", clips.len());
    commands.insert_resource(SoundBank { clips });
}

// ═══════════════════════════════════════════════════════════════════════
// MUSIC STATE: tracks the currently playing music entity
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: String,
}

/// The hurt alarm loops on one entity that is paused and resumed, never respawned.
#[derive(Resource, Default)]
pub struct AlarmState {
    pub entity: Option<Entity>,
    pub sounding: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Spawn one-shot audio sources that auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    bank: Res<SoundBank>,
) {
    for event in events.read() {
        let Some(clip) = bank.get(&event.sfx_id) else {
            warn!("Unknown sound effect '{}'", event.sfx_id);
            continue;
        };
        commands.spawn((
            AudioPlayer::new(clip),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::new(event.volume.clamp(0.0, 1.0)))
                .with_speed(detune_speed(event.detune)),
        ));
    }
}

/// Stop the current music track and loop the requested one.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    bank: Res<SoundBank>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        if music_state.current_track_id == event.track_id && music_state.current_track.is_some() {
            continue;
        }
        if let Some(entity) = music_state.current_track.take() {
            commands.entity(entity).despawn_recursive();
        }

        if let Some(clip) = bank.get(&event.track_id) {
            let entity = commands
                .spawn((AudioPlayer::new(clip), PlaybackSettings::LOOP))
                .id();
            music_state.current_track = Some(entity);
            music_state.current_track_id = event.track_id.clone();
        } else {
            warn!("Unknown music track '{}'", event.track_id);
            music_state.current_track_id.clear();
        }
    }
}

/// Start the arena theme the first time we reach Playing.
pub fn start_game_music(
    mut music_events: EventWriter<PlayMusicEvent>,
    music_state: Res<MusicState>,
) {
    // Returning from pause or an upgrade keeps whatever is already playing.
    if music_state.current_track.is_some() {
        return;
    }
    music_events.send(PlayMusicEvent {
        track_id: "music".to_string(),
    });
}

pub fn pause_music(music_state: Res<MusicState>, sinks: Query<&AudioSink>) {
    if let Some(sink) = music_state.current_track.and_then(|e| sinks.get(e).ok()) {
        sink.pause();
    }
}

pub fn resume_music(music_state: Res<MusicState>, sinks: Query<&AudioSink>) {
    if let Some(sink) = music_state.current_track.and_then(|e| sinks.get(e).ok()) {
        sink.play();
    }
}

/// Follow `HurtAlarmEvent`s. The sink is synced every frame because it only
/// exists a frame after the alarm entity is spawned.
pub fn handle_hurt_alarm(
    mut events: EventReader<HurtAlarmEvent>,
    mut commands: Commands,
    bank: Res<SoundBank>,
    state: Res<State<GameState>>,
    mut alarm: ResMut<AlarmState>,
    sinks: Query<&AudioSink>,
) {
    if let Some(event) = events.read().last() {
        alarm.sounding = event.sounding;
    }
    let audible = alarm.sounding && *state.get() == GameState::Playing;

    let Some(entity) = alarm.entity else {
        if audible {
            let Some(clip) = bank.get(ALARM_ID) else {
                warn!("Unknown sound effect '{}'", ALARM_ID);
                return;
            };
            let entity = commands
                .spawn((AudioPlayer::new(clip), PlaybackSettings::LOOP))
                .id();
            alarm.entity = Some(entity);
        }
        return;
    };
    let Ok(sink) = sinks.get(entity) else {
        return;
    };
    if audible && sink.is_paused() {
        sink.play();
    } else if !audible && !sink.is_paused() {
        sink.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detune_speed() {
        assert_eq!(detune_speed(0.0), 1.0);
        assert!((detune_speed(1200.0) - 2.0).abs() < 1e-5);
        assert!((detune_speed(-1200.0) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_clip_path() {
        assert_eq!(clip_path("horn"), "sounds/horn.ogg");
    }
}
