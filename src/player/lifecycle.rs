//! Pause, death and restart.

use bevy::prelude::*;
use crate::shared::*;

/// Escape toggles between Playing and Paused; ignored elsewhere.
pub fn toggle_pause(
    mut requests: EventReader<TogglePauseEvent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    // Two presses in one frame cancel out.
    if requests.read().count() % 2 == 0 {
        return;
    }
    match state.get() {
        GameState::Playing => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Playing),
        _ => {}
    }
}

pub fn handle_player_death(
    mut deaths: EventReader<PlayerDiedEvent>,
    progression: Res<Progression>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if deaths.read().count() == 0 {
        return;
    }
    info!("Game over with score {}", progression.score());
    next_state.set(GameState::GameOver);
}

/// A restart request in GameOver becomes a session-wide reset.
pub fn handle_restart_request(
    mut requests: EventReader<RestartRequestEvent>,
    mut restarts: EventWriter<SessionRestartEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if requests.read().count() == 0 {
        return;
    }
    info!("Restarting session");
    restarts.send(SessionRestartEvent);
    next_state.set(GameState::Playing);
}

/// Clears the arena and refills the player for a new session.
#[allow(clippy::too_many_arguments)]
pub fn reset_arena(
    mut commands: Commands,
    mut restarts: EventReader<SessionRestartEvent>,
    balance: Res<Balance>,
    mut players: Query<(&mut Health, &mut Transform), With<Player>>,
    enemies: Query<(Entity, &Transform), (With<Enemy>, Without<Player>)>,
    leftovers: Query<Entity, Or<(With<Heart>, With<Projectile>, With<AlertMarker>)>>,
    mut fx: EventWriter<FxEvent>,
    mut music: EventWriter<PlayMusicEvent>,
) {
    if restarts.read().count() == 0 {
        return;
    }

    for (entity, transform) in &enemies {
        fx.send(FxEvent {
            kind: FxKind::Kaboom,
            position: transform.translation.truncate(),
        });
        commands.entity(entity).despawn_recursive();
    }
    for entity in &leftovers {
        commands.entity(entity).despawn_recursive();
    }

    for (mut health, mut transform) in &mut players {
        *health = Health::new(balance.player.max_hp);
        let center = balance.arena.center();
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }

    music.send(PlayMusicEvent {
        track_id: "music".to_string(),
    });
}
