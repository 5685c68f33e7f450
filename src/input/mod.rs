use bevy::input::touch::Touches;
use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, (read_movement, read_requests).chain());
    }
}

/// The single point where held keys and drags become movement intent.
fn read_movement(
    keys: Res<ButtonInput<KeyCode>>,
    touches: Option<Res<Touches>>,
    state: Res<State<GameState>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();
    if *state.get() != GameState::Playing {
        return;
    }

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    input.move_axis = axis.normalize_or_zero();

    if let Some(touches) = touches {
        if let Some(touch) = touches.iter().next() {
            // Screen y grows downward.
            let delta = touch.delta();
            input.drag = Vec2::new(delta.x, -delta.y);
        }
    }
}

/// Discrete presses become request events; each is only meaningful in one state.
fn read_requests(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    state: Res<State<GameState>>,
    mut pause: EventWriter<TogglePauseEvent>,
    mut restart: EventWriter<RestartRequestEvent>,
    mut upgrade: EventWriter<UpgradeChosenEvent>,
) {
    match state.get() {
        GameState::Playing | GameState::Paused => {
            if keys.just_pressed(KeyCode::Escape) {
                pause.send(TogglePauseEvent);
            }
        }
        GameState::GameOver => {
            if keys.just_pressed(KeyCode::Space) || mouse.just_pressed(MouseButton::Left) {
                restart.send(RestartRequestEvent);
            }
        }
        GameState::UpgradeChoice => {
            for (key, kind) in [
                (KeyCode::Digit1, WeaponKind::Sword),
                (KeyCode::Digit2, WeaponKind::Gun),
                (KeyCode::Digit3, WeaponKind::Trumpet),
            ] {
                if keys.just_pressed(key) {
                    upgrade.send(UpgradeChosenEvent(kind));
                    break;
                }
            }
        }
        GameState::Loading => {}
    }
}
