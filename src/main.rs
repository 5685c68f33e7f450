use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use arena_survivor::input::InputPlugin;
use arena_survivor::ui::UiPlugin;
use arena_survivor::ArenaPlugin;

const SCREEN_WIDTH: f32 = 1280.0;
const SCREEN_HEIGHT: f32 = 720.0;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Arena Survivor".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins(ArenaPlugin)
        .add_plugins((InputPlugin, UiPlugin))
        .run();
}
