use bevy::prelude::*;
use crate::shared::*;

/// Past this distance the camera jumps instead of easing (restart, spawn).
const SNAP_DISTANCE: f32 = 400.0;
const LERP_SPEED: f32 = 8.0;

/// Smoothly follow the player with the camera.
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut cam_tf) = camera_query.get_single_mut() else {
        return;
    };

    let target = player.translation.truncate();
    let current = cam_tf.translation.truncate();
    let next = if current.distance(target) > SNAP_DISTANCE {
        target
    } else {
        let t = (LERP_SPEED * time.delta_secs()).min(1.0);
        current.lerp(target, t)
    };

    cam_tf.translation.x = next.x;
    cam_tf.translation.y = next.y;
}
