use bevy::prelude::*;

use crate::shared::*;

pub fn move_projectiles(time: Res<Time>, mut moving: Query<(&Velocity, &mut Transform)>) {
    let dt = time.delta_secs();
    for (velocity, mut transform) in &mut moving {
        transform.translation += velocity.0.extend(0.0) * dt;
    }
}

/// Despawns anything whose lifespan ran out: projectiles, alert markers, pulses.
pub fn expire_lifespans(
    mut commands: Commands,
    time: Res<Time>,
    mut lifespans: Query<(Entity, &mut Lifespan)>,
) {
    for (entity, mut lifespan) in &mut lifespans {
        lifespan.0.tick(time.delta());
        if lifespan.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Projectiles that wander far outside the arena are dropped early.
pub fn cull_stray_projectiles(
    mut commands: Commands,
    balance: Res<Balance>,
    projectiles: Query<(Entity, &Transform, &Lifespan), With<Projectile>>,
) {
    let arena = &balance.arena;
    let margin = Vec2::splat(arena.projectile_margin);
    let min = -margin;
    let max = Vec2::new(arena.width, arena.height) + margin;

    for (entity, transform, lifespan) in &projectiles {
        // Expiring this frame anyway.
        if lifespan.0.finished() {
            continue;
        }
        let pos = transform.translation.truncate();
        if pos.cmplt(min).any() || pos.cmpgt(max).any() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
