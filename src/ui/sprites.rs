//! Placeholder visuals: flat-colour sprites for every gameplay entity,
//! gizmo lines for telegraphs and trumpet pulses, and kill bursts.

use bevy::prelude::*;
use crate::shared::*;
use crate::weapons::{Gun, Pulse, Trumpet};

const PLAYER_COLOR: Color = Color::srgb(0.35, 0.75, 1.0);
const BAG_COLOR: Color = Color::srgb(0.65, 0.5, 0.3);
const BUTTERFLY_COLOR: Color = Color::srgb(0.9, 0.45, 0.9);
const DINO_COLOR: Color = Color::srgb(0.4, 0.8, 0.35);
const BOSS_COLOR: Color = Color::srgb(0.85, 0.2, 0.2);
const FRIENDLY_COLOR: Color = Color::srgb(1.0, 1.0, 0.6);
const HOSTILE_COLOR: Color = Color::srgb(1.0, 0.35, 0.2);
const HEART_COLOR: Color = Color::srgb(1.0, 0.3, 0.45);
const BLADE_COLOR: Color = Color::srgb(0.85, 0.85, 0.95);
const GUN_COLOR: Color = Color::srgb(0.3, 0.3, 0.35);
const TRUMPET_COLOR: Color = Color::srgb(0.95, 0.8, 0.25);
const ALERT_COLOR: Color = Color::srgb(1.0, 0.9, 0.0);
const HEALTH_BAR_COLOR: Color = Color::srgb(0.9, 0.1, 0.1);
const KABOOM_COLOR: Color = Color::srgb(1.0, 0.7, 0.2);

const HEALTH_BAR_HEIGHT: f32 = 6.0;
const KABOOM_SIZE: f32 = 48.0;
const KABOOM_SECS: f32 = 0.4;

/// Expanding burst left behind by `FxKind::Kaboom`.
#[derive(Component)]
pub struct Burst {
    pub timer: Timer,
}

fn archetype_color(archetype: Archetype) -> Color {
    match archetype {
        Archetype::Bag => BAG_COLOR,
        Archetype::Butterfly => BUTTERFLY_COLOR,
        Archetype::Dino => DINO_COLOR,
        Archetype::Boss => BOSS_COLOR,
    }
}

fn shape_size(shape: Shape) -> Vec2 {
    match shape {
        Shape::Circle { radius } => Vec2::splat(radius * 2.0),
        Shape::Rect { half } => half * 2.0,
    }
}

fn block(color: Color, size: Vec2) -> Sprite {
    Sprite {
        color,
        custom_size: Some(size),
        ..default()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// DRESS NEW ENTITIES
// ═══════════════════════════════════════════════════════════════════════

#[allow(clippy::too_many_arguments)]
pub fn dress_new_entities(
    mut commands: Commands,
    players: Query<(Entity, &Hitbox), Added<Player>>,
    enemies: Query<(Entity, &Enemy, &Hitbox), Added<Enemy>>,
    projectiles: Query<(Entity, &Projectile, &Hitbox), Added<Projectile>>,
    pickups: Query<(Entity, &Hitbox), Added<Heart>>,
    blades: Query<(Entity, &Hitbox), Added<SwordBlade>>,
    guns: Query<Entity, Added<Gun>>,
    trumpets: Query<Entity, Added<Trumpet>>,
    alerts: Query<Entity, Added<AlertMarker>>,
) {
    let mut dress = |entity: Entity, sprite: Sprite| {
        if let Some(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.try_insert(sprite);
        }
    };

    for (entity, hitbox) in &players {
        dress(entity, block(PLAYER_COLOR, shape_size(hitbox.0)));
    }
    for (entity, enemy, hitbox) in &enemies {
        dress(entity, block(archetype_color(enemy.archetype), shape_size(hitbox.0)));
    }
    for (entity, projectile, hitbox) in &projectiles {
        let color = match projectile.faction {
            Faction::Friendly => FRIENDLY_COLOR,
            Faction::Hostile => HOSTILE_COLOR,
        };
        dress(entity, block(color, shape_size(hitbox.0)));
    }
    for (entity, hitbox) in &pickups {
        dress(entity, block(HEART_COLOR, shape_size(hitbox.0)));
    }
    for (entity, hitbox) in &blades {
        // Long thin blade along the orbit radius.
        let size = shape_size(hitbox.0);
        dress(entity, block(BLADE_COLOR, Vec2::new(size.x * 0.5, size.y * 2.0)));
    }
    for entity in &guns {
        dress(entity, block(GUN_COLOR, Vec2::new(32.0, 16.0)));
    }
    for entity in &trumpets {
        dress(entity, block(TRUMPET_COLOR, Vec2::splat(20.0)));
    }
    for entity in &alerts {
        dress(entity, block(ALERT_COLOR, Vec2::new(8.0, 28.0)));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PER-FRAME VISUAL STATE
// ═══════════════════════════════════════════════════════════════════════

pub fn flip_enemies(mut enemies: Query<(&EnemyMotion, &mut Sprite), With<Enemy>>) {
    for (motion, mut sprite) in &mut enemies {
        if sprite.flip_x != motion.facing_left {
            sprite.flip_x = motion.facing_left;
        }
    }
}

/// Health bars have no sprite until their first frame; this keeps the width in sync.
pub fn size_health_bars(
    mut commands: Commands,
    mut bars: Query<(Entity, &BossHealthBar, Option<&mut Sprite>)>,
) {
    for (entity, bar, sprite) in &mut bars {
        let size = Vec2::new(bar.width.max(0.0), HEALTH_BAR_HEIGHT);
        match sprite {
            Some(mut sprite) => sprite.custom_size = Some(size),
            None => {
                commands.entity(entity).try_insert(block(HEALTH_BAR_COLOR, size));
            }
        }
    }
}

pub fn draw_telegraphs(mut gizmos: Gizmos, telegraphs: Query<&Telegraph>) {
    for telegraph in &telegraphs {
        for segment in &telegraph.segments {
            gizmos.line_2d(
                segment.from,
                segment.to,
                Color::srgba(1.0, 0.2, 0.2, segment.opacity.clamp(0.0, 1.0)),
            );
        }
    }
}

/// Trumpet rings grow to full size and fade over their lifespan.
pub fn draw_pulses(mut gizmos: Gizmos, pulses: Query<(&Pulse, &Lifespan, &GlobalTransform)>) {
    for (pulse, lifespan, transform) in &pulses {
        let t = lifespan.0.fraction();
        gizmos.circle_2d(
            transform.translation().truncate(),
            pulse.max_radius * ease_out_quad(t),
            Color::srgba(1.0, 0.9, 0.4, 1.0 - t),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FX
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_fx(mut commands: Commands, mut events: EventReader<FxEvent>) {
    for event in events.read() {
        match event.kind {
            FxKind::Kaboom => {
                commands.spawn((
                    Burst {
                        timer: Timer::from_seconds(KABOOM_SECS, TimerMode::Once),
                    },
                    block(KABOOM_COLOR, Vec2::splat(KABOOM_SIZE)),
                    Transform::from_translation(event.position.extend(5.0)),
                ));
            }
        }
    }
}

pub fn animate_bursts(
    mut commands: Commands,
    time: Res<Time>,
    mut bursts: Query<(Entity, &mut Burst, &mut Sprite, &mut Transform)>,
) {
    for (entity, mut burst, mut sprite, mut transform) in &mut bursts {
        burst.timer.tick(time.delta());
        if burst.timer.finished() {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        let t = burst.timer.fraction();
        transform.scale = Vec3::splat(1.0 + ease_out_quad(t));
        sprite.color = KABOOM_COLOR.with_alpha(1.0 - t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_size() {
        assert_eq!(shape_size(Shape::Circle { radius: 24.0 }), Vec2::splat(48.0));
        assert_eq!(shape_size(Hitbox::rect(80.0, 160.0).0), Vec2::new(80.0, 160.0));
    }
}
