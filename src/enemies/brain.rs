use bevy::prelude::*;

use crate::fsm::{draw, tick};
use crate::shared::*;

use super::actor::{Actor, Effect};

/// Bar width eases toward the true fraction at this rate per second.
const BAR_EASE_RATE: f32 = 12.0;

/// Ticks every non-suspended enemy's state machine and applies what the
/// hooks asked for.
#[allow(clippy::type_complexity)]
pub fn drive_enemies(
    mut commands: Commands,
    time: Res<Time>,
    balance: Res<Balance>,
    mut rng: ResMut<GameRng>,
    mut sfx: EventWriter<PlaySfxEvent>,
    player: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemies: Query<
        (
            &Enemy,
            &mut StateMachine<EnemyState>,
            &mut EnemyMotion,
            &mut Telegraph,
            &mut Transform,
        ),
        Without<Suspended>,
    >,
) {
    let Ok(player_tf) = player.get_single() else {
        return;
    };
    let player_pos = player_tf.translation.truncate();
    let dt = time.delta_secs();
    let mut effects = Vec::new();

    for (enemy, mut machine, mut motion, mut telegraph, mut transform) in &mut enemies {
        let archetype = enemy.archetype;
        let mut actor = Actor {
            archetype,
            machine: &mut *machine,
            motion: &mut *motion,
            pos: transform.translation.truncate(),
            player: player_pos,
            dt,
            stats: balance.stats(archetype),
            tuning: &balance.behavior,
            rng: &mut rng.0,
            effects: &mut effects,
        };

        tick(&archetype, &mut actor, dt);
        telegraph.segments.clear();
        draw(&archetype, &mut actor, &mut telegraph.segments);

        let pos = actor.pos;
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
        transform.rotation = Quat::from_rotation_z(-motion.spin.to_radians());
    }

    for effect in effects {
        match effect {
            Effect::Fire {
                origin,
                velocity,
                damage,
                hitbox,
            } => {
                commands.spawn(projectile_bundle(
                    Faction::Hostile,
                    damage,
                    origin,
                    velocity,
                    hitbox,
                    balance.weapons.projectile_lifespan,
                ));
            }
            Effect::Sound(event) => {
                sfx.send(event);
            }
        }
    }
}

pub fn ease_boss_health_bars(
    time: Res<Time>,
    healths: Query<&Health>,
    mut bars: Query<(&Parent, &mut BossHealthBar)>,
) {
    let t = (time.delta_secs() * BAR_EASE_RATE).min(1.0);
    for (parent, mut bar) in &mut bars {
        let Ok(health) = healths.get(parent.get()) else {
            continue;
        };
        let target = bar.full_width * health.fraction();
        bar.width += (target - bar.width) * t;
    }
}
