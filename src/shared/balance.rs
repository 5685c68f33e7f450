//! The balance table: every gameplay number in one place.
//!
//! Defaults are the shipped tuning. `DataPlugin` may replace them from
//! `assets/data/balance.ron`; any field missing from that file keeps its default.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::Archetype;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Balance {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub bag: ArchetypeStats,
    pub butterfly: ArchetypeStats,
    pub dino: ArchetypeStats,
    pub boss: ArchetypeStats,
    pub behavior: BehaviorTuning,
    pub weapons: WeaponTuning,
    pub progression: ProgressionTuning,
    pub waves: WaveTuning,
}

impl Default for Balance {
    fn default() -> Self {
        Self {
            arena: ArenaTuning::default(),
            player: PlayerTuning::default(),
            bag: ArchetypeStats::minion(60.0),
            butterfly: ArchetypeStats::minion(300.0),
            dino: ArchetypeStats::minion(80.0),
            boss: ArchetypeStats {
                max_hp: 2000.0,
                contact_damage: 80.0,
                exp: 20,
                score: 2000,
                speed: 200.0,
            },
            behavior: BehaviorTuning::default(),
            weapons: WeaponTuning::default(),
            progression: ProgressionTuning::default(),
            waves: WaveTuning::default(),
        }
    }
}

impl Balance {
    pub fn stats(&self, archetype: Archetype) -> &ArchetypeStats {
        match archetype {
            Archetype::Bag => &self.bag,
            Archetype::Butterfly => &self.butterfly,
            Archetype::Dino => &self.dino,
            Archetype::Boss => &self.boss,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
    /// How far outside the arena a projectile may fly before it is culled.
    pub projectile_margin: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1920.0,
            projectile_margin: 800.0,
        }
    }
}

impl ArenaTuning {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub speed: f32,
    pub max_hp: f32,
    pub radius: f32,
    /// Drag pixels → velocity multiplier for touch movement.
    pub touch_speed: f32,
    pub heart_heal: f32,
    pub heart_drop_chance: f64,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            speed: 320.0,
            max_hp: 100.0,
            radius: 22.0,
            touch_speed: 40.0,
            heart_heal: 10.0,
            heart_drop_chance: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeStats {
    pub max_hp: f32,
    /// Damage per second while overlapping the player.
    pub contact_damage: f32,
    pub exp: u32,
    pub score: u64,
    /// Chase speed, or dash speed for the butterfly.
    pub speed: f32,
}

impl Default for ArchetypeStats {
    fn default() -> Self {
        Self::minion(60.0)
    }
}

impl ArchetypeStats {
    fn minion(speed: f32) -> Self {
        Self {
            max_hp: 100.0,
            contact_damage: 50.0,
            exp: 1,
            score: 100,
            speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorTuning {
    pub dizzy_secs: f32,
    /// Degrees per second while dizzy.
    pub dizzy_spin: f32,
    pub butterfly_idle_secs: f32,
    pub butterfly_drift: f32,
    /// How far past the player a dash ends.
    pub dash_overshoot: f32,
    pub dino_idle_secs: f32,
    pub dino_reload_secs: f32,
    pub dino_bullet_speed: f32,
    pub dino_band: f32,
    pub dino_range: f32,
    pub enemy_bullet_damage: f32,
    pub boss_phase_secs: f32,
    pub boss_ring_count: u32,
    pub boss_ring_speed: f32,
    pub boss_jitter: f32,
    pub boss_dash_multiplier: f32,
    /// `K` in `min(1, K / distance)` for positional sounds.
    pub sound_falloff: f32,
    /// Random detune range in cents, applied symmetrically.
    pub detune_cents: f32,
}

impl Default for BehaviorTuning {
    fn default() -> Self {
        Self {
            dizzy_secs: 2.0,
            dizzy_spin: 1000.0,
            butterfly_idle_secs: 2.0,
            butterfly_drift: 100.0,
            dash_overshoot: 100.0,
            dino_idle_secs: 1.0,
            dino_reload_secs: 1.0,
            dino_bullet_speed: 400.0,
            dino_band: 50.0,
            dino_range: 400.0,
            enemy_bullet_damage: 20.0,
            boss_phase_secs: 1.0,
            boss_ring_count: 20,
            boss_ring_speed: 800.0,
            boss_jitter: 5.0,
            boss_dash_multiplier: 3.0,
            sound_falloff: 320.0,
            detune_cents: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub sword_damage: f32,
    pub max_swords: u32,
    pub sword_orbit: f32,
    /// Degrees per second.
    pub sword_spin: f32,
    /// From this level on, extra levels spin faster instead of adding swords.
    pub sword_fast_level: u32,
    pub gun_damage: f32,
    pub gun_offset: f32,
    pub gun_interval: f32,
    /// From this level on, the gun fires every `1 / (level - 1)` seconds.
    pub gun_fast_level: u32,
    pub bullet_speed: f32,
    pub projectile_lifespan: f32,
    pub trumpet_interval: f32,
    pub trumpet_radius: f32,
    pub pulse_radius: f32,
    pub pulse_secs: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            sword_damage: 150.0,
            max_swords: 3,
            sword_orbit: 70.0,
            sword_spin: 60.0,
            sword_fast_level: 4,
            gun_damage: 100.0,
            gun_offset: 60.0,
            gun_interval: 1.0,
            gun_fast_level: 3,
            bullet_speed: 800.0,
            projectile_lifespan: 10.0,
            trumpet_interval: 3.0,
            trumpet_radius: 240.0,
            pulse_radius: 300.0,
            pulse_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTuning {
    pub exp_initial: u32,
    pub exp_step: u32,
    pub boss_mark: u64,
    /// First advance of the boss mark.
    pub boss_step: u64,
    /// Added to the advance every time a boss is triggered.
    pub boss_step_growth: u64,
}

impl Default for ProgressionTuning {
    fn default() -> Self {
        Self {
            exp_initial: 10,
            exp_step: 5,
            boss_mark: 3000,
            boss_step: 5000,
            boss_step_growth: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub spawn_interval: f32,
    /// Half-width of the square around the player where minions appear.
    pub spawn_radius: f32,
    pub warning_secs: f32,
    pub reveal_secs: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            spawn_interval: 0.5,
            spawn_radius: 400.0,
            warning_secs: 2.0,
            reveal_secs: 1.0,
        }
    }
}
