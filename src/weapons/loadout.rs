//! What each weapon level looks like, independent of any entities.

use crate::shared::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instance {
    /// A sword at `angle` degrees around the player.
    Blade { angle: f32 },
    /// A gun on the right (`1.0`) or left (`-1.0`) of the player.
    Gun { side: f32 },
    Trumpet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadoutPlan {
    pub instances: Vec<Instance>,
    /// Sword orbit speed in degrees per second.
    pub spin: f32,
    /// Seconds between shots or pulses.
    pub cadence: Option<f32>,
}

impl LoadoutPlan {
    fn empty() -> Self {
        Self {
            instances: Vec::new(),
            spin: 0.0,
            cadence: None,
        }
    }
}

pub fn plan(kind: WeaponKind, level: u32, tuning: &WeaponTuning) -> LoadoutPlan {
    if level == 0 {
        return LoadoutPlan::empty();
    }
    match kind {
        WeaponKind::Sword => {
            let count = level.min(tuning.max_swords.max(1));
            let interval = 360.0 / count as f32;
            let spin = if level >= tuning.sword_fast_level {
                tuning.sword_spin * (level + 2 - tuning.sword_fast_level) as f32
            } else {
                tuning.sword_spin
            };
            LoadoutPlan {
                instances: (0..count)
                    .map(|i| Instance::Blade {
                        angle: i as f32 * interval,
                    })
                    .collect(),
                spin,
                cadence: None,
            }
        }
        WeaponKind::Gun => {
            let mut instances = vec![Instance::Gun { side: 1.0 }];
            if level >= 2 {
                instances.push(Instance::Gun { side: -1.0 });
            }
            let cadence = if level >= tuning.gun_fast_level {
                tuning.gun_interval / (level + 2 - tuning.gun_fast_level) as f32
            } else {
                tuning.gun_interval
            };
            LoadoutPlan {
                instances,
                spin: 0.0,
                cadence: Some(cadence),
            }
        }
        WeaponKind::Trumpet => LoadoutPlan {
            instances: vec![Instance::Trumpet],
            spin: 0.0,
            cadence: Some(tuning.trumpet_interval),
        },
    }
}
