use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use crate::fsm::{Descriptor, StateContext, StateHooks};
use crate::shared::*;

use super::{bag, boss, butterfly, dino, dizzy};

/// Side effects requested by behavior hooks, applied by the driving system.
#[derive(Debug, Clone)]
pub enum Effect {
    Fire {
        origin: Vec2,
        velocity: Vec2,
        damage: f32,
        hitbox: Hitbox,
    },
    Sound(PlaySfxEvent),
}

/// Everything one enemy's hooks may read or write during a tick.
pub struct Actor<'a> {
    pub archetype: Archetype,
    pub machine: &'a mut StateMachine<EnemyState>,
    pub motion: &'a mut EnemyMotion,
    pub pos: Vec2,
    pub player: Vec2,
    pub dt: f32,
    pub stats: &'a ArchetypeStats,
    pub tuning: &'a BehaviorTuning,
    pub rng: &'a mut StdRng,
    pub effects: &'a mut Vec<Effect>,
}

impl StateContext for Actor<'_> {
    type State = EnemyState;

    fn machine(&mut self) -> &mut StateMachine<EnemyState> {
        &mut *self.machine
    }
}

impl Actor<'_> {
    /// Unit vector toward the player, zero when on top of it.
    pub fn to_player(&self) -> Vec2 {
        (self.player - self.pos).normalize_or_zero()
    }

    pub fn distance_to_player(&self) -> f32 {
        self.pos.distance(self.player)
    }

    pub fn step_toward_player(&mut self, speed: f32) {
        self.pos += self.to_player() * speed * self.dt;
    }

    pub fn wait_then(&mut self, secs: f32, next: EnemyState) {
        self.machine.wait_then(secs, next);
    }

    pub fn random_detune(&mut self) -> f32 {
        let cents = self.tuning.detune_cents;
        self.rng.gen_range(-cents..=cents)
    }

    /// A detuned sound that fades with distance from the player.
    pub fn positional_sound(&mut self, sfx_id: &str) {
        let volume = falloff_volume(self.tuning.sound_falloff, self.distance_to_player());
        let detune = self.random_detune();
        self.effects.push(Effect::Sound(
            PlaySfxEvent::new(sfx_id)
                .with_volume(volume)
                .with_detune(detune),
        ));
    }

    pub fn sound(&mut self, sfx: PlaySfxEvent) {
        self.effects.push(Effect::Sound(sfx));
    }

    pub fn fire(&mut self, origin: Vec2, velocity: Vec2, hitbox: Hitbox) {
        self.effects.push(Effect::Fire {
            origin,
            velocity,
            damage: self.tuning.enemy_bullet_damage,
            hitbox,
        });
    }

    /// Dash to a point just past the player. The duration comes from the
    /// distance to the player, so the overshoot makes the end of the dash fast.
    pub fn begin_dash(&mut self, speed: f32) {
        let to = self.player + self.to_player() * self.tuning.dash_overshoot;
        let duration = if speed > 0.0 {
            self.distance_to_player() / speed
        } else {
            0.0
        };
        self.motion.dash = Some(Dash {
            from: self.pos,
            to,
            duration,
        });
    }

    /// Follows the active dash; `Some(next)` once it has landed.
    pub fn follow_dash(&mut self, next: EnemyState) -> Option<EnemyState> {
        let dash = self.motion.dash?;
        let (pos, done) = dash.sample(self.machine.elapsed());
        self.pos = pos;
        done.then_some(next)
    }

    pub fn end_dash(&mut self) {
        self.motion.dash = None;
    }
}

impl<'a> Descriptor<Actor<'a>> for Archetype {
    fn allows(&self, state: EnemyState) -> bool {
        Archetype::allows(*self, state)
    }

    fn hooks(&self, state: EnemyState) -> StateHooks<Actor<'a>> {
        if state == EnemyState::Dizzy {
            return dizzy::hooks();
        }
        match self {
            Archetype::Bag => bag::hooks(state),
            Archetype::Butterfly => butterfly::hooks(state),
            Archetype::Dino => dino::hooks(state),
            Archetype::Boss => boss::hooks(state),
        }
    }

    fn ambient(&self, actor: &mut Actor<'a>) {
        if *self == Archetype::Dino {
            dino::face_player(actor);
        }
    }
}
