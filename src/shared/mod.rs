//! Shared components, resources, events, and states for the arena.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

mod balance;

pub use balance::*;
pub use crate::fsm::{Segment, StateMachine};

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE: top-level flow
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Paused,
    /// Experience wrapped; gameplay is frozen until a weapon is chosen.
    UpgradeChoice,
    GameOver,
}

/// Frame pipeline. `Requests` and `Resets` run in every state, the rest only
/// while `GameState::Playing`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArenaSet {
    Requests,
    Resets,
    Intent,
    Director,
    Behavior,
    Motion,
    Contacts,
    Damage,
    /// Kill rewards; sees every death of the frame before `Aftermath`.
    Scoring,
    Aftermath,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Default)]
pub struct Player;

/// Continuous intents written by whatever owns the input hardware.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Normalized directional intent.
    pub move_axis: Vec2,
    /// Finger drag since last frame, in screen pixels.
    pub drag: Vec2,
}

/// Hit points for the player and every enemy.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current).max(0.0);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        (self.current / self.maximum).clamp(0.0, 1.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ENEMIES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Bag,
    Butterfly,
    Dino,
    Boss,
}

impl Archetype {
    /// Archetypes the wave director picks from.
    pub const MINIONS: [Archetype; 3] = [Archetype::Bag, Archetype::Butterfly, Archetype::Dino];

    pub fn is_boss(self) -> bool {
        self == Archetype::Boss
    }

    pub fn initial_state(self) -> EnemyState {
        match self {
            Archetype::Bag => EnemyState::Move,
            Archetype::Butterfly | Archetype::Dino | Archetype::Boss => EnemyState::Idle,
        }
    }

    /// Whether this archetype's machine defines `state`.
    pub fn allows(self, state: EnemyState) -> bool {
        use EnemyState::*;
        match self {
            Archetype::Bag => matches!(state, Move | Dizzy),
            Archetype::Butterfly => matches!(state, Idle | Attack | Dizzy),
            Archetype::Dino => matches!(state, Idle | Attack | Move | Dizzy),
            Archetype::Boss => matches!(state, Idle | Charge1 | Attack1 | Charge2 | Attack2 | Move),
        }
    }

    /// Where a dizzy enemy goes once it recovers.
    pub fn dizzy_recovery(self) -> EnemyState {
        match self {
            Archetype::Bag => EnemyState::Move,
            _ => EnemyState::Idle,
        }
    }
}

/// Union of every archetype's states; `Archetype::allows` narrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    Idle,
    Move,
    Attack,
    Dizzy,
    Charge1,
    Attack1,
    Charge2,
    Attack2,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub archetype: Archetype,
    /// Damage per second of sustained contact with the player.
    pub contact_damage: f32,
    pub exp: u32,
    pub score: u64,
}

/// Every non-boss enemy. Boss encounters suspend and then clear these.
#[derive(Component, Debug, Default)]
pub struct Minion;

/// Frozen by a boss encounter: no behavior ticks, still collides.
#[derive(Component, Debug, Default)]
pub struct Suspended;

/// "!" marker shown over suspended minions.
#[derive(Component, Debug, Default)]
pub struct AlertMarker;

/// Per-enemy kinematic state that behavior hooks write and rendering reads.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct EnemyMotion {
    /// Degrees; non-zero only while dizzy.
    pub spin: f32,
    pub facing_left: bool,
    pub dash: Option<Dash>,
}

/// An eased move from `from` to `to` over `duration` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub from: Vec2,
    pub to: Vec2,
    pub duration: f32,
}

impl Dash {
    /// Position after `elapsed` seconds and whether the dash has finished.
    pub fn sample(&self, elapsed: f32) -> (Vec2, bool) {
        if self.duration <= f32::EPSILON || elapsed >= self.duration {
            return (self.to, true);
        }
        let t = ease_out_quad(elapsed / self.duration);
        (self.from.lerp(self.to, t), false)
    }
}

/// Telegraph lines for the current state, rebuilt every frame.
#[derive(Component, Debug, Clone, Default)]
pub struct Telegraph {
    pub segments: Vec<Segment>,
}

/// Child of the boss showing its remaining health.
#[derive(Component, Debug, Clone, Copy)]
pub struct BossHealthBar {
    pub width: f32,
    pub full_width: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// COLLISION & PROJECTILES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Axis-aligned box.
    Rect { half: Vec2 },
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Hitbox(pub Shape);

impl Hitbox {
    pub fn circle(radius: f32) -> Self {
        Self(Shape::Circle { radius })
    }

    pub fn rect(width: f32, height: f32) -> Self {
        Self(Shape::Rect {
            half: Vec2::new(width, height) * 0.5,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    /// Player bullets ("bullet").
    Friendly,
    /// Enemy bullets ("enemybullet").
    Hostile,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub faction: Faction,
    pub damage: f32,
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity(pub Vec2);

/// Despawns the entity once the timer finishes.
#[derive(Component, Debug)]
pub struct Lifespan(pub Timer);

impl Lifespan {
    pub fn secs(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}

/// Components for a projectile fired from `origin`.
pub fn projectile_bundle(
    faction: Faction,
    damage: f32,
    origin: Vec2,
    velocity: Vec2,
    hitbox: Hitbox,
    lifespan: f32,
) -> impl Bundle {
    (
        Projectile { faction, damage },
        Velocity(velocity),
        hitbox,
        Lifespan::secs(lifespan),
        Transform::from_translation(origin.extend(2.0)),
    )
}

/// Healing pickup dropped by enemies.
#[derive(Component, Debug, Default)]
pub struct Heart;

// ═══════════════════════════════════════════════════════════════════════
// WEAPONS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Sword,
    Gun,
    Trumpet,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 3] = [WeaponKind::Sword, WeaponKind::Gun, WeaponKind::Trumpet];

    pub fn label(self) -> &'static str {
        match self {
            WeaponKind::Sword => "sword",
            WeaponKind::Gun => "gun",
            WeaponKind::Trumpet => "trumpet",
        }
    }
}

/// Player weapon levels. Only the upgrade prompt mutates them mid-session.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponLevels {
    pub sword: u32,
    pub gun: u32,
    pub trumpet: u32,
}

impl Default for WeaponLevels {
    fn default() -> Self {
        Self {
            sword: 1,
            gun: 0,
            trumpet: 0,
        }
    }
}

impl WeaponLevels {
    pub fn get(&self, kind: WeaponKind) -> u32 {
        match kind {
            WeaponKind::Sword => self.sword,
            WeaponKind::Gun => self.gun,
            WeaponKind::Trumpet => self.trumpet,
        }
    }

    /// Returns the new level.
    pub fn level_up(&mut self, kind: WeaponKind) -> u32 {
        let slot = match kind {
            WeaponKind::Sword => &mut self.sword,
            WeaponKind::Gun => &mut self.gun,
            WeaponKind::Trumpet => &mut self.trumpet,
        };
        *slot += 1;
        *slot
    }
}

/// Parent of all instances of one weapon kind, itself a child of the player.
#[derive(Component, Debug, Clone, Copy)]
pub struct WeaponMount {
    pub kind: WeaponKind,
}

/// An orbiting sword. Damages enemies once per contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct SwordBlade {
    pub damage: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════

/// Score, experience and boss escalation for one play session.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Progression {
    score: u64,
    exp: u32,
    exp_to_next: u32,
    boss_mark: u64,
    boss_step: u64,
    pending_upgrades: u32,
}

/// What a single kill set in motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KillOutcome {
    pub boss_triggered: bool,
    pub upgrade_prompt: bool,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(&ProgressionTuning::default())
    }
}

impl Progression {
    pub fn new(tuning: &ProgressionTuning) -> Self {
        Self {
            score: 0,
            exp: 0,
            exp_to_next: tuning.exp_initial,
            boss_mark: tuning.boss_mark,
            boss_step: tuning.boss_step,
            pending_upgrades: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn exp_to_next(&self) -> u32 {
        self.exp_to_next
    }

    pub fn exp_fraction(&self) -> f32 {
        if self.exp_to_next == 0 {
            return 0.0;
        }
        (self.exp as f32 / self.exp_to_next as f32).min(1.0)
    }

    pub fn boss_mark(&self) -> u64 {
        self.boss_mark
    }

    pub fn pending_upgrades(&self) -> u32 {
        self.pending_upgrades
    }

    /// Credits one kill. At most one experience wrap happens per kill.
    pub fn award_kill(&mut self, score: u64, exp: u32, tuning: &ProgressionTuning) -> KillOutcome {
        let mut outcome = KillOutcome::default();

        self.score += score;
        if self.score >= self.boss_mark {
            self.boss_mark += self.boss_step;
            self.boss_step += tuning.boss_step_growth;
            outcome.boss_triggered = true;
        }

        self.exp += exp;
        if self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.exp_to_next += tuning.exp_step;
            self.pending_upgrades += 1;
            outcome.upgrade_prompt = true;
        }

        outcome
    }

    /// Consumes one queued prompt; returns whether more remain.
    pub fn resolve_upgrade(&mut self) -> bool {
        self.pending_upgrades = self.pending_upgrades.saturating_sub(1);
        self.pending_upgrades > 0
    }
}

/// Boss encounter timeline. At most one encounter is active at a time.
#[derive(Resource, Debug, Default)]
pub struct BossEncounter {
    pub phase: EncounterPhase,
}

#[derive(Debug, Default)]
pub enum EncounterPhase {
    #[default]
    Dormant,
    /// Minions are frozen under alert markers.
    Warning(Timer),
    /// Minions are gone, the boss is about to appear.
    Reveal(Timer),
    Fighting,
}

impl BossEncounter {
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, EncounterPhase::Dormant)
    }
}

/// Periodic minion spawner.
#[derive(Resource, Debug)]
pub struct WaveDirector {
    pub timer: Timer,
    pub enabled: bool,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self::new(WaveTuning::default().spawn_interval)
    }
}

impl WaveDirector {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            enabled: true,
        }
    }
}

/// Source of all gameplay randomness.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyKilledEvent {
    pub entity: Entity,
    pub archetype: Archetype,
    pub position: Vec2,
    pub exp: u32,
    pub score: u64,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDiedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKind {
    PlayerEnemy,
    PlayerEnemyBullet,
    PlayerHeart,
    SwordEnemy,
    BulletEnemy,
}

/// One overlapping pair this frame. `started` marks collision-enter.
#[derive(Event, Debug, Clone, Copy)]
pub struct ContactEvent {
    pub kind: ContactKind,
    pub first: Entity,
    pub second: Entity,
    pub started: bool,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct StartEncounterEvent;

#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnEnemyEvent {
    pub archetype: Archetype,
    pub position: Vec2,
}

/// Tear down and recreate every instance of one weapon kind.
#[derive(Event, Debug, Clone, Copy)]
pub struct RebuildLoadoutEvent(pub WeaponKind);

#[derive(Event, Debug, Clone, Copy)]
pub struct UpgradeChosenEvent(pub WeaponKind);

#[derive(Event, Debug, Clone, Copy)]
pub struct TogglePauseEvent;

#[derive(Event, Debug, Clone, Copy)]
pub struct RestartRequestEvent;

/// Broadcast once a restart has been accepted; every domain resets itself.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionRestartEvent;

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
    pub volume: f32,
    /// Pitch offset in cents.
    pub detune: f32,
}

impl PlaySfxEvent {
    pub fn new(sfx_id: &str) -> Self {
        Self {
            sfx_id: sfx_id.to_string(),
            volume: 1.0,
            detune: 0.0,
        }
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_detune(mut self, detune: f32) -> Self {
        self.detune = detune;
        self
    }
}

#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}

/// Starts or pauses the looping "alarm" heard while an enemy touches the player.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HurtAlarmEvent {
    pub sounding: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxKind {
    /// Celebratory burst on a kill or a cleared minion.
    Kaboom,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct FxEvent {
    pub kind: FxKind,
    pub position: Vec2,
}

// ═══════════════════════════════════════════════════════════════════════
// HELPERS
// ═══════════════════════════════════════════════════════════════════════

/// `min(1, k / distance)`; full volume when on top of the listener.
pub fn falloff_volume(k: f32, distance: f32) -> f32 {
    if distance <= f32::EPSILON {
        return 1.0;
    }
    (k / distance).min(1.0)
}

pub fn ease_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}
