/// Game entity types.  Pure data, no logic.
///
/// Behaviour lives next to the subsystem that owns it: `player` for the
/// player's own rules, `ai` for enemies, `hazards` for platforms and traps,
/// `compute` for the session.

use crate::hazards::Oscillator;
use crate::levelgen::LevelGenerator;
use crate::particles::ParticlePool;
use crate::physics::{Body, CollisionMode, Rect};

// ── Top-level state ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
}

/// Something worth reacting to that happened during the last frame.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Jumped,
    PlayerDamaged { amount: i32 },
    PlayerDied,
    EnemyKilled { kind: EnemyKind, x: f32, y: f32 },
    ItemCollected { kind: ItemKind, value: u32 },
    PlatformBroke { x: f32, y: f32 },
    ProjectileFired,
    LevelComplete { level: u32 },
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    /// May drop below zero; any value ≤ 0 means dead.
    pub health: i32,
    pub max_health: i32,
    pub grounded: bool,
    pub jumps_remaining: u32,
    pub invulnerable_timer: u32,
    /// Horizontal speed multiplier, 1.0 unless a CodeBoost is running.
    pub speed_boost: f32,
    pub speed_boost_timer: u32,
    /// Ticks left on the JumpExtension power-up (one extra air jump).
    pub extra_jump_timer: u32,
    pub facing_right: bool,
    /// While non-zero, held keys do not steer; a knockback is in progress.
    pub knockback_timer: u32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Flyer that homes in on the player, lagging vertically.
    SyntaxError,
    /// Walker that pursues horizontally and hops up ledges.
    RuntimeBug,
    /// Slow flyer that keeps its distance and shoots.
    LogicVirus,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyState {
    Patrol,
    Chase,
    /// Set on the tick an attack fires.
    Attack,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    pub kind: EnemyKind,
    pub state: EnemyState,
    pub health: i32,
    /// Patrol heading, −1.0 or +1.0.
    pub direction: f32,
    pub patrol_timer: u32,
    pub origin_x: f32,
    pub attack_cooldown: u32,
    /// Only walkers hop; flyers carry `None`.
    pub hop_cooldown: Option<u32>,
    pub grounded: bool,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Body,
    pub damage: i32,
    pub lifetime: u32,
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    /// Temporary invulnerability.
    DebugPotion,
    /// Temporary horizontal speed boost.
    CodeBoost,
    /// +1 max health, +1 health.
    MemoryUpgrade,
    /// Temporary extra air jump.
    JumpExtension,
    /// Heals one point, never above max health.
    HealthPack,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub rect: Rect,
    pub kind: ItemKind,
}

// ── Platforms ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum PlatformKind {
    Normal,
    Moving(Oscillator),
    Breakable {
        /// Counts down to destruction once armed; zero while idle.
        break_timer: u32,
        destroyed: bool,
    },
    /// Looks like `Normal` until stepped on.
    Fake {
        delay: u32,
        triggered: bool,
        falling: bool,
        fall_speed: f32,
    },
}

#[derive(Clone, Debug)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

// ── Traps ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum TrapKind {
    Spike,
    FakePlatform { triggered: bool },
    MovingSaw { angle: f32, motion: Oscillator },
}

#[derive(Clone, Debug)]
pub struct Trap {
    pub rect: Rect,
    pub kind: TrapKind,
    pub active: bool,
    pub damage: i32,
}

// ── Level & session ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Level {
    pub number: u32,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<Item>,
    pub traps: Vec<Trap>,
}

/// Movement keys currently held.  One-shot keys go through `compute::Command`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldInput {
    pub left: bool,
    pub right: bool,
}

/// The entire game state.  Cloneable so the update functions in `compute`
/// can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub level: Level,
    pub projectiles: Vec<Projectile>,
    pub particles: ParticlePool,
    pub status: GameStatus,
    pub score: u32,
    pub frame: u64,
    /// Events produced by the most recent tick or command.
    pub events: Vec<GameEvent>,
    pub generator: LevelGenerator,
    pub collision: CollisionMode,
    pub start_level: u32,
}
