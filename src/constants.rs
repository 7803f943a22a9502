/// World and tuning constants.  All speeds are in world units per tick.

// ── World ─────────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 1024.0;
pub const WORLD_HEIGHT: f32 = 768.0;
pub const TICKS_PER_SECOND: u32 = 60;

pub const GRAVITY: f32 = 0.8;
pub const TERMINAL_VELOCITY: f32 = 20.0;

/// Highest level a game may start from; level counts grow linearly.
pub const MAX_START_LEVEL: u32 = 99;

// ── Player ────────────────────────────────────────────────────────────────────

pub const PLAYER_WIDTH: f32 = 30.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_SPAWN: (f32, f32) = (100.0, 300.0);
pub const MOVE_SPEED: f32 = 5.0;
pub const JUMP_STRENGTH: f32 = -15.0;
pub const AIR_JUMP_STRENGTH: f32 = -12.0;
pub const STOMP_BOUNCE: f32 = -10.0;
pub const MAX_HEALTH: i32 = 3;
pub const MAX_JUMPS: u32 = 2;
/// Ticks of invulnerability after taking a hit (2 s).
pub const HIT_INVULNERABILITY: u32 = 120;

/// Damage large enough to kill from any health level.
pub const INSTANT_DEATH: i32 = 999;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const DEBUG_POTION_TICKS: u32 = 300;
pub const SPEED_BOOST_TICKS: u32 = 600;
pub const SPEED_BOOST_FACTOR: f32 = 1.5;
pub const JUMP_EXTENSION_TICKS: u32 = 900;

// ── Enemies & projectiles ─────────────────────────────────────────────────────

pub const PATROL_FLIP_TICKS: u32 = 60;
pub const PATROL_EDGE_MARGIN: f32 = 50.0;
pub const PATROL_RANGE: f32 = 150.0;
pub const MELEE_RANGE: f32 = 40.0;
pub const RANGED_RANGE: f32 = 250.0;
pub const ATTACK_COOLDOWN: u32 = 60;
pub const HOP_COOLDOWN: u32 = 30;
pub const HOP_STRENGTH: f32 = -8.0;
pub const HOP_TRIGGER_HEIGHT: f32 = 50.0;
pub const KILL_SCORE: u32 = 50;

pub const PROJECTILE_SPEED: f32 = 5.0;
pub const PROJECTILE_SIZE: f32 = 8.0;
pub const PROJECTILE_LIFETIME: u32 = 120;

// ── Platforms & traps ─────────────────────────────────────────────────────────

pub const BREAK_DELAY: u32 = 30;
pub const FAKE_PLATFORM_DELAY: u32 = 30;
pub const FAKE_FALL_ACCEL: f32 = 0.5;
pub const SPIKE_KNOCKBACK_X: f32 = 5.0;
/// Ticks during which knockback owns horizontal velocity.
pub const KNOCKBACK_TICKS: u32 = 10;
/// Spike knockback lifts the player at 80 % of a normal jump.
pub const SPIKE_KNOCKBACK_Y: f32 = JUMP_STRENGTH * 0.8;
pub const SAW_SPIN_PER_TICK: f32 = 10.0;

// ── Particles ─────────────────────────────────────────────────────────────────

pub const PARTICLE_GRAVITY: f32 = 0.3;
pub const MAX_PARTICLES: usize = 512;
