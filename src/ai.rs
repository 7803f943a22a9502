/// Enemy behaviour: a patrol/chase state machine driven by distance to the
/// player, per-kind movement, and cooldown-gated attacks.

use rand::Rng;

use crate::constants::{
    ATTACK_COOLDOWN, HOP_COOLDOWN, HOP_STRENGTH, HOP_TRIGGER_HEIGHT, MELEE_RANGE,
    PATROL_EDGE_MARGIN, PATROL_FLIP_TICKS, PATROL_RANGE, PROJECTILE_LIFETIME,
    PROJECTILE_SIZE, PROJECTILE_SPEED, RANGED_RANGE, WORLD_WIDTH,
};
use crate::entities::{Enemy, EnemyKind, EnemyState, Player, Projectile};
use crate::physics::{self, distance, Body, CollisionMode, Solid};

// ── Per-kind tables ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    /// Ignores gravity; chases in 2D with the vertical step scaled down.
    Flyer { vertical_lag: f32 },
    /// Ignores gravity; chases horizontally only at `factor` × speed.
    Hover { factor: f32 },
    /// Falls, lands on platforms and hops toward a higher player.
    Walker,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStyle {
    /// Direct damage within `range`.
    Melee,
    /// Fires a projectile within `range`.
    Ranged,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub size: f32,
    pub speed: f32,
    pub health: i32,
    pub damage: i32,
    pub detection_range: f32,
    pub movement: Movement,
    pub attack: AttackStyle,
    pub attack_range: f32,
    pub attack_cooldown: u32,
}

pub fn stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::SyntaxError => EnemyStats {
            size: 35.0,
            speed: 2.0,
            health: 1,
            damage: 1,
            detection_range: 150.0,
            movement: Movement::Flyer { vertical_lag: 0.5 },
            attack: AttackStyle::Melee,
            attack_range: MELEE_RANGE,
            attack_cooldown: ATTACK_COOLDOWN,
        },
        EnemyKind::RuntimeBug => EnemyStats {
            size: 30.0,
            speed: 3.0,
            health: 2,
            damage: 1,
            detection_range: 200.0,
            movement: Movement::Walker,
            attack: AttackStyle::Melee,
            attack_range: MELEE_RANGE,
            attack_cooldown: ATTACK_COOLDOWN,
        },
        EnemyKind::LogicVirus => EnemyStats {
            size: 25.0,
            speed: 1.5,
            health: 1,
            damage: 2,
            detection_range: 300.0,
            movement: Movement::Hover { factor: 0.5 },
            attack: AttackStyle::Ranged,
            attack_range: RANGED_RANGE,
            attack_cooldown: ATTACK_COOLDOWN,
        },
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

impl Enemy {
    pub fn spawn(x: f32, y: f32, kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let s = stats(kind);
        Self {
            body: Body::new(x, y, s.size, s.size),
            kind,
            state: EnemyState::Patrol,
            health: s.health,
            direction: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            patrol_timer: 0,
            origin_x: x,
            attack_cooldown: 0,
            hop_cooldown: matches!(s.movement, Movement::Walker).then_some(0),
            grounded: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Returns `true` if this hit killed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health -= amount;
        self.is_dead()
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// `Chase` inside the detection radius, `Patrol` outside it.
pub fn sense(enemy: &Enemy, player: &Player) -> EnemyState {
    let d = distance(enemy.body.position(), player.body.position());
    if d < stats(enemy.kind).detection_range {
        EnemyState::Chase
    } else {
        EnemyState::Patrol
    }
}

/// One AI tick: cool down, pick a state, move.
pub fn update(enemy: &mut Enemy, player: &Player, solids: &[Solid], mode: CollisionMode) {
    let s = stats(enemy.kind);

    enemy.attack_cooldown = enemy.attack_cooldown.saturating_sub(1);
    if let Some(hop) = enemy.hop_cooldown.as_mut() {
        *hop = hop.saturating_sub(1);
    }

    enemy.state = sense(enemy, player);
    match enemy.state {
        EnemyState::Chase => chase(enemy, player, &s),
        EnemyState::Patrol | EnemyState::Attack => patrol(enemy, &s),
    }

    if s.movement == Movement::Walker {
        let contact = physics::step(&mut enemy.body, solids, mode);
        enemy.grounded = contact.grounded;
        if contact.out_of_world {
            enemy.health = 0;
        }
    }

    enemy.body.x = enemy.body.x.clamp(0.0, WORLD_WIDTH - enemy.body.width);
}

fn patrol(enemy: &mut Enemy, s: &EnemyStats) {
    enemy.patrol_timer += 1;

    let x = enemy.body.x;
    if x < PATROL_EDGE_MARGIN {
        enemy.direction = 1.0;
        enemy.patrol_timer = 0;
    } else if x > WORLD_WIDTH - PATROL_EDGE_MARGIN {
        enemy.direction = -1.0;
        enemy.patrol_timer = 0;
    } else if (x - enemy.origin_x).abs() > PATROL_RANGE {
        enemy.direction = (enemy.origin_x - x).signum();
        enemy.patrol_timer = 0;
    } else if enemy.patrol_timer > PATROL_FLIP_TICKS {
        enemy.direction = -enemy.direction;
        enemy.patrol_timer = 0;
    }

    let step = s.speed * enemy.direction;
    match s.movement {
        Movement::Walker => enemy.body.vx = step,
        Movement::Flyer { .. } | Movement::Hover { .. } => enemy.body.x += step,
    }
}

fn chase(enemy: &mut Enemy, player: &Player, s: &EnemyStats) {
    let dx = player.body.x - enemy.body.x;
    let dy = player.body.y - enemy.body.y;
    let d = (dx * dx + dy * dy).sqrt();
    if d == 0.0 {
        enemy.body.vx = 0.0;
        return;
    }

    match s.movement {
        Movement::Flyer { vertical_lag } => {
            enemy.body.x += dx / d * s.speed;
            enemy.body.y += dy / d * s.speed * vertical_lag;
        }
        Movement::Hover { factor } => {
            enemy.body.x += dx / d * s.speed * factor;
        }
        Movement::Walker => {
            enemy.body.vx = if d > MELEE_RANGE { dx / d * s.speed } else { 0.0 };
            if enemy.grounded && dy < -HOP_TRIGGER_HEIGHT && enemy.hop_cooldown == Some(0) {
                enemy.body.vy = HOP_STRENGTH;
                enemy.hop_cooldown = Some(HOP_COOLDOWN);
            }
        }
    }
}

// ── Attacks ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum Attack {
    Melee { damage: i32 },
    Shot(Projectile),
}

/// Fire if the cooldown has elapsed and the player is within range.
pub fn try_attack(enemy: &mut Enemy, player: &Player) -> Option<Attack> {
    if enemy.attack_cooldown > 0 {
        return None;
    }
    let s = stats(enemy.kind);
    let d = distance(enemy.body.position(), player.body.position());
    if d >= s.attack_range {
        return None;
    }

    enemy.attack_cooldown = s.attack_cooldown;
    enemy.state = EnemyState::Attack;
    Some(match s.attack {
        AttackStyle::Melee => Attack::Melee { damage: s.damage },
        AttackStyle::Ranged => {
            Attack::Shot(Projectile::aimed(enemy.body.center(), player.body.center(), s.damage))
        }
    })
}

impl Projectile {
    /// Straight-line shot from `from` toward where `to` is now.
    pub fn aimed(from: (f32, f32), to: (f32, f32), damage: i32) -> Self {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let d = (dx * dx + dy * dy).sqrt();
        let (vx, vy) = if d > 0.0 {
            (dx / d * PROJECTILE_SPEED, dy / d * PROJECTILE_SPEED)
        } else {
            (0.0, 0.0)
        };
        let mut body = Body::new(from.0, from.1, PROJECTILE_SIZE, PROJECTILE_SIZE);
        body.vx = vx;
        body.vy = vy;
        Self { body, damage, lifetime: PROJECTILE_LIFETIME }
    }
}
