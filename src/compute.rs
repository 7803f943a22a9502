/// Session-level game logic: the top-level state machine and the per-frame
/// update.
///
/// Every public function takes an immutable reference to the current
/// `GameSession` (and, where needed, an RNG handle) and returns a brand-new
/// `GameSession`.  Side effects are limited to the injected RNG, so a seeded
/// RNG makes a whole run reproducible in tests.

use log::{debug, info, trace};
use rand::Rng;

use crate::ai::{self, Attack};
use crate::constants::{KILL_SCORE, MAX_START_LEVEL, STOMP_BOUNCE, WORLD_HEIGHT, WORLD_WIDTH};
use crate::entities::{
    GameEvent, GameSession, GameStatus, HeldInput, Item, ItemKind, Level, Player,
};
use crate::levelgen::LevelGenerator;
use crate::particles::{ParticlePool, ParticleTint};
use crate::physics::{self, CollisionMode, Solid};

/// One-shot player intents.  Held movement keys travel in `HeldInput`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start from the menu, resume from pause, retry after game over,
    /// advance after a completed level.
    Confirm,
    Jump,
    /// Toggle between playing and paused.
    Pause,
    /// Pause while playing, otherwise return to the menu.
    Back,
    Restart,
}

/// Score awarded for picking up an item.
pub fn item_value(kind: ItemKind) -> u32 {
    match kind {
        ItemKind::DebugPotion => 100,
        ItemKind::CodeBoost => 150,
        ItemKind::MemoryUpgrade => 200,
        ItemKind::JumpExtension => 150,
        ItemKind::HealthPack => 75,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh session sitting in the menu.
pub fn init_state(start_level: u32, collision: CollisionMode) -> GameSession {
    let start_level = start_level.clamp(1, MAX_START_LEVEL);
    GameSession {
        player: Player::spawn(),
        level: Level {
            number: start_level,
            platforms: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            traps: Vec::new(),
        },
        projectiles: Vec::new(),
        particles: ParticlePool::default(),
        status: GameStatus::Menu,
        score: 0,
        frame: 0,
        events: Vec::new(),
        generator: LevelGenerator::default(),
        collision,
        start_level,
    }
}

/// Replace the session wholesale with level `start_level`, score zero.
pub fn new_game(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    info!("new game from level {}", state.start_level);
    let fresh = init_state(state.start_level, state.collision);
    start_level(&fresh, state.start_level, rng)
}

/// Build level `number` around a freshly spawned player, keeping the score.
pub fn start_level(state: &GameSession, number: u32, rng: &mut impl Rng) -> GameSession {
    let mut generator = state.generator.clone();
    let level = generator.generate(number, rng);
    GameSession {
        player: Player::spawn(),
        level,
        projectiles: Vec::new(),
        particles: ParticlePool::default(),
        status: GameStatus::Playing,
        events: Vec::new(),
        generator,
        ..state.clone()
    }
}

pub fn next_level(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    start_level(state, state.level.number.saturating_add(1), rng)
}

// ── Input-driven state transitions ──────────────────────────────────────────

pub fn apply_command(state: &GameSession, command: Command, rng: &mut impl Rng) -> GameSession {
    use GameStatus::*;

    let next = match (state.status, command) {
        (Menu, Command::Confirm) => new_game(state, rng),
        (Playing, Command::Jump) => return jump(state, rng),
        (Playing, Command::Pause | Command::Back) => with_status(state, Paused),
        (Paused, Command::Pause | Command::Confirm) => with_status(state, Playing),
        (Paused | GameOver | LevelComplete, Command::Back) => with_status(state, Menu),
        (Playing | Paused | GameOver, Command::Restart) => new_game(state, rng),
        (GameOver, Command::Confirm) => new_game(state, rng),
        (LevelComplete, Command::Confirm) => next_level(state, rng),
        _ => return state.clone(),
    };
    debug!("{:?} + {:?} -> {:?}", state.status, command, next.status);
    next
}

fn with_status(state: &GameSession, status: GameStatus) -> GameSession {
    GameSession { status, ..state.clone() }
}

fn jump(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    let mut next = state.clone();
    if next.player.jump() {
        let b = next.player.body;
        next.particles.jump_puff(rng, (b.x + b.width / 2.0, b.y + b.height));
        next.events.push(GameEvent::Jumped);
    }
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

fn solids(level: &Level) -> Vec<Solid> {
    level
        .platforms
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_solid())
        .map(|(id, p)| Solid { id, rect: p.rect })
        .collect()
}

/// Advance the simulation by one frame.  Outside `Playing` the world is
/// frozen and only the event list is cleared.
pub fn tick(state: &GameSession, input: HeldInput, rng: &mut impl Rng) -> GameSession {
    if state.status != GameStatus::Playing {
        return GameSession { events: Vec::new(), ..state.clone() };
    }

    let mut s = state.clone();
    s.frame += 1;
    s.events.clear();

    // ── 1. Input → player velocity ───────────────────────────────────────────
    s.player.steer(input.left, input.right);

    // ── 2. Player physics & hazards ──────────────────────────────────────────
    if !step_player(&mut s, rng) {
        die(&mut s, rng);
        return s;
    }

    // ── 3. Platforms ─────────────────────────────────────────────────────────
    step_platforms(&mut s, rng);

    // ── 4. Enemies: think, attack, get stomped ───────────────────────────────
    step_enemies(&mut s, rng);
    if s.player.is_dead() {
        die(&mut s, rng);
        return s;
    }

    // ── 5. Items ─────────────────────────────────────────────────────────────
    step_items(&mut s, rng);

    // ── 6. Traps ─────────────────────────────────────────────────────────────
    for trap in &mut s.level.traps {
        trap.update();
    }

    // ── 7. Projectiles ───────────────────────────────────────────────────────
    step_projectiles(&mut s, rng);

    // ── 8. Particles ─────────────────────────────────────────────────────────
    s.particles.update();

    // ── 9. Death, then completion ────────────────────────────────────────────
    if s.player.is_dead() {
        die(&mut s, rng);
        return s;
    }
    if s.level.enemies.is_empty() && s.level.items.is_empty() {
        info!("level {} complete, score {}", s.level.number, s.score);
        s.status = GameStatus::LevelComplete;
        s.events.push(GameEvent::LevelComplete { level: s.level.number });
    }

    trace!(
        "frame {}: player ({:.1}, {:.1}) hp {} | {} enemies, {} items, {} projectiles",
        s.frame,
        s.player.body.x,
        s.player.body.y,
        s.player.health,
        s.level.enemies.len(),
        s.level.items.len(),
        s.projectiles.len()
    );
    s
}

fn die(s: &mut GameSession, rng: &mut impl Rng) {
    info!("player died on level {} at frame {}", s.level.number, s.frame);
    s.status = GameStatus::GameOver;
    s.events.push(GameEvent::PlayerDied);
    s.particles.explosion(rng, s.player.body.center(), 50, ParticleTint::Damage);
}

fn record_damage(s: &mut GameSession, rng: &mut impl Rng, amount: i32) {
    if amount > 0 {
        s.events.push(GameEvent::PlayerDamaged { amount });
        s.particles.damage_burst(rng, s.player.body.center());
    }
}

/// Returns `false` if the player died this step.
fn step_player(s: &mut GameSession, rng: &mut impl Rng) -> bool {
    let solids = solids(&s.level);
    let contact = physics::step(&mut s.player.body, &solids, s.collision);
    s.player.set_grounded(contact.grounded);
    if let Some(id) = contact.landed_on {
        s.level.platforms[id].stepped_on();
    }

    if contact.out_of_world {
        s.player.kill();
        return false;
    }

    let player_rect = s.player.body.rect();
    let mut dealt = 0;
    for trap in &mut s.level.traps {
        if trap.active && player_rect.intersects(&trap.rect) {
            dealt += trap.trigger(&mut s.player);
        }
    }
    record_damage(s, rng, dealt);

    s.player.tick_timers();
    !s.player.is_dead()
}

fn step_platforms(s: &mut GameSession, rng: &mut impl Rng) {
    for platform in &mut s.level.platforms {
        if platform.update() {
            let (x, y) = platform.rect.center();
            debug!("platform broke at ({x:.0}, {y:.0})");
            s.events.push(GameEvent::PlatformBroke { x, y });
            s.particles.explosion(rng, (x, y), 15, ParticleTint::Debris);
        }
    }
    s.level.platforms.retain(|p| !p.is_gone());
}

fn step_enemies(s: &mut GameSession, rng: &mut impl Rng) {
    let solids = solids(&s.level);
    let mut damage_taken = 0;

    for enemy in &mut s.level.enemies {
        ai::update(enemy, &s.player, &solids, s.collision);

        // Landing on an enemy from above hurts it and bounces the player.
        let p = s.player.body;
        let (_, enemy_mid) = enemy.body.center();
        if p.vy > 0.0 && p.y + p.height < enemy_mid && p.rect().intersects(&enemy.body.rect()) {
            enemy.take_damage(1);
            s.player.body.vy = STOMP_BOUNCE;
            continue;
        }

        match ai::try_attack(enemy, &s.player) {
            Some(Attack::Melee { damage }) => damage_taken += s.player.take_damage(damage),
            Some(Attack::Shot(projectile)) => {
                s.projectiles.push(projectile);
                s.events.push(GameEvent::ProjectileFired);
            }
            None => {}
        }
    }
    record_damage(s, rng, damage_taken);

    // Snapshot the dead, then filter them out.
    let dead: Vec<_> = s
        .level
        .enemies
        .iter()
        .filter(|e| e.is_dead())
        .map(|e| (e.kind, e.body.center()))
        .collect();
    s.level.enemies.retain(|e| !e.is_dead());

    for (kind, (x, y)) in dead {
        s.score += KILL_SCORE;
        s.events.push(GameEvent::EnemyKilled { kind, x, y });
        s.particles.explosion(rng, (x, y), 30, ParticleTint::Explosion);
    }
}

fn step_items(s: &mut GameSession, rng: &mut impl Rng) {
    if s.player.is_dead() {
        return;
    }
    let player_rect = s.player.body.rect();
    let (taken, kept): (Vec<Item>, Vec<Item>) = s
        .level
        .items
        .drain(..)
        .partition(|item| item.rect.intersects(&player_rect));
    s.level.items = kept;

    for item in taken {
        let value = item_value(item.kind);
        s.player.apply_power_up(item.kind);
        s.score += value;
        s.events.push(GameEvent::ItemCollected { kind: item.kind, value });
        s.particles.explosion(rng, item.rect.center(), 20, ParticleTint::Pickup);
    }
}

fn step_projectiles(s: &mut GameSession, rng: &mut impl Rng) {
    let player_rect = s.player.body.rect();
    let mut hits = Vec::new();

    s.projectiles.retain_mut(|p| {
        p.body.x += p.body.vx;
        p.body.y += p.body.vy;
        p.lifetime = p.lifetime.saturating_sub(1);

        let in_world = p.body.x > 0.0
            && p.body.x < WORLD_WIDTH
            && p.body.y > 0.0
            && p.body.y < WORLD_HEIGHT;
        if p.lifetime == 0 || !in_world {
            return false;
        }
        if p.body.rect().intersects(&player_rect) {
            hits.push((p.damage, p.body.position()));
            return false;
        }
        true
    });

    for (damage, at) in hits {
        let dealt = s.player.take_damage(damage);
        record_damage(s, rng, dealt);
        s.particles.damage_burst(rng, at);
    }
}
