use platformer::constants::*;
use platformer::entities::*;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(EnemyKind::RuntimeBug, EnemyKind::RuntimeBug);
    assert_ne!(EnemyKind::SyntaxError, EnemyKind::LogicVirus);
    assert_ne!(EnemyState::Patrol, EnemyState::Chase);
    assert_ne!(GameStatus::Playing, GameStatus::Paused);
    assert_ne!(ItemKind::HealthPack, ItemKind::MemoryUpgrade);
}

#[test]
fn player_clone_is_independent() {
    let original = Player::spawn();
    let mut cloned = original.clone();
    cloned.body.x = 999.0;
    cloned.health = 1;
    assert_eq!(original.body.x, PLAYER_SPAWN.0);
    assert_eq!(original.health, MAX_HEALTH);
}

// ── Health ────────────────────────────────────────────────────────────────────

#[test]
fn heal_never_exceeds_max() {
    let mut p = Player::spawn();
    p.health = 2;
    p.heal(5);
    assert_eq!(p.health, p.max_health);
}

#[test]
fn memory_upgrade_raises_both_max_and_current() {
    let mut p = Player::spawn();
    p.health = 1;
    p.apply_power_up(ItemKind::MemoryUpgrade);
    assert_eq!(p.max_health, MAX_HEALTH + 1);
    assert_eq!(p.health, 2);
}

#[test]
fn damage_grants_invulnerability() {
    let mut p = Player::spawn();
    assert_eq!(p.take_damage(1), 1);
    assert_eq!(p.invulnerable_timer, HIT_INVULNERABILITY);
    assert_eq!(p.take_damage(1), 0);
    assert_eq!(p.health, MAX_HEALTH - 1);
}

#[test]
fn health_may_go_negative() {
    let mut p = Player::spawn();
    p.take_damage(INSTANT_DEATH);
    assert!(p.health < 0);
    assert!(p.is_dead());
}

#[test]
fn dead_player_cannot_be_healed() {
    let mut p = Player::spawn();
    p.health = 0;
    p.heal(1);
    assert_eq!(p.health, 0);
    p.apply_power_up(ItemKind::HealthPack);
    p.apply_power_up(ItemKind::MemoryUpgrade);
    assert!(p.is_dead());
}

#[test]
fn kill_is_unconditional() {
    let mut p = Player::spawn();
    p.invulnerable_timer = 100;
    p.kill();
    assert!(p.is_dead());
}

// ── Jumping ───────────────────────────────────────────────────────────────────

#[test]
fn double_jump_then_exhausted() {
    let mut p = Player::spawn();
    p.set_grounded(true);
    assert!(p.jump());
    assert_eq!(p.body.vy, JUMP_STRENGTH);
    assert!(p.jump());
    assert_eq!(p.body.vy, AIR_JUMP_STRENGTH);
    assert!(!p.jump());
    assert_eq!(p.jumps_remaining, 0);
}

#[test]
fn jump_extension_adds_a_jump_after_landing() {
    let mut p = Player::spawn();
    p.apply_power_up(ItemKind::JumpExtension);
    p.set_grounded(true);
    assert_eq!(p.jumps_remaining, MAX_JUMPS + 1);
    assert!(p.jump());
    assert!(p.jump());
    assert!(p.jump());
    assert!(!p.jump());
}

#[test]
fn landing_resets_jumps_only_when_grounded() {
    let mut p = Player::spawn();
    p.jumps_remaining = 0;
    p.set_grounded(false);
    assert_eq!(p.jumps_remaining, 0);
    p.set_grounded(true);
    assert_eq!(p.jumps_remaining, MAX_JUMPS);
}

// ── Power-up timers ───────────────────────────────────────────────────────────

#[test]
fn speed_boost_expires_and_resets_multiplier() {
    let mut p = Player::spawn();
    p.apply_power_up(ItemKind::CodeBoost);
    assert_eq!(p.speed_boost, SPEED_BOOST_FACTOR);
    p.steer(false, true);
    assert_eq!(p.body.vx, MOVE_SPEED * SPEED_BOOST_FACTOR);

    for _ in 0..SPEED_BOOST_TICKS {
        p.tick_timers();
    }
    assert_eq!(p.speed_boost_timer, 0);
    assert_eq!(p.speed_boost, 1.0);
}

#[test]
fn timers_clamp_at_zero() {
    let mut p = Player::spawn();
    p.invulnerable_timer = 1;
    p.extra_jump_timer = 1;
    p.tick_timers();
    p.tick_timers();
    assert_eq!(p.invulnerable_timer, 0);
    assert_eq!(p.extra_jump_timer, 0);
    assert_eq!(p.speed_boost_timer, 0);
}

#[test]
fn debug_potion_sets_invulnerability() {
    let mut p = Player::spawn();
    p.apply_power_up(ItemKind::DebugPotion);
    assert_eq!(p.invulnerable_timer, DEBUG_POTION_TICKS);
    assert_eq!(p.take_damage(3), 0);
}

#[test]
fn steer_prefers_left_and_stops_when_idle() {
    let mut p = Player::spawn();
    p.steer(true, true);
    assert_eq!(p.body.vx, -MOVE_SPEED);
    assert!(!p.facing_right);
    p.steer(false, false);
    assert_eq!(p.body.vx, 0.0);
}

#[test]
fn knockback_overrides_steering_until_it_expires() {
    let mut p = Player::spawn();
    p.knock_back(-SPIKE_KNOCKBACK_X, SPIKE_KNOCKBACK_Y);
    assert_eq!(p.knockback_timer, KNOCKBACK_TICKS);

    p.steer(false, true);
    assert_eq!(p.body.vx, -SPIKE_KNOCKBACK_X);

    for _ in 0..KNOCKBACK_TICKS {
        p.tick_timers();
    }
    p.steer(false, true);
    assert_eq!(p.body.vx, MOVE_SPEED);
}
