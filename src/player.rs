/// The player's own rules: jumping, damage, healing and power-up timers.

use crate::constants::{
    AIR_JUMP_STRENGTH, DEBUG_POTION_TICKS, HIT_INVULNERABILITY, JUMP_EXTENSION_TICKS,
    JUMP_STRENGTH, KNOCKBACK_TICKS, MAX_HEALTH, MAX_JUMPS, MOVE_SPEED, PLAYER_HEIGHT, PLAYER_SPAWN,
    PLAYER_WIDTH, SPEED_BOOST_FACTOR, SPEED_BOOST_TICKS,
};
use crate::entities::{ItemKind, Player};
use crate::physics::Body;

impl Player {
    pub fn spawn() -> Self {
        let (x, y) = PLAYER_SPAWN;
        Self {
            body: Body::new(x, y, PLAYER_WIDTH, PLAYER_HEIGHT),
            health: MAX_HEALTH,
            max_health: MAX_HEALTH,
            grounded: false,
            jumps_remaining: MAX_JUMPS,
            invulnerable_timer: 0,
            speed_boost: 1.0,
            speed_boost_timer: 0,
            extra_jump_timer: 0,
            facing_right: true,
            knockback_timer: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Jumps available after touching the ground.
    pub fn jump_allowance(&self) -> u32 {
        MAX_JUMPS + u32::from(self.extra_jump_timer > 0)
    }

    /// Set horizontal velocity from held keys.  Left wins ties.  Ignored
    /// while a knockback is running.
    pub fn steer(&mut self, left: bool, right: bool) {
        if self.knockback_timer > 0 {
            return;
        }
        if left {
            self.body.vx = -MOVE_SPEED * self.speed_boost;
            self.facing_right = false;
        } else if right {
            self.body.vx = MOVE_SPEED * self.speed_boost;
            self.facing_right = true;
        } else {
            self.body.vx = 0.0;
        }
    }

    /// Returns `false` when no jumps are left.
    pub fn jump(&mut self) -> bool {
        if self.jumps_remaining == 0 {
            return false;
        }
        self.body.vy = if self.jumps_remaining == self.jump_allowance() {
            JUMP_STRENGTH
        } else {
            AIR_JUMP_STRENGTH
        };
        self.jumps_remaining -= 1;
        self.grounded = false;
        true
    }

    /// Record a landing (or lack of one) from the last physics step.
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
        if grounded {
            self.jumps_remaining = self.jump_allowance();
        }
    }

    /// Returns the damage actually taken (zero while invulnerable).
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if self.invulnerable_timer > 0 {
            return 0;
        }
        self.health -= amount;
        self.invulnerable_timer = HIT_INVULNERABILITY;
        amount
    }

    /// Shove the player sideways for `KNOCKBACK_TICKS`, overriding steering.
    pub fn knock_back(&mut self, vx: f32, vy: f32) {
        self.body.vx = vx;
        self.body.vy = vy;
        self.knockback_timer = KNOCKBACK_TICKS;
    }

    /// Unconditional death, used when the player leaves the world.
    pub fn kill(&mut self) {
        self.health = self.health.min(0);
    }

    /// No effect on a dead player.
    pub fn heal(&mut self, amount: i32) {
        if self.is_dead() {
            return;
        }
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn apply_power_up(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::DebugPotion => self.invulnerable_timer = DEBUG_POTION_TICKS,
            ItemKind::CodeBoost => {
                self.speed_boost = SPEED_BOOST_FACTOR;
                self.speed_boost_timer = SPEED_BOOST_TICKS;
            }
            ItemKind::MemoryUpgrade => {
                self.max_health += 1;
                self.heal(1);
            }
            ItemKind::JumpExtension => self.extra_jump_timer = JUMP_EXTENSION_TICKS,
            ItemKind::HealthPack => self.heal(1),
        }
    }

    /// Count every timer down one tick, clamping at zero.
    pub fn tick_timers(&mut self) {
        self.invulnerable_timer = self.invulnerable_timer.saturating_sub(1);
        if self.speed_boost_timer > 0 {
            self.speed_boost_timer -= 1;
            if self.speed_boost_timer == 0 {
                self.speed_boost = 1.0;
            }
        }
        self.extra_jump_timer = self.extra_jump_timer.saturating_sub(1);
        self.knockback_timer = self.knockback_timer.saturating_sub(1);
    }
}
