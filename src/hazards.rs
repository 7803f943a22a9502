/// Platform and trap behaviour: oscillation, timed breaking, fake floors and
/// contact damage.

use crate::constants::{
    BREAK_DELAY, FAKE_FALL_ACCEL, FAKE_PLATFORM_DELAY, INSTANT_DEATH, SAW_SPIN_PER_TICK,
    SPIKE_KNOCKBACK_X, SPIKE_KNOCKBACK_Y, WORLD_HEIGHT,
};
use crate::entities::{Platform, PlatformKind, Player, Trap, TrapKind};
use crate::physics::Rect;

// ── Oscillator ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Back-and-forth motion along one axis within `origin ± range`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub origin: f32,
    pub range: f32,
    pub speed: f32,
    pub direction: f32,
    pub axis: Axis,
}

impl Oscillator {
    pub fn new(origin: f32, range: f32, speed: f32, axis: Axis) -> Self {
        Self { origin, range, speed, direction: 1.0, axis }
    }

    /// Advance one tick from `pos`, reversing at either bound.
    pub fn advance(&mut self, pos: f32) -> f32 {
        let lo = self.origin - self.range;
        let hi = self.origin + self.range;
        let next = pos + self.speed * self.direction;
        if next >= hi {
            self.direction = -1.0;
            hi
        } else if next <= lo {
            self.direction = 1.0;
            lo
        } else {
            next
        }
    }

    /// Move `rect` one tick along this oscillator's axis.
    pub fn drive(&mut self, rect: &mut Rect) {
        match self.axis {
            Axis::Horizontal => rect.x = self.advance(rect.x),
            Axis::Vertical => rect.y = self.advance(rect.y),
        }
    }
}

// ── Platforms ─────────────────────────────────────────────────────────────────

impl Platform {
    pub fn normal(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { rect: Rect::new(x, y, w, h), kind: PlatformKind::Normal }
    }

    pub fn moving(x: f32, y: f32, w: f32, h: f32, range: f32, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind: PlatformKind::Moving(Oscillator::new(x, range, speed, Axis::Horizontal)),
        }
    }

    pub fn breakable(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind: PlatformKind::Breakable { break_timer: 0, destroyed: false },
        }
    }

    pub fn fake(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind: PlatformKind::Fake { delay: 0, triggered: false, falling: false, fall_speed: 0.0 },
        }
    }

    /// Whether bodies can currently stand on this platform.
    pub fn is_solid(&self) -> bool {
        match self.kind {
            PlatformKind::Normal | PlatformKind::Moving(_) => true,
            PlatformKind::Breakable { destroyed, .. } => !destroyed,
            PlatformKind::Fake { falling, .. } => !falling,
        }
    }

    /// A fake platform that has fallen out of the world.
    pub fn is_gone(&self) -> bool {
        matches!(self.kind, PlatformKind::Fake { falling: true, .. }) && self.rect.y > WORLD_HEIGHT
    }

    /// Arm the break countdown.  No-op unless this is an idle breakable.
    pub fn trigger_break(&mut self) {
        if let PlatformKind::Breakable { break_timer, destroyed } = &mut self.kind {
            if *break_timer == 0 && !*destroyed {
                *break_timer = BREAK_DELAY;
            }
        }
    }

    /// Called when the player lands on this platform.
    pub fn stepped_on(&mut self) {
        if matches!(self.kind, PlatformKind::Breakable { .. }) {
            self.trigger_break();
        } else if let PlatformKind::Fake { delay, triggered, .. } = &mut self.kind {
            if !*triggered {
                *triggered = true;
                *delay = FAKE_PLATFORM_DELAY;
            }
        }
    }

    /// Advance one tick.  Returns `true` on the tick a breakable is destroyed.
    pub fn update(&mut self) -> bool {
        match &mut self.kind {
            PlatformKind::Normal => false,
            PlatformKind::Moving(motion) => {
                motion.drive(&mut self.rect);
                false
            }
            PlatformKind::Breakable { break_timer, destroyed } => {
                if *break_timer == 0 {
                    return false;
                }
                *break_timer -= 1;
                if *break_timer == 0 {
                    *destroyed = true;
                    return true;
                }
                false
            }
            PlatformKind::Fake { delay, triggered, falling, fall_speed } => {
                if *triggered && !*falling {
                    *delay = delay.saturating_sub(1);
                    if *delay == 0 {
                        *falling = true;
                    }
                }
                if *falling {
                    *fall_speed += FAKE_FALL_ACCEL;
                    self.rect.y += *fall_speed;
                }
                false
            }
        }
    }
}

// ── Traps ─────────────────────────────────────────────────────────────────────

impl Trap {
    pub fn spike(x: f32, y: f32) -> Self {
        Self { rect: Rect::new(x, y, 30.0, 20.0), kind: TrapKind::Spike, active: true, damage: 1 }
    }

    /// Indistinguishable from a floor tile and lethal on first touch.
    pub fn fake_platform(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, 80.0, 15.0),
            kind: TrapKind::FakePlatform { triggered: false },
            active: true,
            damage: INSTANT_DEATH,
        }
    }

    pub fn moving_saw(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, 40.0, 40.0),
            kind: TrapKind::MovingSaw {
                angle: 0.0,
                motion: Oscillator::new(x, 150.0, 3.0, Axis::Horizontal),
            },
            active: true,
            damage: 2,
        }
    }

    pub fn update(&mut self) {
        match &mut self.kind {
            TrapKind::Spike => {}
            TrapKind::FakePlatform { triggered } => {
                if *triggered {
                    self.active = false;
                }
            }
            TrapKind::MovingSaw { angle, motion } => {
                *angle = (*angle + SAW_SPIN_PER_TICK) % 360.0;
                motion.drive(&mut self.rect);
            }
        }
    }

    /// Apply this trap's contact effect.  Returns the damage dealt.
    pub fn trigger(&mut self, player: &mut Player) -> i32 {
        if !self.active {
            return 0;
        }
        match &mut self.kind {
            TrapKind::Spike => {
                let dealt = player.take_damage(self.damage);
                let (trap_cx, _) = self.rect.center();
                let (player_cx, _) = player.body.center();
                let away = if player_cx < trap_cx { -1.0 } else { 1.0 };
                player.knock_back(away * SPIKE_KNOCKBACK_X, SPIKE_KNOCKBACK_Y);
                dealt
            }
            TrapKind::FakePlatform { triggered } => {
                if *triggered {
                    return 0;
                }
                *triggered = true;
                player.take_damage(self.damage)
            }
            TrapKind::MovingSaw { .. } => player.take_damage(self.damage),
        }
    }
}
