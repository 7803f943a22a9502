/// Axis-aligned boxes, gravity integration and platform collision.
///
/// Nothing here can fail: out-of-range velocities are clamped and leaving
/// the world is reported through `Contact::out_of_world` for the caller to
/// act on.

use crate::constants::{GRAVITY, TERMINAL_VELOCITY, WORLD_HEIGHT, WORLD_WIDTH};

// ── Rect ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

// ── Body ──────────────────────────────────────────────────────────────────────

/// A moving box: position, size and velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
}

impl Body {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, vx: 0.0, vy: 0.0, width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn center(&self) -> (f32, f32) {
        self.rect().center()
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CollisionMode {
    /// Move and resolve x first, then y.
    #[default]
    Axis,
    /// Move both axes, then resolve overlaps vertically only.
    Combined,
}

/// What happened to a body during one `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Contact {
    /// The last vertical resolution pushed the body up onto a surface.
    pub grounded: bool,
    pub hit_ceiling: bool,
    pub hit_wall: bool,
    /// Id of the solid the body landed on, if any.
    pub landed_on: Option<usize>,
    pub out_of_world: bool,
}

/// A collidable rectangle tagged with the caller's id for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solid {
    pub id: usize,
    pub rect: Rect,
}

pub fn apply_gravity(vy: f32) -> f32 {
    (vy + GRAVITY).min(TERMINAL_VELOCITY)
}

fn clamp_to_world(body: &mut Body) {
    body.x = body.x.clamp(0.0, WORLD_WIDTH - body.width);
}

/// Advance `body` one tick under gravity and resolve it against `solids`.
pub fn step(body: &mut Body, solids: &[Solid], mode: CollisionMode) -> Contact {
    body.vy = apply_gravity(body.vy);
    let mut contact = Contact::default();

    match mode {
        CollisionMode::Axis => {
            body.x += body.vx;
            clamp_to_world(body);
            resolve_horizontal(body, solids, &mut contact);

            body.y += body.vy;
            resolve_vertical(body, solids, &mut contact);
        }
        CollisionMode::Combined => {
            body.x += body.vx;
            body.y += body.vy;
            clamp_to_world(body);
            resolve_vertical(body, solids, &mut contact);
        }
    }

    contact.out_of_world = body.y > WORLD_HEIGHT;
    contact
}

fn resolve_horizontal(body: &mut Body, solids: &[Solid], contact: &mut Contact) {
    // A standing body has nothing to push out of sideways; the vertical pass
    // handles any overlap a moving platform created.
    if body.vx == 0.0 {
        return;
    }
    for solid in solids {
        if !body.rect().intersects(&solid.rect) {
            continue;
        }
        if body.vx > 0.0 {
            body.x = solid.rect.x - body.width;
        } else {
            body.x = solid.rect.right();
        }
        contact.hit_wall = true;
    }
}

fn resolve_vertical(body: &mut Body, solids: &[Solid], contact: &mut Contact) {
    for solid in solids {
        if !body.rect().intersects(&solid.rect) {
            continue;
        }
        if body.vy >= 0.0 {
            body.y = solid.rect.y - body.height;
            body.vy = 0.0;
            contact.grounded = true;
            contact.hit_ceiling = false;
            contact.landed_on = Some(solid.id);
        } else {
            body.y = solid.rect.bottom();
            body.vy = 0.0;
            contact.grounded = false;
            contact.hit_ceiling = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Solid {
        Solid { id: 7, rect: Rect::new(0.0, 500.0, 400.0, 40.0) }
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.9, 9.9, 1.0, 1.0)));
    }

    #[test]
    fn gravity_clamps_at_terminal_velocity() {
        assert_eq!(apply_gravity(0.0), GRAVITY);
        assert_eq!(apply_gravity(19.9), TERMINAL_VELOCITY);
        assert_eq!(apply_gravity(500.0), TERMINAL_VELOCITY);
    }

    #[test]
    fn landing_grounds_and_reports_the_solid() {
        let mut body = Body::new(50.0, 455.0, 30.0, 40.0);
        body.vy = 10.0;
        let contact = step(&mut body, &[floor()], CollisionMode::Axis);
        assert!(contact.grounded);
        assert_eq!(contact.landed_on, Some(7));
        assert_eq!(body.y, 460.0);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn ceiling_hit_stops_without_grounding() {
        let ceiling = Solid { id: 0, rect: Rect::new(0.0, 100.0, 400.0, 20.0) };
        let mut body = Body::new(50.0, 125.0, 30.0, 40.0);
        body.vy = -15.0;
        let contact = step(&mut body, &[ceiling], CollisionMode::Axis);
        assert!(contact.hit_ceiling);
        assert!(!contact.grounded);
        assert_eq!(body.y, 120.0);
        assert_eq!(body.vy, 0.0);
    }

    #[test]
    fn wall_pushes_back_against_travel() {
        let wall = Solid { id: 0, rect: Rect::new(100.0, 0.0, 20.0, 600.0) };
        let mut body = Body::new(68.0, 200.0, 30.0, 40.0);
        body.vx = 5.0;
        let contact = step(&mut body, &[wall], CollisionMode::Axis);
        assert!(contact.hit_wall);
        assert_eq!(body.x, 70.0);
        assert!(!body.rect().intersects(&wall.rect));
    }

    #[test]
    fn combined_mode_resolves_vertically() {
        let mut body = Body::new(50.0, 455.0, 30.0, 40.0);
        body.vx = 3.0;
        body.vy = 10.0;
        let contact = step(&mut body, &[floor()], CollisionMode::Combined);
        assert!(contact.grounded);
        assert_eq!(body.x, 53.0);
        assert_eq!(body.y, 460.0);
    }

    #[test]
    fn falling_past_the_world_is_reported() {
        let mut body = Body::new(50.0, WORLD_HEIGHT - 1.0, 30.0, 40.0);
        body.vy = 5.0;
        let contact = step(&mut body, &[], CollisionMode::Axis);
        assert!(contact.out_of_world);
    }

    #[test]
    fn horizontal_position_is_clamped() {
        let mut body = Body::new(2.0, 100.0, 30.0, 40.0);
        body.vx = -5.0;
        step(&mut body, &[], CollisionMode::Axis);
        assert_eq!(body.x, 0.0);
    }
}
