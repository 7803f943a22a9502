/// Short-lived cosmetic particles.  They never affect gameplay.

use std::f32::consts::TAU;

use rand::Rng;

use crate::constants::{MAX_PARTICLES, PARTICLE_GRAVITY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleTint {
    Explosion,
    Jump,
    Damage,
    Debris,
    Pickup,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub lifetime: u32,
    pub tint: ParticleTint,
}

#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    pub particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    fn push(&mut self, p: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(p);
    }

    fn burst(
        &mut self,
        rng: &mut impl Rng,
        (x, y): (f32, f32),
        count: usize,
        speed: (f32, f32),
        lifetime: (u32, u32),
        tint: ParticleTint,
    ) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let v = rng.gen_range(speed.0..speed.1);
            self.push(Particle {
                x,
                y,
                vx: angle.cos() * v,
                vy: angle.sin() * v,
                lifetime: rng.gen_range(lifetime.0..=lifetime.1),
                tint,
            });
        }
    }

    pub fn explosion(&mut self, rng: &mut impl Rng, at: (f32, f32), count: usize, tint: ParticleTint) {
        self.burst(rng, at, count, (2.0, 8.0), (20, 40), tint);
    }

    pub fn jump_puff(&mut self, rng: &mut impl Rng, (x, y): (f32, f32)) {
        for _ in 0..10 {
            let angle = rng.gen_range(0.0..TAU);
            let v = rng.gen_range(1.0..3.0);
            self.push(Particle {
                x,
                y,
                vx: angle.cos() * v,
                vy: rng.gen_range(-2.0..0.0),
                lifetime: rng.gen_range(15..=25),
                tint: ParticleTint::Jump,
            });
        }
    }

    pub fn damage_burst(&mut self, rng: &mut impl Rng, at: (f32, f32)) {
        self.burst(rng, at, 15, (1.0, 5.0), (20, 35), ParticleTint::Damage);
    }

    pub fn update(&mut self) {
        self.particles.retain_mut(|p| {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += PARTICLE_GRAVITY;
            p.lifetime = p.lifetime.saturating_sub(1);
            p.lifetime > 0
        });
    }
}
