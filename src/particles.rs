/// Cosmetic feedback: short-lived particles and the screen-shake offset.
///
/// Both are frame-driven.  A particle loses one unit of lifetime per
/// `update` call and is dropped in the call that takes it to zero.

use std::f32::consts::TAU;

use rand::Rng;

use crate::entities::Rgb;

pub const EXPLOSION_COLOR: Rgb = Rgb(255, 200, 0);
pub const SHIP_EXPLOSION_COLOR: Rgb = Rgb(255, 100, 0);
pub const SHIELD_HIT_COLOR: Rgb = Rgb(100, 200, 255);
pub const SPARKLE_COLOR: Rgb = Rgb(255, 255, 255);

pub const EXPLOSION_COUNT: usize = 30;
pub const SHIELD_BREAK_COUNT: usize = 50;
pub const SHIELD_HIT_COUNT: usize = 20;
pub const SPARKLE_COUNT: usize = 15;

/// Ranges each new particle samples from.
#[derive(Clone, Copy, Debug)]
pub struct BurstSpec {
    pub speed: (f32, f32),
    pub size: (f32, f32),
    pub lifetime: (f32, f32),
}

const EXPLOSION: BurstSpec = BurstSpec { speed: (1.0, 5.0), size: (1.0, 4.0), lifetime: (10.0, 40.0) };
const SPARKLE: BurstSpec = BurstSpec { speed: (0.5, 2.0), size: (1.0, 2.0), lifetime: (5.0, 20.0) };
const SHIELD_HIT: BurstSpec = BurstSpec { speed: (0.5, 2.0), size: (1.0, 3.0), lifetime: (10.0, 30.0) };

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Radians, 0 ..= 2π.
    pub angle: f32,
    pub radius: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub color: Rgb,
}

fn sample(rng: &mut impl Rng, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

impl Particle {
    pub fn spawn(x: f32, y: f32, color: Rgb, shape: &BurstSpec, rng: &mut impl Rng) -> Self {
        let lifetime = sample(rng, shape.lifetime).max(1.0);
        Particle {
            x,
            y,
            speed: sample(rng, shape.speed),
            angle: rng.gen_range(0.0..TAU),
            radius: sample(rng, shape.size),
            lifetime,
            max_lifetime: lifetime,
            color,
        }
    }

    /// Age by one frame and move.  Returns `false` once the particle is dead.
    pub fn update(&mut self) -> bool {
        self.lifetime -= 1.0;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.x += self.speed * self.angle.cos();
        self.y += self.speed * self.angle.sin();
        true
    }

    /// Opacity falls linearly from 255 to 0 over the particle's life.
    pub fn alpha(&self) -> u8 {
        (255.0 * (self.lifetime / self.max_lifetime)).clamp(0.0, 255.0) as u8
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst(&mut self, x: f32, y: f32, color: Rgb, count: usize, shape: &BurstSpec, rng: &mut impl Rng) {
        self.particles
            .extend((0..count).map(|_| Particle::spawn(x, y, color, shape, &mut *rng)));
    }

    pub fn create_explosion(&mut self, x: f32, y: f32, color: Rgb, count: usize, rng: &mut impl Rng) {
        self.burst(x, y, color, count, &EXPLOSION, rng);
    }

    pub fn create_sparkle(&mut self, x: f32, y: f32, count: usize, rng: &mut impl Rng) {
        self.burst(x, y, SPARKLE_COLOR, count, &SPARKLE, rng);
    }

    pub fn create_shield_hit(&mut self, x: f32, y: f32, count: usize, rng: &mut impl Rng) {
        self.burst(x, y, SHIELD_HIT_COLOR, count, &SHIELD_HIT, rng);
    }

    pub fn update(&mut self) {
        self.particles.retain_mut(Particle::update);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

// ── Screen shake ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScreenShake {
    pub frames_left: u32,
    pub intensity: i32,
}

impl ScreenShake {
    pub fn arm(&mut self, frames: u32, intensity: i32) {
        self.frames_left = frames;
        self.intensity = intensity.max(0);
    }

    pub fn is_active(&self) -> bool {
        self.frames_left > 0
    }

    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    /// Render offset for this frame: each axis independently uniform in
    /// `[-intensity, intensity]` while active, otherwise `(0, 0)`.
    pub fn offset(&self, rng: &mut impl Rng) -> (i32, i32) {
        if !self.is_active() {
            return (0, 0);
        }
        let i = self.intensity;
        (rng.gen_range(-i..=i), rng.gen_range(-i..=i))
    }
}
