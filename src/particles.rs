//! Particle bursts
//!
//! A fixed-size pool of colored square particles shared by the games.
//! Bursts are one-shot (gem pickups, target knockouts); there are no
//! continuous emitters. Randomization uses a tiny xorshift kept inside the
//! pool so effects stay deterministic under a fixed seed.

use macroquad::prelude::*;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// A single particle in the pool
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec2,
    /// Units per second
    pub velocity: Vec2,
    /// Remaining life in seconds
    pub life: f32,
    /// Total lifetime (for interpolation)
    pub max_life: f32,
    pub color_start: [u8; 3],
    pub color_end: [u8; 3],
    /// Square side in pixels
    pub size: f32,
    /// Gravity multiplier inherited from the burst definition
    pub gravity_scale: f32,
    pub alive: bool,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            life: 0.0,
            max_life: 1.0,
            color_start: [255, 255, 255],
            color_end: [128, 128, 128],
            size: 2.0,
            gravity_scale: 1.0,
            alive: false,
        }
    }
}

/// What a burst looks like
#[derive(Debug, Clone, Copy)]
pub struct BurstDef {
    pub speed_min: f32,
    pub speed_max: f32,
    /// Gravity multiplier (1.0 = falls, 0.0 = drifts, negative = rises)
    pub gravity: f32,
    pub life_min: f32,
    pub life_max: f32,
    pub color_start: [u8; 3],
    pub color_end: [u8; 3],
    pub size: f32,
}

impl BurstDef {
    /// Gem pickup sparkle
    pub fn sparkle() -> Self {
        Self {
            speed_min: 30.0,
            speed_max: 120.0,
            gravity: -0.3,
            life_min: 0.3,
            life_max: 0.7,
            color_start: [220, 160, 255],
            color_end: [255, 255, 255],
            size: 2.0,
        }
    }

    /// Target knockout pop
    pub fn pop() -> Self {
        Self {
            speed_min: 60.0,
            speed_max: 220.0,
            gravity: 1.0,
            life_min: 0.2,
            life_max: 0.6,
            color_start: [230, 70, 70],
            color_end: [120, 20, 20],
            size: 3.0,
        }
    }

    /// Feathers on a flappy crash
    pub fn feathers() -> Self {
        Self {
            speed_min: 40.0,
            speed_max: 160.0,
            gravity: 0.5,
            life_min: 0.3,
            life_max: 0.8,
            color_start: [246, 214, 86],
            color_end: [140, 110, 30],
            size: 2.0,
        }
    }
}

/// The particle pool
pub struct ParticlePool {
    pub particles: [Particle; MAX_PARTICLES],
    rng_state: u32,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self {
            particles: [Particle::default(); MAX_PARTICLES],
            rng_state: 12345,
        }
    }

    /// Fast xorshift PRNG (no external deps, deterministic)
    fn next_random(&mut self) -> f32 {
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 17;
        self.rng_state ^= self.rng_state << 5;
        (self.rng_state as f32) / (u32::MAX as f32)
    }

    fn random_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_random() * (max - min)
    }

    fn find_free_slot(&self) -> Option<usize> {
        self.particles.iter().position(|p| !p.alive)
    }

    /// Spawn one particle flying in a uniformly random direction.
    pub fn spawn_one(&mut self, def: &BurstDef, origin: Vec2) {
        if let Some(idx) = self.find_free_slot() {
            let speed = self.random_range(def.speed_min, def.speed_max);
            let life = self.random_range(def.life_min, def.life_max);
            let theta = self.random_range(0.0, std::f32::consts::TAU);

            self.particles[idx] = Particle {
                position: origin,
                velocity: vec2(theta.cos(), theta.sin()) * speed,
                life,
                max_life: life,
                color_start: def.color_start,
                color_end: def.color_end,
                size: def.size,
                gravity_scale: def.gravity,
                alive: true,
            };
        }
    }

    pub fn spawn_burst(&mut self, def: &BurstDef, origin: Vec2, count: usize) {
        for _ in 0..count {
            self.spawn_one(def, origin);
        }
    }

    /// Integrate all live particles. `gravity` is the world constant in
    /// pixels per second squared, scaled per burst by its multiplier.
    pub fn update(&mut self, delta_time: f32, gravity: f32) {
        for particle in &mut self.particles {
            if !particle.alive {
                continue;
            }

            particle.life -= delta_time;
            if particle.life <= 0.0 {
                particle.alive = false;
                continue;
            }

            particle.velocity.y += gravity * particle.gravity_scale * delta_time;
            particle.position += particle.velocity * delta_time;
        }
    }

    /// Draw all live particles as small squares.
    pub fn draw(&self) {
        for particle in &self.particles {
            if !particle.alive {
                continue;
            }

            let t = 1.0 - (particle.life / particle.max_life);
            let r = lerp_u8(particle.color_start[0], particle.color_end[0], t);
            let g = lerp_u8(particle.color_start[1], particle.color_end[1], t);
            let b = lerp_u8(particle.color_start[2], particle.color_end[2], t);

            let half = particle.size * 0.5;
            draw_rectangle(
                particle.position.x - half,
                particle.position.y - half,
                particle.size,
                particle.size,
                Color::from_rgba(r, g, b, 255),
            );
        }
    }

    pub fn alive_count(&self) -> usize {
        self.particles.iter().filter(|p| p.alive).count()
    }

    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.alive = false;
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let result = a as f32 * (1.0 - t) + b as f32 * t;
    result.clamp(0.0, 255.0) as u8
}
