//! Spawn context for particle initialization.
//!
//! Wraps a seeded RNG with the few distributions the field needs, so
//! initialization reads as intent rather than range arithmetic.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::FieldConfig;
use crate::particle::Particle;

/// Seed derived from the wall clock, different for each program execution.
pub(crate) fn time_seed() -> u64 {
    web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(42)
}

/// Random helpers for filling a surface with particles.
///
/// Ranges are inclusive, so a zero-sized surface places every particle at
/// the origin instead of panicking.
pub struct SpawnContext {
    /// Surface size particles are spawned into.
    pub bounds: Vec2,
    rng: SmallRng,
}

impl SpawnContext {
    pub fn new(bounds: Vec2, seed: u64) -> Self {
        Self {
            bounds,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 in `[min, max]`. Returns `min` if the range is empty.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform random point within `[0, bounds.x] x [0, bounds.y]`.
    pub fn random_in_bounds(&mut self) -> Vec2 {
        Vec2::new(
            self.random_range(0.0, self.bounds.x),
            self.random_range(0.0, self.bounds.y),
        )
    }

    /// Velocity with each component uniform in `[-max, max]`.
    pub fn random_velocity(&mut self, max: f32) -> Vec2 {
        Vec2::new(self.random_range(-max, max), self.random_range(-max, max))
    }

    /// One particle drawn from the configured distributions.
    pub fn particle(&mut self, config: &FieldConfig) -> Particle {
        Particle {
            position: self.random_in_bounds(),
            velocity: self.random_velocity(config.max_speed),
            radius: self.random_range(config.min_radius, config.max_radius),
        }
    }

    /// `count` particles, in spawn order.
    pub fn particles(&mut self, config: &FieldConfig, count: usize) -> Vec<Particle> {
        (0..count).map(|_| self.particle(config)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_in_bounds() {
        let mut ctx = SpawnContext::new(Vec2::new(320.0, 200.0), 7);
        for _ in 0..500 {
            let pos = ctx.random_in_bounds();
            assert!((0.0..=320.0).contains(&pos.x));
            assert!((0.0..=200.0).contains(&pos.y));
        }
    }

    #[test]
    fn test_zero_bounds_do_not_panic() {
        let mut ctx = SpawnContext::new(Vec2::ZERO, 7);
        assert_eq!(ctx.random_in_bounds(), Vec2::ZERO);
    }

    #[test]
    fn test_same_seed_same_particles() {
        let config = FieldConfig::default();
        let a = SpawnContext::new(Vec2::splat(100.0), 99).particles(&config, 10);
        let b = SpawnContext::new(Vec2::splat(100.0), 99).particles(&config, 10);
        assert_eq!(a, b);
    }
}
