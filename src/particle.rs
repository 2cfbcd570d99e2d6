//! The particle value type.

use glam::Vec2;

/// A point-like particle in surface space.
///
/// `radius` is fixed at creation; position and velocity are advanced by
/// [`ParticleField::step`](crate::ParticleField::step).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    pub radius: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
        }
    }

    /// Push the particle away from `pointer` if it lies within `radius`.
    ///
    /// The push is `strength` at zero distance and falls off linearly to
    /// nothing at `radius`. At zero distance the direction is -x.
    pub fn repel_from(&mut self, pointer: Vec2, radius: f32, strength: f32) {
        let delta = pointer - self.position;
        let dist = delta.length();
        if dist >= radius {
            return;
        }

        let force = (radius - dist) / radius;
        let angle = delta.y.atan2(delta.x);
        self.velocity.x -= angle.cos() * force * strength;
        self.velocity.y -= angle.sin() * force * strength;
    }

    /// Move by one frame's velocity.
    #[inline]
    pub fn advance(&mut self) {
        self.position += self.velocity;
    }

    /// Flip velocity on each axis whose position is outside `[0, bounds]`.
    ///
    /// Position is left where it is; the flipped velocity carries the
    /// particle back in over the following frames.
    pub fn bounce(&mut self, bounds: Vec2) {
        if self.position.x > bounds.x || self.position.x < 0.0 {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y > bounds.y || self.position.y < 0.0 {
            self.velocity.y = -self.velocity.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repel_pushes_away() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 1.0);
        p.repel_from(Vec2::new(150.0, 100.0), 120.0, 0.3);
        // Pointer is to the right, so the push is to the left
        assert!(p.velocity.x < 0.0);
        assert!(p.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn test_repel_outside_radius_is_noop() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(0.1, -0.1), 1.0);
        p.repel_from(Vec2::new(120.0, 0.0), 120.0, 0.3);
        assert_eq!(p.velocity, Vec2::new(0.1, -0.1));
    }

    #[test]
    fn test_repel_at_zero_distance() {
        let mut p = Particle::new(Vec2::new(5.0, 5.0), Vec2::ZERO, 1.0);
        p.repel_from(Vec2::new(5.0, 5.0), 120.0, 0.3);
        assert!((p.velocity.x + 0.3).abs() < 1e-6);
        assert!(p.velocity.y.abs() < 1e-6);
        assert!(p.velocity.is_finite());
    }

    #[test]
    fn test_bounce_flips_only_offending_axis() {
        let mut p = Particle::new(Vec2::new(-0.5, 50.0), Vec2::new(-0.1, 0.1), 1.0);
        p.bounce(Vec2::new(100.0, 100.0));
        assert_eq!(p.velocity, Vec2::new(0.1, 0.1));
        assert_eq!(p.position, Vec2::new(-0.5, 50.0));
    }
}
