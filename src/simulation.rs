//! The particle field simulator.
//!
//! [`ParticleField`] owns the particle set and the pointer state. Each frame
//! the host calls [`ParticleField::step`] and then [`ParticleField::render`];
//! pointer and resize notifications arrive between frames.

use glam::Vec2;
use log::debug;

use crate::config::FieldConfig;
use crate::input::{PointerEvent, PointerState};
use crate::particle::Particle;
use crate::spawn::{time_seed, SpawnContext};
use crate::surface::DrawingSurface;

/// What one call to [`ParticleField::render`] drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Filled circles, one per particle.
    pub circles: usize,
    /// Unordered particle pairs whose distance was checked.
    pub pairs_checked: usize,
    /// Pairs close enough to be linked.
    pub links: usize,
}

/// A bounded field of drifting particles that shy away from the pointer.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    size: Vec2,
    particles: Vec<Particle>,
    pointer: PointerState,
    seed: u64,
    generation: u64,
}

impl ParticleField {
    /// Create a field filling a `width` x `height` surface.
    pub fn new(config: FieldConfig, width: u32, height: u32) -> Self {
        Self::with_seed(config, width, height, time_seed())
    }

    /// Like [`ParticleField::new`] but with a fixed RNG seed, so every
    /// (re)initialization is reproducible.
    pub fn with_seed(config: FieldConfig, width: u32, height: u32, seed: u64) -> Self {
        let mut field = Self {
            config,
            size: Vec2::ZERO,
            particles: Vec::new(),
            pointer: PointerState::absent(),
            seed,
            generation: 0,
        };
        field.resize(width, height);
        field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Surface size the particles live in.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for hosts that place particles themselves.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Link threshold in effect at the current width.
    pub fn link_distance(&self) -> f32 {
        self.config.link_distance(self.size.x)
    }

    /// Adopt a new surface size and replace every particle.
    ///
    /// The particle count is re-derived from the new width. Nothing carries
    /// over from the previous set.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Vec2::new(width as f32, height as f32);
        self.create_particles();
    }

    fn create_particles(&mut self) {
        let count = self.config.particle_count(self.size.x);
        // Each generation gets its own stream so reseeded fields differ
        let seed = self
            .seed
            .wrapping_add(self.generation.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.generation += 1;

        let mut ctx = SpawnContext::new(self.size, seed);
        self.particles = ctx.particles(&self.config, count);

        debug!(
            "created {} particles for {}x{} surface",
            count, self.size.x, self.size.y
        );
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.pointer.moved(position);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.left();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer.apply(event);
    }

    /// Advance every particle by one frame.
    ///
    /// Per particle: pointer repulsion, then position += velocity, then the
    /// bounce check against the surface edges.
    pub fn step(&mut self) {
        let pointer = self.pointer.position();
        let radius = self.config.influence_radius;
        let strength = self.config.push_strength;

        for p in &mut self.particles {
            if let Some(pointer) = pointer {
                p.repel_from(pointer, radius, strength);
            }
            p.advance();
            p.bounce(self.size);
        }
    }

    /// Draw the current state: clear, all particles, then links.
    ///
    /// Each unordered pair is checked once (`i < j`), so a frame performs
    /// `n * (n - 1) / 2` distance checks.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> FrameStats {
        let mut stats = FrameStats::default();
        surface.clear();

        for p in &self.particles {
            surface.fill_circle(p.position, p.radius, self.config.particle_color);
            stats.circles += 1;
        }

        let threshold = self.link_distance();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                stats.pairs_checked += 1;

                let distance = a.position.distance(b.position);
                if distance < threshold {
                    let alpha = self.config.link_opacity(distance, threshold);
                    surface.stroke_line(
                        a.position,
                        b.position,
                        self.config.link_color.with_alpha(alpha),
                        self.config.link_width,
                    );
                    stats.links += 1;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn field(width: u32, height: u32) -> ParticleField {
        ParticleField::with_seed(FieldConfig::default(), width, height, 1234)
    }

    fn single(position: Vec2, velocity: Vec2) -> ParticleField {
        let mut f = field(1000, 800);
        f.particles = vec![Particle::new(position, velocity, 1.0)];
        f
    }

    #[test]
    fn test_initial_particles_within_ranges() {
        let f = field(1000, 800);
        assert_eq!(f.particles().len(), 110);
        for p in f.particles() {
            assert!((0.0..=1000.0).contains(&p.position.x));
            assert!((0.0..=800.0).contains(&p.position.y));
            assert!((0.2..=2.0).contains(&p.radius));
            assert!((-0.15..=0.15).contains(&p.velocity.x));
            assert!((-0.15..=0.15).contains(&p.velocity.y));
        }
    }

    #[test]
    fn test_resize_rederives_count() {
        let mut f = field(1000, 800);
        f.resize(500, 800);
        assert_eq!(f.particles().len(), 60);
        assert_eq!(f.link_distance(), 90.0);

        f.resize(1000, 800);
        assert_eq!(f.particles().len(), 110);
        assert_eq!(f.link_distance(), 140.0);
    }

    #[test]
    fn test_resize_replaces_particles() {
        let mut f = field(1000, 800);
        let before = f.particles().to_vec();
        f.resize(1000, 800);
        assert_eq!(f.particles().len(), before.len());
        assert_ne!(f.particles(), &before[..]);
    }

    #[test]
    fn test_step_without_pointer_moves_by_velocity() {
        let mut f = single(Vec2::new(10.0, 10.0), Vec2::new(0.1, -0.05));
        f.step();
        let p = f.particles()[0];
        assert!((p.position - Vec2::new(10.1, 9.95)).length() < 1e-5);
        assert_eq!(p.velocity, Vec2::new(0.1, -0.05));
    }

    #[test]
    fn test_bounce_at_right_edge() {
        let mut f = single(Vec2::new(1000.0 + 0.01, 400.0), Vec2::new(0.1, 0.07));
        f.step();
        let p = f.particles()[0];
        assert!(p.velocity.x < 0.0);
        assert_eq!(p.velocity.y, 0.07);
    }

    #[test]
    fn test_pointer_repulsion_applies_before_move() {
        let mut f = single(Vec2::new(100.0, 100.0), Vec2::ZERO);
        f.pointer_moved(Vec2::new(160.0, 100.0));
        f.step();
        let p = f.particles()[0];
        // force = (120 - 60) / 120 = 0.5, push = 0.15 to the left
        assert!((p.velocity.x + 0.15).abs() < 1e-6);
        assert!((p.position.x - 99.85).abs() < 1e-4);
    }

    #[test]
    fn test_render_draws_circles_then_links() {
        let mut f = field(1000, 800);
        f.particles = vec![
            Particle::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 1.0),
            Particle::new(Vec2::new(70.0, 0.0), Vec2::ZERO, 1.5),
            Particle::new(Vec2::new(900.0, 700.0), Vec2::ZERO, 2.0),
        ];
        let mut surface = RecordingSurface::new(1000, 800);
        let stats = f.render(&mut surface);

        assert_eq!(
            stats,
            FrameStats {
                circles: 3,
                pairs_checked: 3,
                links: 1
            }
        );

        let commands = surface.commands();
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::Circle { .. }));
        assert!(matches!(commands[3], DrawCommand::Circle { .. }));
        match commands[4] {
            DrawCommand::Line { color, width, .. } => {
                assert!((color.a - 0.08).abs() < 1e-6);
                assert_eq!(width, 0.6);
            }
            ref other => panic!("expected a line, got {:?}", other),
        }
    }
}
