//! Tuning for the particle field.
//!
//! Everything the simulator needs to know is in [`FieldConfig`]. The defaults
//! reproduce the constellation backdrop; builder methods override single
//! values.
//!
//! # Usage
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_breakpoint(900.0)
//!     .with_wide_tier(Tier::new(150, 160.0));
//! ```

use web_time::Duration;

use crate::surface::Rgba;

/// Particle count and link threshold for one viewport class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    /// Number of particles created on (re)initialization.
    pub particle_count: usize,
    /// Pairs closer than this are joined by a connective line.
    pub link_distance: f32,
}

impl Tier {
    pub const fn new(particle_count: usize, link_distance: f32) -> Self {
        Self {
            particle_count,
            link_distance,
        }
    }
}

/// Particle field configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Viewports strictly narrower than this use the narrow tier.
    pub breakpoint: f32,
    /// Tier for phones and small windows.
    pub narrow: Tier,
    /// Tier for everything else.
    pub wide: Tier,
    /// Pointer influence radius.
    pub influence_radius: f32,
    /// Velocity change at zero distance from the pointer.
    pub push_strength: f32,
    /// Initial velocity components are drawn from `[-max_speed, max_speed]`.
    pub max_speed: f32,
    /// Smallest particle radius.
    pub min_radius: f32,
    /// Largest particle radius.
    pub max_radius: f32,
    /// Fill color for particles.
    pub particle_color: Rgba,
    /// Link color. The alpha channel is replaced per link.
    pub link_color: Rgba,
    /// Link opacity at zero distance.
    pub link_alpha: f32,
    /// Opacity falls by `1 / (link_distance * link_falloff)` per unit distance.
    pub link_falloff: f32,
    /// Stroke width of links.
    pub link_width: f32,
    /// Minimum spacing between resize-triggered reinitializations.
    pub resize_throttle: Duration,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            breakpoint: 768.0,
            narrow: Tier::new(60, 90.0),
            wide: Tier::new(110, 140.0),
            influence_radius: 120.0,
            push_strength: 0.3,
            max_speed: 0.15,
            min_radius: 0.2,
            max_radius: 2.0,
            particle_color: Rgba::from_rgb8(108, 229, 246, 0.45),
            link_color: Rgba::from_rgb8(108, 229, 246, 1.0),
            link_alpha: 0.18,
            link_falloff: 5.0,
            link_width: 0.6,
            resize_throttle: Duration::from_millis(120),
        }
    }
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tier in effect for a surface of the given width.
    pub fn tier(&self, width: f32) -> Tier {
        if width < self.breakpoint {
            self.narrow
        } else {
            self.wide
        }
    }

    /// Number of particles for a surface of the given width.
    pub fn particle_count(&self, width: f32) -> usize {
        self.tier(width).particle_count
    }

    /// Link threshold for a surface of the given width.
    pub fn link_distance(&self, width: f32) -> f32 {
        self.tier(width).link_distance
    }

    /// Opacity of a link between two particles `distance` apart.
    ///
    /// Linear in distance and not clamped: just under the threshold it is
    /// slightly negative with the default constants.
    #[inline]
    pub fn link_opacity(&self, distance: f32, link_distance: f32) -> f32 {
        self.link_alpha - distance / (link_distance * self.link_falloff)
    }

    pub fn with_breakpoint(mut self, breakpoint: f32) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    pub fn with_narrow_tier(mut self, tier: Tier) -> Self {
        self.narrow = tier;
        self
    }

    pub fn with_wide_tier(mut self, tier: Tier) -> Self {
        self.wide = tier;
        self
    }

    pub fn with_influence(mut self, radius: f32, strength: f32) -> Self {
        self.influence_radius = radius;
        self.push_strength = strength;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// Set the particle radius range. The bounds are swapped if reversed.
    pub fn with_radius_range(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min.min(max);
        self.max_radius = max.max(min);
        self
    }

    pub fn with_particle_color(mut self, color: Rgba) -> Self {
        self.particle_color = color;
        self
    }

    pub fn with_link_style(mut self, color: Rgba, alpha: f32, width: f32) -> Self {
        self.link_color = color;
        self.link_alpha = alpha;
        self.link_width = width;
        self
    }

    pub fn with_resize_throttle(mut self, wait: Duration) -> Self {
        self.resize_throttle = wait;
        self
    }
}
