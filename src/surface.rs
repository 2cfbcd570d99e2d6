//! Drawing surface abstraction.
//!
//! The simulator draws through the [`DrawingSurface`] trait: an immediate-mode
//! 2D rasterizer with filled circles and stroked lines. The native host backs
//! it with wgpu, the web host with a canvas 2D context, and tests use
//! [`RecordingSurface`] to inspect what a frame would have drawn.

use glam::Vec2;

/// A straight RGBA color with channels in 0.0–1.0.
///
/// Alpha is not clamped on construction: link opacity is a linear formula that
/// may dip slightly below zero near the link threshold. Rasterizers that need
/// a valid range call [`Rgba::clamped`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from 8-bit channels and a float alpha, as in CSS `rgba()`.
    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// All channels clamped to 0.0–1.0.
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba(r, g, b, a)` string with 8-bit color channels and a clamped alpha.
    pub fn to_css(self) -> String {
        let c = self.clamped();
        format!(
            "rgba({}, {}, {}, {})",
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            c.a
        )
    }
}

/// Immediate-mode 2D rasterizer the particle field draws into.
///
/// Coordinates are surface-space pixels with the origin at the top-left.
pub trait DrawingSurface {
    /// Backing store width in pixels.
    fn width(&self) -> u32;

    /// Backing store height in pixels.
    fn height(&self) -> u32;

    /// Resize the backing store. Clears its contents.
    fn set_size(&mut self, width: u32, height: u32);

    /// Clear the whole surface.
    fn clear(&mut self);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgba,
        width: f32,
    },
}

/// Surface that records draw calls instead of rasterizing them.
///
/// Used by headless hosts, benches and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Every draw call since the last clear (the clear itself included).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn clear(&mut self) {
        // A clear wipes prior frames, so only the current frame is kept.
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
