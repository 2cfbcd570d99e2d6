//! # Constellation
//!
//! An animated field of drifting particles that link up with faint lines when
//! they pass close to each other and shy away from the pointer.
//!
//! The simulation is host independent. A [`ParticleField`] holds the
//! particles and knows how to integrate and draw them onto any
//! [`DrawingSurface`]; a [`Constellation`] wraps it with a resize throttle
//! and the frame loop. Two hosts are provided:
//!
//! - native: a winit window rendered with wgpu, see [`window::run`]
//! - `wasm32`: a `<canvas>` driven by `requestAnimationFrame`, see `web::start`
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(not(target_arch = "wasm32"))]
//! # fn main() -> Result<(), constellation::error::HostError> {
//! use constellation::prelude::*;
//!
//! constellation::window::run(FieldConfig::default())
//! # }
//! # #[cfg(target_arch = "wasm32")]
//! # fn main() {}
//! ```
//!
//! ## Headless
//!
//! Any [`DrawingSurface`] works, including the [`RecordingSurface`] used in
//! tests:
//!
//! ```
//! use constellation::prelude::*;
//!
//! let mut field = ParticleField::with_seed(FieldConfig::default(), 1000, 800, 7);
//! let mut surface = RecordingSurface::new(1000, 800);
//!
//! field.pointer_moved(Vec2::new(500.0, 400.0));
//! field.step();
//! let stats = field.render(&mut surface);
//!
//! assert_eq!(stats.circles, 110);
//! assert_eq!(stats.pairs_checked, 110 * 109 / 2);
//! ```
//!
//! ## Sizing
//!
//! Viewports narrower than 768 px get 60 particles linked within 90 px;
//! wider ones get 110 linked within 140 px. Both are set on [`FieldConfig`].

pub mod config;
pub mod frame;
pub mod input;
pub mod particle;
pub mod simulation;
pub mod spawn;
pub mod surface;
pub mod throttle;
pub mod tilt;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub mod error;
#[cfg(not(target_arch = "wasm32"))]
mod gpu;
#[cfg(not(target_arch = "wasm32"))]
pub mod window;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{FieldConfig, Tier};
pub use frame::{
    CancellationToken, Constellation, FrameOutcome, FrameScheduler, ManualScheduler, Viewport,
};
pub use glam::Vec2;
pub use input::{PointerEvent, PointerState};
pub use particle::Particle;
pub use simulation::{FrameStats, ParticleField};
pub use spawn::SpawnContext;
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface, Rgba};
pub use throttle::{Throttle, ThrottleState};
pub use tilt::{Rect, Tilt};
pub use time::FrameClock;

#[cfg(not(target_arch = "wasm32"))]
pub use gpu::GpuSurface;

/// Convenient re-exports for common usage.
///
/// ```
/// use constellation::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{FieldConfig, Tier};
    pub use crate::frame::{
        CancellationToken, Constellation, FrameOutcome, FrameScheduler, ManualScheduler, Viewport,
    };
    pub use crate::input::{PointerEvent, PointerState};
    pub use crate::particle::Particle;
    pub use crate::simulation::{FrameStats, ParticleField};
    pub use crate::surface::{DrawingSurface, RecordingSurface, Rgba};
    pub use crate::Vec2;
}
