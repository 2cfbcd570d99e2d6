//! The frame loop.
//!
//! [`Constellation`] ties a [`ParticleField`] to a host: it takes pointer and
//! resize notifications, and on every frame callback it applies a due resize,
//! integrates, renders, and asks the [`FrameScheduler`] for the next frame.
//! The loop runs until its [`CancellationToken`] is cancelled; the default
//! token never is.
//! A frame drawn into a viewport with no area suspends the loop until the
//! host calls [`Constellation::resume`].
//!
//! ```ignore
//! let mut app = Constellation::new(FieldConfig::default(), &viewport, &mut surface);
//! app.start(&mut scheduler);
//!
//! // host frame callback
//! app.frame(Instant::now(), &viewport, &mut surface, &mut scheduler);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec2;
use log::{debug, info};
use web_time::Instant;

use crate::config::FieldConfig;
use crate::input::PointerEvent;
use crate::simulation::{FrameStats, ParticleField};
use crate::surface::DrawingSurface;
use crate::throttle::Throttle;
use crate::time::FrameClock;

/// Schedules the next frame callback, typically at the next display refresh.
pub trait FrameScheduler {
    /// Ask for the frame callback to run once more.
    fn request_frame(&mut self);
}

/// Reads the host viewport size at the time a resize is handled.
pub trait Viewport {
    fn viewport_size(&self) -> (u32, u32);
}

impl Viewport for (u32, u32) {
    fn viewport_size(&self) -> (u32, u32) {
        *self
    }
}

/// Shared flag that stops a frame loop.
///
/// Clones share the flag. A fresh token is never cancelled unless someone
/// calls [`CancellationToken::cancel`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token nobody cancels unless they hold a clone of it.
    pub fn never() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Scheduler for headless hosts and tests: records requests, runs nothing.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    requested: bool,
    total_requests: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the outstanding request, if any.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.requested)
    }

    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Requests made over the scheduler's lifetime.
    pub fn total_requests(&self) -> u64 {
        self.total_requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.requested = true;
        self.total_requests += 1;
    }
}

/// Result of one frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was drawn and the next one requested.
    Continue(FrameStats),
    /// The viewport has no area (e.g. a minimized window). The frame was
    /// drawn but no next frame was requested; see [`Constellation::resume`].
    Suspended(FrameStats),
    /// The token was cancelled; nothing was drawn and no frame requested.
    Stopped,
}

/// The running constellation: particle field, resize throttle and frame loop.
#[derive(Debug)]
pub struct Constellation {
    field: ParticleField,
    throttle: Throttle,
    clock: Option<FrameClock>,
    token: CancellationToken,
    suspended: bool,
}

impl Constellation {
    /// Size `surface` to the viewport and fill it with particles.
    pub fn new<V, S>(config: FieldConfig, viewport: &V, surface: &mut S) -> Self
    where
        V: Viewport + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        let (width, height) = viewport.viewport_size();
        surface.set_size(width, height);
        Self::from_field(ParticleField::new(config, width, height))
    }

    /// Drive an existing field. The surface is assumed to match its size.
    pub fn from_field(field: ParticleField) -> Self {
        let throttle = Throttle::new(field.config().resize_throttle);
        Self {
            field,
            throttle,
            clock: None,
            token: CancellationToken::never(),
            suspended: false,
        }
    }

    /// Replace the cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Whether the loop stopped rescheduling because the viewport has no area.
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.clock.as_ref().map_or(0, FrameClock::frame)
    }

    /// Request the first frame.
    pub fn start<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        info!(
            "starting constellation with {} particles",
            self.field.particles().len()
        );
        scheduler.request_frame();
    }

    /// Restart a suspended loop. Hosts call this when the viewport changes.
    /// Does nothing while frames are still being scheduled.
    pub fn resume<F: FrameScheduler + ?Sized>(&mut self, scheduler: &mut F) {
        if self.suspended && !self.token.is_cancelled() {
            self.suspended = false;
            debug!("frame loop resumed");
            scheduler.request_frame();
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.field.pointer_moved(position);
    }

    pub fn pointer_left(&mut self) {
        self.field.pointer_left();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.field.handle_pointer(event);
    }

    /// Note a viewport resize. Returns whether it was accepted by the
    /// throttle; the reinitialization itself happens in the first frame
    /// after the throttle window closes.
    pub fn resized(&mut self, now: Instant) -> bool {
        let accepted = self.throttle.trigger(now);
        if !accepted {
            debug!("resize dropped by throttle");
        }
        accepted
    }

    /// Apply a pending resize whose throttle window has elapsed.
    ///
    /// Returns `true` if the field was reinitialized.
    pub fn apply_resize<V, S>(&mut self, now: Instant, viewport: &V, surface: &mut S) -> bool
    where
        V: Viewport + ?Sized,
        S: DrawingSurface + ?Sized,
    {
        if !self.throttle.poll(now) {
            return false;
        }
        let (width, height) = viewport.viewport_size();
        surface.set_size(width, height);
        self.field.resize(width, height);
        debug!("reinitialized field at {}x{}", width, height);
        true
    }

    /// One frame callback: resize if due, integrate, render, reschedule.
    pub fn frame<V, S, F>(
        &mut self,
        now: Instant,
        viewport: &V,
        surface: &mut S,
        scheduler: &mut F,
    ) -> FrameOutcome
    where
        V: Viewport + ?Sized,
        S: DrawingSurface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.token.is_cancelled() {
            debug!("frame loop cancelled");
            return FrameOutcome::Stopped;
        }

        self.apply_resize(now, viewport, surface);
        self.field.step();
        let stats = self.field.render(surface);

        let clock = self.clock.get_or_insert_with(|| FrameClock::new(now));
        if let Some(fps) = clock.tick(now) {
            info!(
                "{:.1} fps, {} particles, {} links",
                fps, stats.circles, stats.links
            );
        }

        let (width, height) = viewport.viewport_size();
        if width == 0 || height == 0 {
            debug!("viewport has no area, suspending frame loop");
            self.suspended = true;
            return FrameOutcome::Suspended(stats);
        }

        scheduler.request_frame();
        FrameOutcome::Continue(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use web_time::Duration;

    fn setup(viewport: (u32, u32)) -> (Constellation, RecordingSurface, ManualScheduler) {
        let mut surface = RecordingSurface::new(0, 0);
        let field = ParticleField::with_seed(FieldConfig::default(), viewport.0, viewport.1, 5);
        surface.set_size(viewport.0, viewport.1);
        (Constellation::from_field(field), surface, ManualScheduler::new())
    }

    #[test]
    fn test_new_sizes_surface_to_viewport() {
        let mut surface = RecordingSurface::new(0, 0);
        let app = Constellation::new(FieldConfig::default(), &(500u32, 300u32), &mut surface);
        assert_eq!((surface.width(), surface.height()), (500, 300));
        assert_eq!(app.field().particles().len(), 60);
    }

    #[test]
    fn test_frame_requests_next_frame() {
        let (mut app, mut surface, mut scheduler) = setup((1000, 800));
        app.start(&mut scheduler);
        assert!(scheduler.take_request());

        let outcome = app.frame(Instant::now(), &(1000u32, 800u32), &mut surface, &mut scheduler);
        assert!(matches!(outcome, FrameOutcome::Continue(s) if s.circles == 110));
        assert!(scheduler.take_request());
        assert_eq!(app.frames(), 1);
    }

    #[test]
    fn test_cancelled_loop_stops_rescheduling() {
        let token = CancellationToken::never();
        let (app, mut surface, mut scheduler) = setup((1000, 800));
        let mut app = app.with_cancellation(token.clone());

        app.frame(Instant::now(), &(1000u32, 800u32), &mut surface, &mut scheduler);
        assert!(scheduler.take_request());

        token.cancel();
        let outcome = app.frame(Instant::now(), &(1000u32, 800u32), &mut surface, &mut scheduler);
        assert_eq!(outcome, FrameOutcome::Stopped);
        assert!(!scheduler.is_requested());
    }

    #[test]
    fn test_empty_viewport_suspends_until_resumed() {
        let (mut app, mut surface, mut scheduler) = setup((1000, 800));
        let minimized = (0u32, 0u32);

        let outcome = app.frame(Instant::now(), &minimized, &mut surface, &mut scheduler);
        assert!(matches!(outcome, FrameOutcome::Suspended(_)));
        assert!(app.is_suspended());
        assert!(!scheduler.is_requested());

        app.resume(&mut scheduler);
        assert!(scheduler.take_request());
        assert!(!app.is_suspended());

        // Resuming a running loop must not double-schedule
        app.resume(&mut scheduler);
        assert!(!scheduler.is_requested());
    }

    #[test]
    fn test_resize_applied_after_window() {
        let (mut app, mut surface, mut scheduler) = setup((1000, 800));
        let t0 = Instant::now();
        let narrow = (500u32, 800u32);

        assert!(app.resized(t0));
        app.frame(t0 + Duration::from_millis(16), &narrow, &mut surface, &mut scheduler);
        assert_eq!(app.field().particles().len(), 110);

        app.frame(t0 + Duration::from_millis(128), &narrow, &mut surface, &mut scheduler);
        assert_eq!(app.field().particles().len(), 60);
        assert_eq!(surface.width(), 500);
    }
}
