//! Pointer input for the particle field.
//!
//! Hosts translate their own events into [`PointerEvent`]s and feed them to
//! [`ParticleField::handle_pointer`](crate::ParticleField::handle_pointer).
//! The native host gets that translation from [`pointer_event`].
//!
//! Host coordinates are taken as surface coordinates: both hosts size the
//! surface to the full viewport with its origin at the viewport origin.

use glam::Vec2;

/// A pointer notification from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to this position.
    Moved(Vec2),
    /// Pointer left the surface.
    Left,
}

/// Where the pointer is, if it is over the surface at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
}

impl PointerState {
    /// No pointer over the surface.
    pub fn absent() -> Self {
        Self::default()
    }

    /// Current pointer position.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }

    /// Record a move. Non-finite coordinates count as the pointer leaving,
    /// so NaN never reaches the integrator.
    pub fn moved(&mut self, position: Vec2) {
        self.position = position.is_finite().then_some(position);
    }

    pub fn left(&mut self) {
        self.position = None;
    }

    pub fn apply(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved(pos) => self.moved(pos),
            PointerEvent::Left => self.left(),
        }
    }
}

/// Translate a winit window event into a pointer event, if it is one.
#[cfg(not(target_arch = "wasm32"))]
pub fn pointer_event(event: &winit::event::WindowEvent) -> Option<PointerEvent> {
    use winit::event::WindowEvent;

    match event {
        WindowEvent::CursorMoved { position, .. } => Some(PointerEvent::Moved(Vec2::new(
            position.x as f32,
            position.y as f32,
        ))),
        WindowEvent::CursorLeft { .. } => Some(PointerEvent::Left),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_starts_absent() {
        let pointer = PointerState::default();
        assert!(!pointer.is_present());
        assert_eq!(pointer.position(), None);
    }

    #[test]
    fn test_move_then_leave() {
        let mut pointer = PointerState::absent();
        pointer.apply(PointerEvent::Moved(Vec2::new(10.0, 20.0)));
        assert_eq!(pointer.position(), Some(Vec2::new(10.0, 20.0)));

        pointer.apply(PointerEvent::Left);
        assert!(!pointer.is_present());
    }

    #[test]
    fn test_origin_is_a_valid_position() {
        let mut pointer = PointerState::absent();
        pointer.moved(Vec2::ZERO);
        assert_eq!(pointer.position(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_non_finite_move_counts_as_absent() {
        let mut pointer = PointerState::absent();
        pointer.moved(Vec2::new(10.0, 10.0));
        pointer.moved(Vec2::new(f32::NAN, 10.0));
        assert!(!pointer.is_present());

        pointer.moved(Vec2::new(f32::INFINITY, 0.0));
        assert!(!pointer.is_present());
    }
}
