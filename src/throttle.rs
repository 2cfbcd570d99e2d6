//! Trailing-edge throttle for resize handling.
//!
//! The first trigger opens a cooldown window and becomes the pending call.
//! Triggers inside the window are dropped, not queued. When the window has
//! elapsed, the next [`Throttle::poll`] fires the pending call and only then
//! does the throttle accept triggers again.
//!
//! ```ignore
//! let mut throttle = Throttle::new(Duration::from_millis(120));
//! throttle.trigger(t0);                  // accepted
//! throttle.trigger(t0 + ms(30));         // dropped
//! assert!(throttle.poll(t0 + ms(120)));  // fires
//! ```

use web_time::{Duration, Instant};

/// Throttle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrottleState {
    /// Nothing pending; the next trigger is accepted.
    #[default]
    Idle,
    /// A call is pending and fires once `until` has passed.
    Cooldown { until: Instant },
}

/// At most one call per `wait`, fired at the end of the window.
#[derive(Debug, Clone)]
pub struct Throttle {
    wait: Duration,
    state: ThrottleState,
}

impl Throttle {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            state: ThrottleState::Idle,
        }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn state(&self) -> ThrottleState {
        self.state
    }

    /// Whether a call is waiting to fire.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ThrottleState::Cooldown { .. })
    }

    /// When the pending call is due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            ThrottleState::Idle => None,
            ThrottleState::Cooldown { until } => Some(until),
        }
    }

    /// Request a call. Returns `true` if accepted, `false` if dropped.
    pub fn trigger(&mut self, now: Instant) -> bool {
        match self.state {
            ThrottleState::Idle => {
                self.state = ThrottleState::Cooldown {
                    until: now + self.wait,
                };
                true
            }
            ThrottleState::Cooldown { .. } => false,
        }
    }

    /// Returns `true` exactly once per accepted trigger, when its window has
    /// elapsed. The throttle is idle again afterwards.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            ThrottleState::Cooldown { until } if now >= until => {
                self.state = ThrottleState::Idle;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_trigger_accepted() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(120));
        assert!(throttle.trigger(t0));
        assert_eq!(throttle.deadline(), Some(t0 + ms(120)));
    }

    #[test]
    fn test_triggers_inside_window_dropped() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(120));
        assert!(throttle.trigger(t0));
        assert!(!throttle.trigger(t0 + ms(30)));
        assert!(!throttle.trigger(t0 + ms(60)));

        // Dropped triggers do not extend the window
        assert_eq!(throttle.deadline(), Some(t0 + ms(120)));
    }

    #[test]
    fn test_poll_fires_once_after_wait() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(120));
        throttle.trigger(t0);

        assert!(!throttle.poll(t0 + ms(119)));
        assert!(throttle.poll(t0 + ms(120)));
        assert!(!throttle.poll(t0 + ms(121)));
        assert_eq!(throttle.state(), ThrottleState::Idle);
    }

    #[test]
    fn test_window_reopens_only_after_fire() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(ms(120));
        throttle.trigger(t0);

        // Wait elapsed but the pending call has not fired yet
        assert!(!throttle.trigger(t0 + ms(150)));
        assert!(throttle.poll(t0 + ms(150)));
        assert!(throttle.trigger(t0 + ms(151)));
    }

    #[test]
    fn test_poll_when_idle_is_noop() {
        let mut throttle = Throttle::new(ms(120));
        assert!(!throttle.poll(Instant::now()));
        assert!(!throttle.is_pending());
    }
}
