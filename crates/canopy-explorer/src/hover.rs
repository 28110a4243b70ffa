//! Time-windowed coalescing for drag-hover updates.
//!
//! Pointer movement produces hover events far faster than the tree should
//! be rebuilt. [`HoverScheduler`] coalesces them into at most one fire per
//! window with both a leading edge (the first event applies immediately)
//! and a trailing edge (the latest target applies once the window closes).
//! [`HoverScheduler::cancel`] suppresses a pending trailing fire so a
//! stale placeholder insertion cannot race a drag-end clear.
//!
//! The scheduler is plain `Instant` arithmetic: callers pass `now` in and
//! drive [`HoverScheduler::poll`] from their event loop or timer, which
//! keeps the behavior fully deterministic under test.

use std::time::{Duration, Instant};

/// Default coalescing window for hover updates.
pub const DEFAULT_HOVER_WINDOW: Duration = Duration::from_millis(10);

/// Leading/trailing throttle over hover targets.
#[derive(Debug)]
pub struct HoverScheduler {
    window: Duration,
    last_fire: Option<Instant>,
    pending: Option<String>,
}

impl Default for HoverScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_WINDOW)
    }
}

impl HoverScheduler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fire: None,
            pending: None,
        }
    }

    /// Offer a hover target at `now`.
    ///
    /// Returns the target when it should be applied immediately (leading
    /// edge); otherwise records it for the trailing edge and returns
    /// `None`.
    pub fn offer(&mut self, target: impl Into<String>, now: Instant) -> Option<String> {
        match self.last_fire {
            Some(last) if now.duration_since(last) < self.window => {
                self.pending = Some(target.into());
                None
            }
            _ => {
                self.last_fire = Some(now);
                Some(target.into())
            }
        }
    }

    /// Release the trailing-edge target if the window has closed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let last = self.last_fire?;
        if self.pending.is_some() && now.duration_since(last) >= self.window {
            self.last_fire = Some(now);
            return self.pending.take();
        }
        None
    }

    /// Drop any pending trailing fire. Called on drag-end and drag-leave.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns `true` if a trailing fire is waiting on the window.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending trailing fire becomes due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.pending.is_some() {
            self.last_fire.map(|last| last + self.window)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(10);

    #[test]
    fn first_offer_fires_on_the_leading_edge() {
        let mut scheduler = HoverScheduler::new(WINDOW);
        let now = Instant::now();
        assert_eq!(scheduler.offer("a", now), Some("a".to_string()));
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn offers_within_the_window_are_deferred() {
        let mut scheduler = HoverScheduler::new(WINDOW);
        let now = Instant::now();
        scheduler.offer("a", now);
        assert_eq!(scheduler.offer("b", now + Duration::from_millis(3)), None);
        assert!(scheduler.has_pending());
    }

    #[test]
    fn trailing_edge_releases_the_latest_target() {
        let mut scheduler = HoverScheduler::new(WINDOW);
        let now = Instant::now();
        scheduler.offer("a", now);
        scheduler.offer("b", now + Duration::from_millis(2));
        scheduler.offer("c", now + Duration::from_millis(4));

        assert_eq!(scheduler.poll(now + Duration::from_millis(5)), None);
        assert_eq!(
            scheduler.poll(now + Duration::from_millis(10)),
            Some("c".to_string())
        );
        // Nothing left after the trailing fire.
        assert_eq!(scheduler.poll(now + Duration::from_millis(30)), None);
    }

    #[test]
    fn offer_after_a_quiet_window_fires_immediately_again() {
        let mut scheduler = HoverScheduler::new(WINDOW);
        let now = Instant::now();
        scheduler.offer("a", now);
        assert_eq!(
            scheduler.offer("b", now + Duration::from_millis(15)),
            Some("b".to_string())
        );
    }

    #[test]
    fn cancel_suppresses_the_trailing_fire() {
        let mut scheduler = HoverScheduler::new(WINDOW);
        let now = Instant::now();
        scheduler.offer("a", now);
        scheduler.offer("b", now + Duration::from_millis(2));
        scheduler.cancel();
        assert_eq!(scheduler.poll(now + Duration::from_millis(20)), None);
    }

    #[test]
    fn deadline_tracks_the_open_window() {
        let mut scheduler = HoverScheduler::new(WINDOW);
        let now = Instant::now();
        assert_eq!(scheduler.next_deadline(), None);
        scheduler.offer("a", now);
        scheduler.offer("b", now + Duration::from_millis(1));
        assert_eq!(scheduler.next_deadline(), Some(now + WINDOW));
    }
}
