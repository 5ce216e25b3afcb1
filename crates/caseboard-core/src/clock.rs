//! Mission countdown
//!
//! Deadline arithmetic only — display and ticking cadence belong to the
//! presentation layer, which polls [`MissionClock::expired`].

use std::time::{Duration, Instant};

/// Countdown for a timed level
///
/// `start(None)` disarms the clock (untimed level); a disarmed clock never
/// expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionClock {
    deadline: Option<Instant>,
}

impl MissionClock {
    /// Create a disarmed clock
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or disarm) the countdown
    pub fn start(&mut self, seconds: Option<u64>, now: Instant) {
        self.deadline = seconds
            .filter(|&s| s > 0)
            .map(|s| now + Duration::from_secs(s));
    }

    /// Disarm without expiring
    pub fn stop(&mut self) {
        self.deadline = None;
    }

    /// Whether a countdown is armed
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left, `None` when disarmed, zero when past the deadline
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whether the armed deadline has passed
    #[must_use]
    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}
