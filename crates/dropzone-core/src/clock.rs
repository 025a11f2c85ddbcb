#![forbid(unsafe_code)]

//! Frame clock: turns display-refresh timestamps into per-tick deltas.
//!
//! The host calls [`FrameClock::tick`] once per display refresh with the
//! current monotonic time. The first tick after construction or
//! [`reset`](FrameClock::reset) yields `Duration::ZERO`, so an animation
//! never starts with the time that passed while nothing was running.
//! Clamping of large deltas is left to the integrators.

use std::time::Duration;

use web_time::Instant;

/// Measures elapsed time between consecutive frame ticks.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    frames: u64,
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tick at `now`, returning the time since the previous tick.
    ///
    /// A timestamp earlier than the previous one yields zero.
    pub fn tick(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.frames += 1;
        dt
    }

    /// Number of ticks recorded since the last reset.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the previous tick.
    pub fn reset(&mut self) {
        self.last = None;
        self.frames = 0;
    }
}
