#![forbid(unsafe_code)]

//! Inertial decay integrator.
//!
//! The released element keeps its momentum and slows down geometrically:
//! every millisecond the velocity is multiplied by `deceleration`. Position
//! advances by the exact integral of that velocity over the frame, so the
//! result does not depend on how the time is sliced into frames.
//!
//!   v(t) = v0 · d^t              (t in ms)
//!   Δx   = v0 · (d^T - 1) / ln d (v0 in units/ms)
//!
//! Decay has no target: the element rests wherever its momentum runs out.
//!
//! # Invariants
//!
//! 1. `|velocity|` never increases from one step to the next.
//! 2. The run finishes once `|velocity| < rest_velocity_threshold`, with the
//!    velocity zeroed.

use std::time::Duration;

#[cfg(feature = "motion-config")]
use serde::{Deserialize, Serialize};

use super::{DEFAULT_MAX_FRAME_DT, Integrator, SimulationState, clamp_frame_dt};

/// Decay tuning for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "motion-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "motion-config", serde(default))]
pub struct DecayConfig {
    /// Per-millisecond velocity retention, in (0, 1).
    pub deceleration: f64,
    /// Speed (units/s) below which the element is considered at rest.
    /// Default 5.0, under a tenth of a unit per 60 Hz frame.
    pub rest_velocity_threshold: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            deceleration: 0.998,
            rest_velocity_threshold: 5.0,
        }
    }
}

impl DecayConfig {
    /// Returns a list of problems; empty means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.deceleration > 0.0 && self.deceleration < 1.0) {
            errors.push(format!(
                "decay.deceleration must be in (0, 1), got {}",
                self.deceleration
            ));
        }
        if !(self.rest_velocity_threshold.is_finite() && self.rest_velocity_threshold > 0.0) {
            errors.push(format!(
                "decay.rest_velocity_threshold must be > 0, got {}",
                self.rest_velocity_threshold
            ));
        }
        errors
    }

    /// Total distance a fling at `velocity` (units/s) travels before stopping.
    #[must_use]
    pub fn projected_distance(&self, velocity: f64) -> f64 {
        // Integral of v0 · d^t over [0, ∞) with t in ms.
        -(velocity / 1000.0) / self.deceleration.ln()
    }
}

/// Decay integrator for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayIntegrator {
    config: DecayConfig,
    max_frame_dt: Duration,
}

impl DecayIntegrator {
    #[must_use]
    pub fn new(config: DecayConfig) -> Self {
        Self {
            config,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
        }
    }

    /// Set the frame-delta ceiling (builder pattern).
    #[must_use]
    pub fn with_max_frame_dt(mut self, max: Duration) -> Self {
        self.max_frame_dt = max;
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    fn settle(mut state: SimulationState) -> SimulationState {
        state.velocity = 0.0;
        state.finished = true;
        state
    }
}

impl Integrator for DecayIntegrator {
    fn step(&self, state: &SimulationState, dt: Duration) -> SimulationState {
        if state.finished {
            return *state;
        }
        if state.velocity.abs() < self.config.rest_velocity_threshold {
            return Self::settle(*state);
        }

        let dt = clamp_frame_dt(dt, self.max_frame_dt);
        let mut next = *state;
        next.elapsed += dt;

        let dt_ms = dt.as_secs_f64() * 1000.0;
        let d = self.config.deceleration;
        let kv = d.powf(dt_ms);
        let v0_per_ms = state.velocity / 1000.0;

        next.position += v0_per_ms * (kv - 1.0) / d.ln();
        next.velocity = state.velocity * kv;

        if next.velocity.abs() < self.config.rest_velocity_threshold {
            return Self::settle(next);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn velocity_never_grows() {
        let decay = DecayIntegrator::new(DecayConfig::default());
        let mut state = SimulationState::launch(0.0, -1_200.0);
        let mut prev = state.velocity.abs();
        while !state.finished {
            state = decay.step(&state, MS_16);
            assert!(state.velocity.abs() <= prev);
            prev = state.velocity.abs();
        }
    }

    #[test]
    fn comes_to_rest_near_projection() {
        let config = DecayConfig::default();
        let decay = DecayIntegrator::new(config);
        let mut state = SimulationState::launch(100.0, 800.0);
        let mut frames = 0;
        while !state.finished && frames < 10_000 {
            state = decay.step(&state, MS_16);
            frames += 1;
        }
        assert!(state.finished);
        assert_eq!(state.velocity, 0.0);
        let expected = 100.0 + config.projected_distance(800.0);
        // The tail below the rest threshold is never travelled.
        let tail = config.projected_distance(config.rest_velocity_threshold);
        assert!(state.position <= expected);
        assert!(state.position >= expected - tail - 1e-9);
    }

    #[test]
    fn frame_slicing_does_not_change_path() {
        let decay = DecayIntegrator::new(DecayConfig::default());
        let start = SimulationState::launch(0.0, 600.0);
        let once = decay.step(&start, MS_16);
        let mut twice = decay.step(&start, Duration::from_millis(8));
        twice = decay.step(&twice, Duration::from_millis(8));
        assert!((once.position - twice.position).abs() < 1e-9);
        assert!((once.velocity - twice.velocity).abs() < 1e-9);
    }

    #[test]
    fn slow_release_finishes_immediately() {
        let decay = DecayIntegrator::new(DecayConfig::default());
        let next = decay.step(&SimulationState::launch(42.0, 1.0), MS_16);
        assert!(next.finished);
        assert_eq!(next.position, 42.0);
    }

    #[test]
    fn no_target() {
        assert_eq!(DecayIntegrator::new(DecayConfig::default()).rest_target(), None);
    }

    #[test]
    fn config_drives_projection() {
        let decay = DecayIntegrator::new(DecayConfig {
            deceleration: 0.99,
            ..DecayConfig::default()
        });
        assert_eq!(decay.config().deceleration, 0.99);
        let short = decay.config().projected_distance(1_000.0);
        let long = DecayConfig::default().projected_distance(1_000.0);
        assert!(short < long);
    }

    #[test]
    fn validate_rejects_out_of_range_deceleration() {
        for d in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let config = DecayConfig {
                deceleration: d,
                ..DecayConfig::default()
            };
            assert_eq!(config.validate().len(), 1, "deceleration {d}");
        }
        assert!(DecayConfig::default().validate().is_empty());
    }
}
