#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) integrator.
//!
//! Pulls a released element toward the drop-zone target chosen at release:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!   a = F / mass
//!
//! # Parameters
//!
//! - **mass** (m): Inertia. Heavier springs respond more slowly.
//! - **stiffness** (k): Restoring force strength. Higher = faster response.
//! - **damping** (c): Velocity drag.
//!   - Underdamped (c < 2√(km)): oscillates past target before settling
//!   - Critically damped (c = 2√(km)): fastest convergence without overshoot
//!   - Overdamped (c > 2√(km)): slow convergence, no overshoot
//! - **rest thresholds**: the run finishes once both `|velocity|` and
//!   `|position - target|` are below their thresholds.
//! - **overshoot_clamping**: stop dead at the target instead of swinging past.
//!
//! # Integration
//!
//! Semi-implicit Euler over the actual frame time. The frame delta is first
//! clamped to `max_frame_dt`, then subdivided into steps of at most 4ms.
//!
//! # Invariants
//!
//! 1. A finished state has `position == target` and `velocity == 0.0`.
//! 2. A state already inside both rest thresholds finishes on the next step,
//!    whatever the frame delta.
//! 3. With overshoot clamping the position never crosses the target.
//! 4. Stepping is deterministic for identical inputs.

use std::time::Duration;

#[cfg(feature = "motion-config")]
use serde::{Deserialize, Serialize};

use super::{DEFAULT_MAX_FRAME_DT, Integrator, SimulationState, clamp_frame_dt};

/// Maximum dt per integration substep (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Spring tuning for one axis.
///
/// Defaults match a firm, slightly underdamped drag-and-drop feel: mass 1,
/// stiffness 200, damping 20.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "motion-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "motion-config", serde(default))]
pub struct SpringConfig {
    pub mass: f64,
    pub stiffness: f64,
    pub damping: f64,
    /// Speed (units/s) below which the spring may come to rest.
    pub rest_speed_threshold: f64,
    /// Distance from target below which the spring may come to rest.
    pub rest_displacement_threshold: f64,
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 200.0,
            damping: 20.0,
            rest_speed_threshold: 0.001,
            rest_displacement_threshold: 0.001,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Damping coefficient at which this spring is critically damped.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Damping ratio ζ = c / c_crit.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.critical_damping()
    }

    /// Critically damped spring with the given stiffness and unit mass.
    #[must_use]
    pub fn critical(stiffness: f64) -> Self {
        let mut config = Self {
            stiffness,
            ..Self::default()
        };
        config.damping = config.critical_damping();
        config
    }

    /// Low stiffness, heavy damping. Smooth and slow.
    #[must_use]
    pub fn gentle() -> Self {
        Self {
            stiffness: 120.0,
            damping: 20.0,
            ..Self::default()
        }
    }

    /// High stiffness, light damping. Visible bounce around the zone.
    #[must_use]
    pub fn bouncy() -> Self {
        Self {
            stiffness: 300.0,
            damping: 10.0,
            ..Self::default()
        }
    }

    /// Returns a list of problems; empty means the config is usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.mass.is_finite() && self.mass > 0.0) {
            errors.push(format!("spring.mass must be > 0, got {}", self.mass));
        }
        if !(self.stiffness.is_finite() && self.stiffness > 0.0) {
            errors.push(format!(
                "spring.stiffness must be > 0, got {}",
                self.stiffness
            ));
        }
        // Without damping the oscillation never decays into the rest thresholds.
        if !(self.damping.is_finite() && self.damping > 0.0) {
            errors.push(format!("spring.damping must be > 0, got {}", self.damping));
        }
        if !(self.rest_speed_threshold.is_finite() && self.rest_speed_threshold > 0.0) {
            errors.push(format!(
                "spring.rest_speed_threshold must be > 0, got {}",
                self.rest_speed_threshold
            ));
        }
        if !(self.rest_displacement_threshold.is_finite() && self.rest_displacement_threshold > 0.0)
        {
            errors.push(format!(
                "spring.rest_displacement_threshold must be > 0, got {}",
                self.rest_displacement_threshold
            ));
        }
        errors
    }
}

/// Spring integrator for a single run toward a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct SpringIntegrator {
    config: SpringConfig,
    target: f64,
    max_frame_dt: Duration,
}

impl SpringIntegrator {
    #[must_use]
    pub fn new(config: SpringConfig, target: f64) -> Self {
        Self {
            config,
            target,
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
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    fn is_at_rest(&self, position: f64, velocity: f64) -> bool {
        velocity.abs() < self.config.rest_speed_threshold
            && (position - self.target).abs() < self.config.rest_displacement_threshold
    }

    fn settle(&self, mut state: SimulationState) -> SimulationState {
        state.position = self.target;
        state.velocity = 0.0;
        state.finished = true;
        state
    }

    /// One semi-implicit Euler substep of `h` seconds.
    fn substep(&self, state: &mut SimulationState, h: f64) {
        let displacement = state.position - self.target;
        let spring_force = -self.config.stiffness * displacement;
        let damping_force = -self.config.damping * state.velocity;
        let acceleration = (spring_force + damping_force) / self.config.mass;

        state.velocity += acceleration * h;
        state.position += state.velocity * h;
    }
}

impl Integrator for SpringIntegrator {
    fn step(&self, state: &SimulationState, dt: Duration) -> SimulationState {
        if state.finished {
            return *state;
        }
        if self.is_at_rest(state.position, state.velocity) {
            return self.settle(*state);
        }

        let dt = clamp_frame_dt(dt, self.max_frame_dt);
        let mut next = *state;
        next.elapsed += dt;

        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let before = next.position - self.target;
            self.substep(&mut next, h);
            remaining -= h;

            if self.config.overshoot_clamping {
                let after = next.position - self.target;
                if before != 0.0 && (after == 0.0 || after.signum() != before.signum()) {
                    return self.settle(next);
                }
            }
        }

        if self.is_at_rest(next.position, next.velocity) {
            return self.settle(next);
        }
        next
    }

    fn rest_target(&self) -> Option<f64> {
        Some(self.target)
    }
}
