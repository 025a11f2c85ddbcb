#![forbid(unsafe_code)]

//! Settling integrators.
//!
//! An integrator is a pure step function: it takes the scratch state of one
//! animation run plus the elapsed frame time and returns the next state. It
//! owns its tuning and, for the spring, the target of the run. Nothing here
//! knows about gestures or committed offsets; see
//! [`MotionController`](crate::controller::MotionController) for that.
//!
//! Two variants exist:
//!
//! - [`SpringIntegrator`]: damped harmonic oscillator pulling toward a target.
//! - [`DecayIntegrator`]: inertial motion with exponential velocity decay and
//!   no target.
//!
//! Both clamp the frame delta to a per-integrator maximum before stepping, so
//! a stalled frame never feeds a huge `dt` into the physics.

pub mod decay;
pub mod spring;

use std::time::Duration;

pub use decay::{DecayConfig, DecayIntegrator};
pub use spring::{SpringConfig, SpringIntegrator};

/// Default frame-delta ceiling: one nominal 60 Hz frame.
pub const DEFAULT_MAX_FRAME_DT: Duration = Duration::from_nanos(16_666_667);

/// Scratch state of a single animation run.
///
/// Created when a gesture is released and discarded when the run finishes or
/// is cancelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    /// Current coordinate.
    pub position: f64,
    /// Current velocity in units per second.
    pub velocity: f64,
    /// Simulated time since the run started (after frame clamping).
    pub elapsed: Duration,
    /// Set once the run has come to rest. Finished states never change.
    pub finished: bool,
}

impl SimulationState {
    /// Fresh state for a run released at `position` with `velocity`.
    #[must_use]
    pub fn launch(position: f64, velocity: f64) -> Self {
        Self {
            position,
            velocity,
            elapsed: Duration::ZERO,
            finished: false,
        }
    }

    /// Both position and velocity are finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// A pure numerical step function for one animation run.
pub trait Integrator {
    /// Advance `state` by `dt`, returning the next state.
    ///
    /// Implementations must return `state` unchanged when it is already
    /// finished.
    fn step(&self, state: &SimulationState, dt: Duration) -> SimulationState;

    /// Where the run will come to rest, if that is known in advance.
    fn rest_target(&self) -> Option<f64> {
        None
    }
}

/// The integrator driving one run, chosen by the configured motion mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Spring(SpringIntegrator),
    Decay(DecayIntegrator),
}

impl Integrator for Motion {
    fn step(&self, state: &SimulationState, dt: Duration) -> SimulationState {
        match self {
            Motion::Spring(spring) => spring.step(state, dt),
            Motion::Decay(decay) => decay.step(state, dt),
        }
    }

    fn rest_target(&self) -> Option<f64> {
        match self {
            Motion::Spring(spring) => spring.rest_target(),
            Motion::Decay(decay) => decay.rest_target(),
        }
    }
}

/// Clamp a frame delta to `max`.
#[inline]
#[must_use]
pub(crate) fn clamp_frame_dt(dt: Duration, max: Duration) -> Duration {
    dt.min(max)
}
