#![forbid(unsafe_code)]

//! Per-axis motion controller: the drag/settle/rest state machine.
//!
//! [`MotionController`] owns one axis of the draggable element. It consumes
//! gesture phases and samples, and on every frame tick produces the
//! coordinate the presentation layer should render.
//!
//! # State Machine
//!
//! ```text
//!            Active                  Ended (from Dragging)
//!  Resting ─────────▶ Dragging ─────────────────────────▶ Settling
//!     ▲                 │  ▲                                │
//!     │      Idle       │  │            Active              │
//!     ◀─────────────────┘  └────────────────────────────────┤
//!     │                                                     │
//!     └──────────────────── run finished ◀──────────────────┘
//! ```
//!
//! - Entering **Dragging** snapshots `committed = rendered`, so the element
//!   is picked up where it is, including mid-flight. Any run is dropped.
//! - While **Dragging**, `rendered = committed + delta`.
//! - Releasing starts one run from the released position and velocity. In
//!   spring mode the run targets the nearest coordinate of the axis'
//!   [`TargetSet`].
//! - Each frame tick while **Settling** steps the integrator. When it
//!   finishes, `committed = rendered` and the controller rests.
//!
//! # Invariants
//!
//! 1. At most one run exists per controller. A run is only created on
//!    release, and entering Dragging drops the previous run whole, so scratch
//!    state from two runs never mixes.
//! 2. `committed` and `rendered` are always finite.
//! 3. Once resting after a run, `rendered == committed` with no residual
//!    velocity, and further frame ticks change nothing.
//!
//! # Failure Modes
//!
//! - Non-finite delta: the sample is dropped and the last rendered value
//!   kept.
//! - Non-finite release velocity: treated as zero.
//! - Non-finite integrator output: the run is aborted. A spring run rests on
//!   its target; a decay run rests at its last finite position.

use std::time::Duration;

use crate::animation::{Integrator, Motion, SimulationState};
use crate::config::MotionConfig;
use crate::error::ConfigError;
use crate::gesture::{Phase, Sample};
#[cfg(feature = "tracing")]
use crate::logging::{TARGET, debug, warn};
use crate::targets::{Axis, TargetSet};

/// Externally visible state of an axis controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Following the pointer.
    Dragging,
    /// Released; an integrator is carrying the element to rest.
    Settling,
    /// Not moving.
    Resting,
}

/// One settling animation: its integrator and its scratch state.
#[derive(Debug, Clone, PartialEq)]
struct Run {
    motion: Motion,
    state: SimulationState,
}

/// Drag-and-release state machine for a single axis.
#[derive(Debug, Clone)]
pub struct MotionController {
    targets: TargetSet,
    config: MotionConfig,
    committed: f64,
    rendered: f64,
    dragging: bool,
    run: Option<Run>,
}

impl MotionController {
    /// Create a resting controller at `initial_offset`.
    pub fn new(
        targets: TargetSet,
        initial_offset: f64,
        config: MotionConfig,
    ) -> Result<Self, ConfigError> {
        if !initial_offset.is_finite() {
            return Err(ConfigError::NonFiniteOffset {
                axis: targets.axis(),
                value: initial_offset,
            });
        }
        config.check()?;
        Ok(Self {
            targets,
            config,
            committed: initial_offset,
            rendered: initial_offset,
            dragging: false,
            run: None,
        })
    }

    #[inline]
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.targets.axis()
    }

    #[inline]
    #[must_use]
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Coordinate to render right now.
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.rendered
    }

    /// Base coordinate carried between gestures.
    #[inline]
    #[must_use]
    pub fn committed_offset(&self) -> f64 {
        self.committed
    }

    #[must_use]
    pub fn state(&self) -> ControllerState {
        if self.dragging {
            ControllerState::Dragging
        } else if self.run.is_some() {
            ControllerState::Settling
        } else {
            ControllerState::Resting
        }
    }

    /// Whether a settling run is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// Scratch state of the in-flight run, if any.
    #[must_use]
    pub fn simulation(&self) -> Option<&SimulationState> {
        self.run.as_ref().map(|run| &run.state)
    }

    /// Target of the in-flight run (spring mode only).
    #[must_use]
    pub fn run_target(&self) -> Option<f64> {
        self.run.as_ref().and_then(|run| run.motion.rest_target())
    }

    /// Feed one gesture event. Returns the coordinate to render.
    pub fn on_gesture(&mut self, phase: Phase, sample: Sample) -> f64 {
        match phase {
            Phase::Active => {
                if !self.dragging {
                    self.begin_drag();
                }
                self.track(sample.delta);
            }
            Phase::Ended => {
                // Repeated Ended events, or Ended without a drag, never
                // restart a run.
                if self.dragging {
                    self.track(sample.delta);
                    self.release(sample.velocity);
                }
            }
            Phase::Idle => {
                // A drag that ends without a release stays where it was
                // dropped. Idle while settling lets the run continue.
                if self.dragging {
                    self.track(sample.delta);
                    self.dragging = false;
                    self.committed = self.rendered;
                }
            }
        }
        self.rendered
    }

    /// Advance the in-flight run by `dt`. Returns the coordinate to render.
    ///
    /// Without a run this is a no-op.
    pub fn on_frame(&mut self, dt: Duration) -> f64 {
        let Some(run) = self.run.as_mut() else {
            return self.rendered;
        };

        let next = run.motion.step(&run.state, dt);
        if !next.is_finite() {
            let rest = run.motion.rest_target().unwrap_or(run.state.position);
            #[cfg(feature = "tracing")]
            warn!(
                target: TARGET,
                axis = %self.targets.axis(),
                rest,
                "integrator produced a non-finite state; aborting run"
            );
            self.finish_at(rest);
            return self.rendered;
        }

        run.state = next;
        self.rendered = next.position;
        if next.finished {
            #[cfg(feature = "tracing")]
            debug!(
                target: TARGET,
                axis = %self.targets.axis(),
                position = next.position,
                elapsed_ms = next.elapsed.as_secs_f64() * 1000.0,
                "settling run finished"
            );
            self.finish_at(next.position);
        }
        self.rendered
    }

    fn begin_drag(&mut self) {
        if let Some(_run) = self.run.take() {
            #[cfg(feature = "tracing")]
            debug!(
                target: TARGET,
                axis = %self.targets.axis(),
                position = self.rendered,
                "settling run cancelled by new drag"
            );
        }
        self.committed = self.rendered;
        self.dragging = true;
    }

    fn track(&mut self, delta: f64) {
        let position = self.committed + delta;
        if position.is_finite() {
            self.rendered = position;
        } else {
            #[cfg(feature = "tracing")]
            warn!(
                target: TARGET,
                axis = %self.targets.axis(),
                delta,
                "dropping non-finite drag sample"
            );
        }
    }

    fn release(&mut self, velocity: f64) {
        self.dragging = false;
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let position = self.rendered;
        let target = self.targets.nearest(position);
        let motion = self.config.launch(target);
        #[cfg(feature = "tracing")]
        debug!(
            target: TARGET,
            axis = %self.targets.axis(),
            position,
            velocity,
            rest_target = ?motion.rest_target(),
            "settling run started"
        );
        // Replace the whole run so target and scratch state stay paired.
        self.run = Some(Run {
            motion,
            state: SimulationState::launch(position, velocity),
        });
    }

    fn finish_at(&mut self, position: f64) {
        self.run = None;
        self.committed = position;
        self.rendered = position;
    }
}
