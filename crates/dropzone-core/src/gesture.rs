#![forbid(unsafe_code)]

//! Gesture bridge: turns pan-handler events into a phase plus per-axis samples.
//!
//! A pan-gesture recognizer in the host reports its handler state together
//! with the translation since the gesture began and the current velocity.
//! [`GestureBridge`] maps that onto the three-valued [`Phase`] the motion
//! controllers understand and packages both axes into one [`GestureFrame`],
//! so the x and y controllers always see the same phase for the same event.
//!
//! # State mapping
//!
//! | Handler state | Phase |
//! |---------------|-------|
//! | `Undetermined` | `Idle` |
//! | `Began`, `Active` | `Active` |
//! | `End` | `Ended` |
//! | `Cancelled` | `Ended` |
//! | `Failed` | `Idle` |
//!
//! A cancelled pan still releases the element so it settles into a zone
//! rather than freezing between zones.
//!
//! # Invariants
//!
//! 1. Input values are passed through untouched; NaN handling is the motion
//!    controller's job.
//! 2. The bridge remembers only the last frame it produced.
//! 3. After `reset()` the bridge reports `Idle` with zero samples.

/// Gesture phase shared by both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// The pointer is down and moving the element.
    Active,
    /// The pointer was released.
    Ended,
}

/// Raw state reported by a host pan-gesture handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerState {
    Undetermined,
    Began,
    Active,
    End,
    Cancelled,
    Failed,
}

impl HandlerState {
    /// Phase this handler state maps to.
    #[must_use]
    pub const fn phase(self) -> Phase {
        match self {
            HandlerState::Undetermined | HandlerState::Failed => Phase::Idle,
            HandlerState::Began | HandlerState::Active => Phase::Active,
            HandlerState::End | HandlerState::Cancelled => Phase::Ended,
        }
    }
}

/// One pan-handler event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlerEvent {
    pub state: HandlerState,
    /// Horizontal translation since the gesture began.
    pub translation_x: f64,
    /// Vertical translation since the gesture began.
    pub translation_y: f64,
    /// Horizontal velocity in units per second.
    pub velocity_x: f64,
    /// Vertical velocity in units per second.
    pub velocity_y: f64,
}

impl HandlerEvent {
    #[must_use]
    pub const fn new(state: HandlerState, translation: (f64, f64), velocity: (f64, f64)) -> Self {
        Self {
            state,
            translation_x: translation.0,
            translation_y: translation.1,
            velocity_x: velocity.0,
            velocity_y: velocity.1,
        }
    }
}

/// Displacement and velocity along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    /// Displacement since the gesture began.
    pub delta: f64,
    /// Instantaneous velocity in units per second.
    pub velocity: f64,
}

impl Sample {
    #[must_use]
    pub const fn new(delta: f64, velocity: f64) -> Self {
        Self { delta, velocity }
    }
}

/// What both axis controllers consume for one gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureFrame {
    pub phase: Phase,
    pub x: Sample,
    pub y: Sample,
}

/// Normalizes handler events into [`GestureFrame`]s.
#[derive(Debug, Clone, Default)]
pub struct GestureBridge {
    last: GestureFrame,
}

impl GestureBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a handler event, remembering it as the last frame.
    pub fn handle(&mut self, event: &HandlerEvent) -> GestureFrame {
        let frame = GestureFrame {
            phase: event.state.phase(),
            x: Sample::new(event.translation_x, event.velocity_x),
            y: Sample::new(event.translation_y, event.velocity_y),
        };
        self.last = frame;
        frame
    }

    /// Phase of the last handled event.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.last.phase
    }

    /// Last frame produced.
    #[inline]
    #[must_use]
    pub fn last_frame(&self) -> GestureFrame {
        self.last
    }

    /// Forget the last frame and report `Idle`.
    pub fn reset(&mut self) {
        self.last = GestureFrame::default();
    }
}
