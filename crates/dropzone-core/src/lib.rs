// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: drag-and-release motion for an element that settles into drop zones.
//!
//! # Role
//! `dropzone-core` is the computational heart of a drag-and-drop interaction.
//! The host supplies gesture events, a list of drop zones, and a frame tick;
//! the core returns the offset to render on every tick. Layout, styling, and
//! drawing stay with the host.
//!
//! # Primary responsibilities
//! - **GestureBridge**: pan-handler states → `Idle` / `Active` / `Ended`
//!   plus per-axis (delta, velocity) samples.
//! - **TargetSet**: per-axis rest coordinates with first-wins nearest lookup.
//! - **MotionController**: the per-axis drag/settle/rest state machine.
//! - **Integrators**: damped spring toward a target, or inertial decay.
//! - **DragController**: both axes composed over a set of drop zones.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dropzone_core::{
//!     DragController, DropZone, HandlerEvent, HandlerState, MotionConfig, Point,
//! };
//!
//! let zones = vec![DropZone::new(1, 0.0, 0.0), DropZone::new(2, 300.0, 0.0)];
//! let mut drag = DragController::new(zones, 0, MotionConfig::default()).unwrap();
//!
//! drag.handle(&HandlerEvent::new(HandlerState::Began, (0.0, 0.0), (0.0, 0.0)));
//! drag.handle(&HandlerEvent::new(HandlerState::Active, (220.0, 10.0), (900.0, 0.0)));
//! drag.handle(&HandlerEvent::new(HandlerState::End, (220.0, 10.0), (900.0, 0.0)));
//!
//! while drag.is_animating() {
//!     drag.on_frame(Duration::from_millis(16));
//! }
//! assert_eq!(drag.position(), Point::new(300.0, 0.0));
//! ```

pub mod animation;
pub mod clock;
pub mod config;
pub mod controller;
pub mod drag;
pub mod error;
pub mod gesture;
pub mod logging;
pub mod targets;

pub use animation::{
    DecayConfig, DecayIntegrator, Integrator, Motion, SimulationState, SpringConfig,
    SpringIntegrator,
};
pub use clock::FrameClock;
#[cfg(feature = "motion-config")]
pub use config::MotionConfigError;
pub use config::{MAX_FRAME_DT_CEILING_MS, MotionConfig, MotionMode};
pub use controller::{ControllerState, MotionController};
pub use drag::{DragController, Point};
pub use error::ConfigError;
pub use gesture::{GestureBridge, GestureFrame, HandlerEvent, HandlerState, Phase, Sample};
pub use targets::{Axis, DropZone, TargetSet};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
