#![forbid(unsafe_code)]

//! Construction-time errors.
//!
//! Steady-state operation has no recoverable failures: gesture samples and
//! frame ticks are always accepted. Everything that can be wrong is wrong in
//! the configuration, and is rejected before a controller exists.

use thiserror::Error;

use crate::targets::Axis;

/// A controller or target set was built from an invalid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A target set must contain at least one coordinate.
    #[error("target set for the {axis} axis is empty")]
    EmptyTargets { axis: Axis },

    /// Targets must be finite coordinates.
    #[error("target {index} on the {axis} axis is not finite ({value})")]
    NonFiniteTarget { axis: Axis, index: usize, value: f64 },

    /// The starting offset of a controller must be finite.
    #[error("initial offset on the {axis} axis is not finite ({value})")]
    NonFiniteOffset { axis: Axis, value: f64 },

    /// The initial drop zone index is past the end of the zone list.
    #[error("initial zone {index} out of range ({len} zones)")]
    ZoneOutOfRange { index: usize, len: usize },

    /// An axis controller was placed in the slot of the other axis.
    #[error("controller for the {found} axis given where the {expected} axis was expected")]
    AxisMismatch { expected: Axis, found: Axis },

    /// Spring or decay tuning is outside its valid range.
    #[error("invalid motion config: {}", .0.join("; "))]
    InvalidMotion(Vec<String>),
}
