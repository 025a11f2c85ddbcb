#![forbid(unsafe_code)]

//! Structured logging via `tracing`, enabled with the `tracing` feature.
//!
//! The core never installs a subscriber; the host (or the harness binary)
//! decides where events go. Without the feature every log point compiles
//! away.
//!
//! Events are emitted under the `dropzone` target:
//!
//! | Level | When |
//! |-------|------|
//! | debug | a settling run starts, finishes, or is cancelled |
//! | warn  | a non-finite sample or integrator state is discarded |

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Log target used by every event in this crate.
pub const TARGET: &str = "dropzone";
