#![forbid(unsafe_code)]

//! Headless driver for `dropzone-core`.
//!
//! Replays a scripted drag (grab, move, release) against a zone layout and
//! prints the settled trajectory frame by frame. Useful for tuning spring and
//! decay parameters without a host UI.

pub mod cli;
pub mod error;
pub mod layout;
pub mod simulate;
pub mod telemetry;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
