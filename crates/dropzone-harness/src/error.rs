use std::path::PathBuf;

use dropzone_core::{ConfigError, MotionConfigError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot read zone file {path}: {source}")]
    ZoneFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("zone file {path} is not a valid zone list: {source}")]
    ZoneParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("motion config: {0}")]
    Config(#[from] MotionConfigError),

    #[error("layout: {0}")]
    Layout(#[from] ConfigError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("element still moving after {frames} frames")]
    Unsettled { frames: usize },
}

impl HarnessError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Layout(_) | Self::ZoneParse { .. } => 2,
            Self::InvalidArgument { .. } => 2,
            Self::Unsettled { .. } => 3,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
