#![forbid(unsafe_code)]

//! Motion tuning as data.
//!
//! [`MotionConfig`] groups every tunable of an axis controller: which
//! integrator settles a released element, the spring and decay parameters,
//! and the frame-delta ceiling. With the `motion-config` feature it can be
//! loaded from TOML or JSON.
//!
//! ```toml
//! # dropzone.toml
//! mode = "spring"
//! max_frame_dt_ms = 16.667
//!
//! [spring]
//! stiffness = 200.0
//! damping = 20.0
//! overshoot_clamping = true
//! ```
//!
//! ```rust,ignore
//! let config = MotionConfig::from_toml_file("dropzone.toml")?;
//! ```
//!
//! Every field has a default, so partial files are fine.

#[cfg(feature = "motion-config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "motion-config")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "motion-config")]
use thiserror::Error;

use crate::animation::{
    DEFAULT_MAX_FRAME_DT, DecayConfig, DecayIntegrator, Motion, SpringConfig, SpringIntegrator,
};
use crate::error::ConfigError;

/// Largest accepted `max_frame_dt_ms`: six nominal 60 Hz frames.
pub const MAX_FRAME_DT_CEILING_MS: f64 = 100.0;

/// How a released element comes to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "motion-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "motion-config", serde(rename_all = "lowercase"))]
pub enum MotionMode {
    /// Spring toward the nearest drop-zone target.
    #[default]
    Spring,
    /// Coast on momentum, no snapping.
    Decay,
}

/// Per-axis motion tuning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "motion-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "motion-config", serde(default))]
pub struct MotionConfig {
    pub mode: MotionMode,
    pub spring: SpringConfig,
    pub decay: DecayConfig,
    /// Largest frame delta fed to an integrator, in milliseconds.
    pub max_frame_dt_ms: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            mode: MotionMode::Spring,
            spring: SpringConfig::default(),
            decay: DecayConfig::default(),
            max_frame_dt_ms: DEFAULT_MAX_FRAME_DT.as_secs_f64() * 1000.0,
        }
    }
}

impl MotionConfig {
    /// Spring-mode config with the given tuning.
    #[must_use]
    pub fn spring(spring: SpringConfig) -> Self {
        Self {
            mode: MotionMode::Spring,
            spring,
            ..Self::default()
        }
    }

    /// Decay-mode config with the given tuning.
    #[must_use]
    pub fn decay(decay: DecayConfig) -> Self {
        Self {
            mode: MotionMode::Decay,
            decay,
            ..Self::default()
        }
    }

    /// Set the frame-delta ceiling (builder pattern).
    #[must_use]
    pub fn with_max_frame_dt(mut self, max: Duration) -> Self {
        self.max_frame_dt_ms = max.as_secs_f64() * 1000.0;
        self
    }

    /// Frame-delta ceiling; falls back to the default if not positive and
    /// never exceeds [`MAX_FRAME_DT_CEILING_MS`].
    #[must_use]
    pub fn max_frame_dt(&self) -> Duration {
        if self.max_frame_dt_ms > 0.0 {
            let ms = self.max_frame_dt_ms.min(MAX_FRAME_DT_CEILING_MS);
            Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(DEFAULT_MAX_FRAME_DT)
        } else {
            DEFAULT_MAX_FRAME_DT
        }
    }

    /// Validate the active mode's parameters and the frame ceiling.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid. Parameters of the inactive mode are not checked.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = match self.mode {
            MotionMode::Spring => self.spring.validate(),
            MotionMode::Decay => self.decay.validate(),
        };
        if !(self.max_frame_dt_ms > 0.0 && self.max_frame_dt_ms <= MAX_FRAME_DT_CEILING_MS) {
            errors.push(format!(
                "max_frame_dt_ms must be in (0, {MAX_FRAME_DT_CEILING_MS}], got {}",
                self.max_frame_dt_ms
            ));
        }
        errors
    }

    /// Validate, turning any problems into a [`ConfigError`].
    pub fn check(&self) -> Result<(), ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidMotion(errors))
        }
    }

    /// Build the integrator for one run.
    ///
    /// `target` is only used in spring mode.
    #[must_use]
    pub fn launch(&self, target: f64) -> Motion {
        let max = self.max_frame_dt();
        match self.mode {
            MotionMode::Spring => {
                Motion::Spring(SpringIntegrator::new(self.spring, target).with_max_frame_dt(max))
            }
            MotionMode::Decay => {
                Motion::Decay(DecayIntegrator::new(self.decay).with_max_frame_dt(max))
            }
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "motion-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, MotionConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "motion-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, MotionConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "motion-config")]
    pub fn from_json_str(s: &str) -> Result<Self, MotionConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "motion-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, MotionConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[cfg(feature = "motion-config")]
    fn validated(self) -> Result<Self, MotionConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(MotionConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a motion configuration.
#[cfg(feature = "motion-config")]
#[derive(Debug, Error)]
pub enum MotionConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation errors.
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Integrator;

    #[test]
    fn defaults_are_valid() {
        assert!(MotionConfig::default().validate().is_empty());
        assert!(MotionConfig::default().check().is_ok());
        assert!(MotionConfig::decay(DecayConfig::default()).validate().is_empty());
    }

    #[test]
    fn default_frame_ceiling_is_one_frame() {
        let dt = MotionConfig::default().max_frame_dt();
        assert!((dt.as_secs_f64() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn bad_frame_ceiling_falls_back() {
        let config = MotionConfig {
            max_frame_dt_ms: -4.0,
            ..MotionConfig::default()
        };
        assert_eq!(config.max_frame_dt(), DEFAULT_MAX_FRAME_DT);
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn oversized_frame_ceiling_rejected() {
        let config = MotionConfig {
            max_frame_dt_ms: 1e9,
            ..MotionConfig::default()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("max_frame_dt_ms"), "{errors:?}");
        assert!(matches!(config.check(), Err(ConfigError::InvalidMotion(_))));
        // Even unchecked, the integrators never see more than the ceiling.
        assert!((config.max_frame_dt().as_secs_f64() - 0.1).abs() < 1e-9);

        let at_ceiling = MotionConfig {
            max_frame_dt_ms: MAX_FRAME_DT_CEILING_MS,
            ..MotionConfig::default()
        };
        assert!(at_ceiling.validate().is_empty());
    }

    #[test]
    fn only_active_mode_is_validated() {
        let config = MotionConfig {
            decay: DecayConfig {
                deceleration: 2.0,
                ..DecayConfig::default()
            },
            ..MotionConfig::default()
        };
        assert!(config.validate().is_empty());

        let decay_mode = MotionConfig {
            mode: MotionMode::Decay,
            ..config
        };
        assert!(matches!(
            decay_mode.check(),
            Err(ConfigError::InvalidMotion(errors)) if errors.len() == 1
        ));
    }

    #[test]
    fn launch_picks_integrator_by_mode() {
        let spring = MotionConfig::default().launch(30.0);
        assert_eq!(spring.rest_target(), Some(30.0));
        let decay = MotionConfig::decay(DecayConfig::default()).launch(30.0);
        assert_eq!(decay.rest_target(), None);
    }

    #[test]
    fn with_max_frame_dt_round_trips() {
        let config = MotionConfig::default().with_max_frame_dt(Duration::from_millis(32));
        let dt = config.max_frame_dt().as_secs_f64();
        assert!((dt - 0.032).abs() < 1e-9);
    }

    #[cfg(feature = "motion-config")]
    mod loading {
        use super::*;
        use std::io::Write;

        #[test]
        fn partial_toml_keeps_defaults() {
            let config = MotionConfig::from_toml_str(
                r#"
                mode = "spring"

                [spring]
                stiffness = 320.0
                overshoot_clamping = true
                "#,
            )
            .expect("valid toml");
            assert_eq!(config.spring.stiffness, 320.0);
            assert!(config.spring.overshoot_clamping);
            assert_eq!(config.spring.damping, SpringConfig::default().damping);
            assert_eq!(config.decay, DecayConfig::default());
        }

        #[test]
        fn decay_mode_from_json() {
            let config =
                MotionConfig::from_json_str(r#"{"mode": "decay", "decay": {"deceleration": 0.99}}"#)
                    .expect("valid json");
            assert_eq!(config.mode, MotionMode::Decay);
            assert_eq!(config.decay.deceleration, 0.99);
        }

        #[test]
        fn invalid_values_rejected() {
            let err = MotionConfig::from_toml_str("[spring]\nmass = 0.0\n").unwrap_err();
            assert!(matches!(err, MotionConfigError::Validation(_)));
            assert!(err.to_string().contains("spring.mass"));
        }

        #[test]
        fn malformed_toml_is_parse_error() {
            let err = MotionConfig::from_toml_str("mode = [").unwrap_err();
            assert!(matches!(err, MotionConfigError::Toml(_)));
        }

        #[test]
        fn loads_from_file() {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            writeln!(file, "max_frame_dt_ms = 33.0").expect("write");
            let config = MotionConfig::from_toml_file(file.path()).expect("load");
            assert!((config.max_frame_dt().as_secs_f64() - 0.033).abs() < 1e-9);
        }

        #[test]
        fn missing_file_is_io_error() {
            let err = MotionConfig::from_toml_file("/nonexistent/dropzone.toml").unwrap_err();
            assert!(matches!(err, MotionConfigError::Io(_)));
        }
    }
}
