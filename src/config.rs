//! Animator configuration.
//!
//! Configuration is plain serde data so it can be embedded in an
//! application's own settings file. Build it in code with
//! [`AnimatorBuilder`](crate::builder::AnimatorBuilder) or load it with
//! [`AnimatorConfig::from_json`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Stall timeout safety factor must be a finite number >= 1.0, got {0}")]
    InvalidSafetyFactor(f64),

    #[error("Failed to parse animator configuration: {0}")]
    Parse(String),
}

/// Forced completion for transitions whose notification never arrives.
///
/// A watcher with a stall timeout completes after
/// `max(duration_ms * safety_factor, min_ms)` even if the host stays silent,
/// for example when a change set did not alter any value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StallTimeout {
    pub safety_factor: f64,
    pub min_ms: u64,
}

impl Default for StallTimeout {
    fn default() -> Self {
        Self {
            safety_factor: 1.5,
            min_ms: 50,
        }
    }
}

impl StallTimeout {
    /// Milliseconds to wait for a transition of `duration_ms`.
    ///
    /// ```rust
    /// use segue::config::StallTimeout;
    ///
    /// let timeout = StallTimeout { safety_factor: 2.0, min_ms: 50 };
    /// assert_eq!(timeout.deadline_ms(300), 600);
    /// assert_eq!(timeout.deadline_ms(0), 50);
    /// ```
    pub fn deadline_ms(&self, duration_ms: u64) -> u64 {
        let scaled = (duration_ms as f64 * self.safety_factor).ceil() as u64;
        scaled.max(self.min_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.safety_factor.is_finite() && self.safety_factor >= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidSafetyFactor(self.safety_factor))
        }
    }
}

/// Settings shared by every operation of an [`Animator`](crate::Animator).
///
/// The default waits for host notifications indefinitely.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub stall_timeout: Option<StallTimeout>,
}

impl AnimatorConfig {
    /// Parse and validate configuration from JSON.
    ///
    /// ```rust
    /// use segue::config::AnimatorConfig;
    ///
    /// let config = AnimatorConfig::from_json(r#"{"stall_timeout": {"safety_factor": 2.0}}"#).unwrap();
    /// assert_eq!(config.stall_timeout.unwrap().min_ms, 50);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.stall_timeout
            .as_ref()
            .map_or(Ok(()), StallTimeout::validate)
    }

    /// Stall deadline for a transition of `duration_ms`, if enabled.
    pub fn stall_deadline_ms(&self, duration_ms: u64) -> Option<u64> {
        self.stall_timeout.map(|t| t.deadline_ms(duration_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_never_times_out() {
        let config = AnimatorConfig::default();
        assert_eq!(config.stall_deadline_ms(1000), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deadline_rounds_up_and_respects_minimum() {
        let timeout = StallTimeout {
            safety_factor: 1.5,
            min_ms: 100,
        };
        assert_eq!(timeout.deadline_ms(201), 302);
        assert_eq!(timeout.deadline_ms(10), 100);
    }

    #[test]
    fn rejects_shrinking_or_non_finite_factors() {
        for factor in [0.5, f64::NAN, f64::INFINITY] {
            let timeout = StallTimeout {
                safety_factor: factor,
                min_ms: 0,
            };
            assert!(matches!(
                timeout.validate(),
                Err(ConfigError::InvalidSafetyFactor(_))
            ));
        }
    }

    #[test]
    fn from_json_validates() {
        let empty = AnimatorConfig::from_json("{}").unwrap();
        assert_eq!(empty, AnimatorConfig::default());

        let err = AnimatorConfig::from_json(r#"{"stall_timeout": {"safety_factor": 0.1}}"#);
        assert_eq!(err, Err(ConfigError::InvalidSafetyFactor(0.1)));

        let err = AnimatorConfig::from_json("not json");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }
}
