//! Builder for constructing animators.

use crate::animation::Animator;
use crate::config::{AnimatorConfig, ConfigError, StallTimeout};
use crate::host::Host;

/// Fluent construction of an [`Animator`] with a validated configuration.
///
/// # Example
///
/// ```rust
/// use segue::builder::AnimatorBuilder;
/// use segue::host::MemoryDocument;
///
/// let animator = AnimatorBuilder::new()
///     .stall_timeout(2.0)
///     .min_timeout_ms(100)
///     .build(MemoryDocument::new())
///     .unwrap();
///
/// assert_eq!(animator.config().stall_deadline_ms(20), Some(100));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnimatorBuilder {
    config: AnimatorConfig,
}

impl AnimatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn config(mut self, config: AnimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Force completion after `duration * safety_factor` when no notification
    /// arrives. Enables the stall timeout.
    pub fn stall_timeout(mut self, safety_factor: f64) -> Self {
        let timeout = self.config.stall_timeout.get_or_insert_with(StallTimeout::default);
        timeout.safety_factor = safety_factor;
        self
    }

    /// Lower bound on the stall deadline. Enables the stall timeout.
    pub fn min_timeout_ms(mut self, min_ms: u64) -> Self {
        let timeout = self.config.stall_timeout.get_or_insert_with(StallTimeout::default);
        timeout.min_ms = min_ms;
        self
    }

    /// Wait for notifications indefinitely.
    pub fn without_stall_timeout(mut self) -> Self {
        self.config.stall_timeout = None;
        self
    }

    /// Validate the configuration and bind it to `host`.
    pub fn build<H: Host>(self, host: H) -> Result<Animator<H>, ConfigError> {
        self.config.validate()?;
        Ok(Animator::with_config(host, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryDocument;

    #[test]
    fn default_builder_has_no_stall_timeout() {
        let animator = AnimatorBuilder::new().build(MemoryDocument::new()).unwrap();
        assert_eq!(animator.config(), &AnimatorConfig::default());
    }

    #[test]
    fn min_timeout_alone_keeps_default_factor() {
        let animator = AnimatorBuilder::new()
            .min_timeout_ms(10)
            .build(MemoryDocument::new())
            .unwrap();
        assert_eq!(
            animator.config().stall_timeout,
            Some(StallTimeout {
                safety_factor: 1.5,
                min_ms: 10
            })
        );
    }

    #[test]
    fn build_rejects_invalid_factor() {
        let result = AnimatorBuilder::new()
            .stall_timeout(0.5)
            .build(MemoryDocument::new());
        assert!(matches!(result, Err(ConfigError::InvalidSafetyFactor(_))));
    }

    #[test]
    fn without_stall_timeout_clears_loaded_config() {
        let config = AnimatorConfig::from_json(r#"{"stall_timeout": {}}"#).unwrap();
        let animator = AnimatorBuilder::new()
            .config(config)
            .without_stall_timeout()
            .build(MemoryDocument::new())
            .unwrap();
        assert!(animator.config().stall_timeout.is_none());
    }
}
