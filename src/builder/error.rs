//! Build errors for step and sequence builders.

use crate::core::StyleError;
use thiserror::Error;

/// Errors that can occur when building transition steps and sequences.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Step element not specified. Call .element(el) before .build()")]
    MissingElement,

    #[error("Step duration not specified. Call .duration_ms(ms)")]
    MissingDuration,

    #[error(transparent)]
    Style(#[from] StyleError),
}
