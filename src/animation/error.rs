//! Errors raised at the animation API boundary.

use crate::core::StyleProperty;
use thiserror::Error;

/// A problem with one step of a transition sequence.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StepViolation {
    #[error("step {index} has an empty change set")]
    EmptyChangeSet { index: usize },

    #[error("step {index} sets the transition property directly")]
    ReservedProperty { index: usize },
}

impl StepViolation {
    pub fn index(&self) -> usize {
        match self {
            Self::EmptyChangeSet { index } | Self::ReservedProperty { index } => *index,
        }
    }
}

/// Caller-contract violations detected before any style is written.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnimationError {
    #[error("Transition sequence has no steps")]
    EmptySequence,

    #[error("A completion watcher is already pending on element {element}")]
    WatchPending { element: String },

    #[error("Change set may not set '{property}'; the transition declaration is managed by the animator")]
    ReservedProperty { property: StyleProperty },

    #[error("Invalid transition steps: {}", join_violations(.0))]
    InvalidSteps(Vec<StepViolation>),
}

fn join_violations(violations: &[StepViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
