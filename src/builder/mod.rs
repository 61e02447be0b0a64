//! Builder API for animators, steps and sequences.
//!
//! Builders collect settings fluently and validate once at the end, so a
//! misconfigured animator or an invalid step list is reported before any
//! style is written.

pub mod animator;
pub mod error;
pub mod sequence;
pub mod step;

pub use animator::AnimatorBuilder;
pub use error::BuildError;
pub use sequence::SequenceBuilder;
pub use step::StepBuilder;

use crate::animation::TransitionStep;
use crate::core::{StyleChangeSet, StyleProperty};

/// Steps fading each element in turn to `opacity`.
///
/// # Example
///
/// ```
/// use segue::builder::opacity_steps;
///
/// let steps = opacity_steps(["a", "b"], "0", 150);
/// assert_eq!(steps.len(), 2);
/// assert_eq!(*steps[1].element(), "b");
/// ```
pub fn opacity_steps<E>(
    elements: impl IntoIterator<Item = E>,
    opacity: &str,
    duration_ms: u64,
) -> Vec<TransitionStep<E>> {
    let changes = StyleChangeSet::new().with(StyleProperty::Opacity, opacity);
    elements
        .into_iter()
        .map(|element| TransitionStep::new(element, changes.clone(), duration_ms))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_steps_share_changes_and_duration() {
        let steps = opacity_steps(vec![1u32, 2, 3], "0.5", 80);

        assert_eq!(steps.len(), 3);
        for (step, expected) in steps.iter().zip([1u32, 2, 3]) {
            assert_eq!(*step.element(), expected);
            assert_eq!(step.duration_ms(), 80);
            assert_eq!(step.changes().get(StyleProperty::Opacity), Some("0.5"));
        }
    }
}
