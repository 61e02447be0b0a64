//! Builder for transition sequences.

use crate::animation::{
    validate_steps, AnimationError, Animator, SequenceCallback, SequenceHandle, StepCallback,
    TransitionStep,
};
use crate::builder::error::BuildError;
use crate::builder::step::StepBuilder;
use crate::core::StyleChangeSet;
use crate::host::Host;

/// Builder for running a sequence with a fluent API.
///
/// # Example
///
/// ```rust
/// use segue::animation::Animator;
/// use segue::builder::SequenceBuilder;
/// use segue::core::{StyleChangeSet, StyleProperty};
/// use segue::host::MemoryDocument;
///
/// let doc = MemoryDocument::new();
/// let panel = doc.create_element("div");
/// let animator = Animator::new(doc.clone());
///
/// let handle = SequenceBuilder::new()
///     .step(panel, StyleChangeSet::new().with(StyleProperty::Opacity, "0.5"), 100)
///     .step(panel, StyleChangeSet::new().with(StyleProperty::Left, "20px"), 200)
///     .run(&animator)
///     .unwrap();
///
/// doc.run_until_idle();
/// assert!(handle.is_done());
/// ```
pub struct SequenceBuilder<E> {
    steps: Vec<TransitionStep<E>>,
    on_step: Option<StepCallback<E>>,
    on_complete: Option<SequenceCallback>,
}

impl<E: 'static> SequenceBuilder<E> {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            on_step: None,
            on_complete: None,
        }
    }

    /// Append a step.
    pub fn step(mut self, element: E, changes: StyleChangeSet, duration_ms: u64) -> Self {
        self.steps.push(TransitionStep::new(element, changes, duration_ms));
        self
    }

    /// Append a step using a builder.
    /// Returns an error if the builder fails validation.
    pub fn build_step(mut self, builder: StepBuilder<E>) -> Result<Self, BuildError> {
        self.steps.push(builder.build()?);
        Ok(self)
    }

    /// Append a pre-built step.
    pub fn add_step(mut self, step: TransitionStep<E>) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps at once.
    pub fn steps(mut self, steps: impl IntoIterator<Item = TransitionStep<E>>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Run `callback(element, step_index, total_steps)` after each step.
    pub fn on_step<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&E, usize, usize) + 'static,
    {
        self.on_step = Some(Box::new(callback));
        self
    }

    /// Run `callback` once after the last step.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check the collected steps without running them.
    ///
    /// Reports an empty step list, or every invalid step at once.
    pub fn validate(&self) -> Result<(), AnimationError> {
        if self.steps.is_empty() {
            return Err(AnimationError::EmptySequence);
        }
        validate_steps(&self.steps)
    }

    /// Start the sequence on `animator`.
    pub fn run<H>(self, animator: &Animator<H>) -> Result<SequenceHandle, AnimationError>
    where
        H: Host<Element = E>,
    {
        animator.sequence(self.steps, self.on_complete, self.on_step)
    }
}

impl<E: 'static> Default for SequenceBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
