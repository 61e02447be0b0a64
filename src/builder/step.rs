//! Builder for constructing transition steps.

use crate::animation::TransitionStep;
use crate::builder::error::BuildError;
use crate::core::{StyleChangeSet, StyleProperty};

/// Builder for a single [`TransitionStep`] with a fluent API.
pub struct StepBuilder<E> {
    element: Option<E>,
    changes: StyleChangeSet,
    duration_ms: Option<u64>,
}

impl<E> StepBuilder<E> {
    pub fn new() -> Self {
        Self {
            element: None,
            changes: StyleChangeSet::new(),
            duration_ms: None,
        }
    }

    /// Set the element to animate (required).
    pub fn element(mut self, element: E) -> Self {
        self.element = Some(element);
        self
    }

    /// Set one target value.
    pub fn set(mut self, property: StyleProperty, value: impl Into<String>) -> Self {
        self.changes.set(property, value);
        self
    }

    /// Set one target value by CSS or camelCase property name.
    pub fn set_named(mut self, name: &str, value: impl Into<String>) -> Result<Self, BuildError> {
        let property = name.parse::<StyleProperty>()?;
        self.changes.set(property, value);
        Ok(self)
    }

    /// Merge a prepared change set; later values win.
    pub fn changes(mut self, changes: StyleChangeSet) -> Self {
        for (property, value) in changes.iter() {
            self.changes.set(property, value);
        }
        self
    }

    /// Set the transition duration (required).
    pub fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Build the step.
    ///
    /// Change-set content is checked when the step joins a sequence, where
    /// all violations are reported together.
    pub fn build(self) -> Result<TransitionStep<E>, BuildError> {
        let element = self.element.ok_or(BuildError::MissingElement)?;
        let duration_ms = self.duration_ms.ok_or(BuildError::MissingDuration)?;
        Ok(TransitionStep::new(element, self.changes, duration_ms))
    }
}

impl<E> Default for StepBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}
