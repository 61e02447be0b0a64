//! Single transitions: apply a change set over a duration.

use super::watcher::{Completion, OnComplete};
use super::{AnimationError, Animator};
use crate::core::{StyleChangeSet, StyleProperty};
use crate::host::Host;

impl<H: Host> Animator<H> {
    /// Animate `element` to `changes` over `duration_ms`.
    ///
    /// The transition declaration is reset and set to cover all properties
    /// before any value is written, so the host starts animating as soon as
    /// a value changes. `on_complete` is invoked through a completion watcher
    /// (see [`Animator::watch`]); `strip_transition_after` clears the
    /// declaration once the transition ends so later writes apply
    /// immediately.
    ///
    /// If no value in `changes` differs from the current one the host has
    /// nothing to animate and never notifies. Without a stall timeout the
    /// callback then never runs.
    pub fn animate(
        &self,
        element: &H::Element,
        changes: &StyleChangeSet,
        duration_ms: u64,
        on_complete: Option<OnComplete<H::Element>>,
        strip_transition_after: bool,
    ) -> Result<(), AnimationError> {
        let completion = on_complete
            .map(|callback| -> Completion<H::Element> { Box::new(move |el, _| callback(el)) });
        self.run_transition(
            element,
            changes,
            duration_ms,
            completion,
            strip_transition_after,
        )
    }

    /// Write `changes` directly, leaving the transition declaration alone.
    pub fn apply(&self, element: &H::Element, changes: &StyleChangeSet) {
        for (property, value) in changes.iter() {
            self.host.set_style(element, property, value);
        }
    }

    pub(crate) fn run_transition(
        &self,
        element: &H::Element,
        changes: &StyleChangeSet,
        duration_ms: u64,
        on_complete: Option<Completion<H::Element>>,
        strip_transition_after: bool,
    ) -> Result<(), AnimationError> {
        if changes.contains(StyleProperty::Transition) {
            return Err(AnimationError::ReservedProperty {
                property: StyleProperty::Transition,
            });
        }
        self.ensure_idle(element)?;

        self.host.set_style(element, StyleProperty::Transition, "");
        self.host
            .set_style(element, StyleProperty::Transition, &format!("all {duration_ms}ms"));

        if let Some(callback) = on_complete {
            let deadline = self.config.stall_deadline_ms(duration_ms);
            self.register_watch(element, strip_transition_after, deadline, callback);
        }

        self.apply(element, changes);
        log::debug!(
            "animating {} properties on {element:?} over {duration_ms}ms",
            changes.len()
        );
        Ok(())
    }
}
