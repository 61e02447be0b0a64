//! Opacity fades.

use super::watcher::OnComplete;
use super::{AnimationError, Animator};
use crate::core::{StyleChangeSet, StyleProperty};
use crate::host::Host;

impl<H: Host> Animator<H> {
    /// Fade `element` from fully transparent to fully opaque.
    ///
    /// The opacity is forced to `0` with no transition first, so the fade
    /// always runs from the start regardless of the current value. The host
    /// flushes that write before the target is set. The transition
    /// declaration is cleared once the fade ends.
    pub fn fade_in(
        &self,
        element: &H::Element,
        duration_ms: u64,
        on_complete: Option<OnComplete<H::Element>>,
    ) -> Result<(), AnimationError> {
        self.fade(element, "0", "1", duration_ms, on_complete)
    }

    /// Fade `element` from fully opaque to fully transparent.
    pub fn fade_out(
        &self,
        element: &H::Element,
        duration_ms: u64,
        on_complete: Option<OnComplete<H::Element>>,
    ) -> Result<(), AnimationError> {
        self.fade(element, "1", "0", duration_ms, on_complete)
    }

    fn fade(
        &self,
        element: &H::Element,
        from: &str,
        to: &str,
        duration_ms: u64,
        on_complete: Option<OnComplete<H::Element>>,
    ) -> Result<(), AnimationError> {
        self.ensure_idle(element)?;
        self.host.set_style(element, StyleProperty::Transition, "");
        self.host.set_style(element, StyleProperty::Opacity, from);
        self.host.flush_styles(element);

        let target = StyleChangeSet::new().with(StyleProperty::Opacity, to);
        self.animate(element, &target, duration_ms, on_complete, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::then;
    use crate::host::{ElementId, MemoryDocument};
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() -> (MemoryDocument, ElementId, Animator<MemoryDocument>) {
        let doc = MemoryDocument::new();
        let el = doc.create_element("div");
        let animator = Animator::new(doc.clone());
        (doc, el, animator)
    }

    #[test]
    fn fade_in_from_unset_opacity() {
        let (doc, el, animator) = setup();
        let finished = Rc::new(Cell::new(false));
        let f = Rc::clone(&finished);

        animator
            .fade_in(&el, 200, then(move |_: &ElementId| f.set(true)))
            .unwrap();
        assert_eq!(doc.style(&el, StyleProperty::Opacity), "1");
        assert_eq!(doc.style(&el, StyleProperty::Transition), "all 200ms");

        assert_eq!(doc.run_until_idle(), 200);
        assert!(finished.get());
        assert_eq!(doc.style(&el, StyleProperty::Opacity), "1");
        assert_eq!(doc.style(&el, StyleProperty::Transition), "");
    }

    #[test]
    fn fade_flushes_the_seeded_opacity_once() {
        let (doc, el, animator) = setup();

        animator.fade_out(&el, 100, None).unwrap();
        assert_eq!(doc.style_flushes(el), 1);
        doc.run_until_idle();

        animator.fade_in(&el, 100, None).unwrap();
        assert_eq!(doc.style_flushes(el), 2);
    }

    #[test]
    fn fade_in_restarts_from_transparent_when_already_opaque() {
        let (doc, el, animator) = setup();
        doc.set_style(&el, StyleProperty::Opacity, "1");
        let finished = Rc::new(Cell::new(false));
        let f = Rc::clone(&finished);

        animator
            .fade_in(&el, 100, then(move |_: &ElementId| f.set(true)))
            .unwrap();
        doc.run_until_idle();

        assert!(finished.get());
    }

    #[test]
    fn fade_out_ends_transparent() {
        let (doc, el, animator) = setup();
        let finished = Rc::new(Cell::new(false));
        let f = Rc::clone(&finished);

        animator
            .fade_out(&el, 150, then(move |_: &ElementId| f.set(true)))
            .unwrap();
        doc.run_until_idle();

        assert!(finished.get());
        assert_eq!(doc.style(&el, StyleProperty::Opacity), "0");
        assert_eq!(doc.style(&el, StyleProperty::Transition), "");
    }

    #[test]
    fn fade_on_pending_element_writes_nothing() {
        let (doc, el, animator) = setup();
        animator.fade_out(&el, 100, then(|_: &ElementId| {})).unwrap();

        let err = animator.fade_in(&el, 100, None).unwrap_err();

        assert!(matches!(err, AnimationError::WatchPending { .. }));
        assert_eq!(doc.style_flushes(el), 1);
        assert_eq!(doc.style(&el, StyleProperty::Opacity), "0");
        assert_eq!(doc.style(&el, StyleProperty::Transition), "all 100ms");
    }
}
