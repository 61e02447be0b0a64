//! One-shot completion watching across aliased event names.

use super::{AnimationError, Animator};
use crate::core::{CompletionCause, StyleProperty};
use crate::host::{Host, Listener, ListenerId, TimerId};
use std::cell::RefCell;
use std::rc::Rc;

/// Completion event names a host may emit when a transition ends.
///
/// Vendor-prefixed forms use the prefix plus the capitalized suffix; the
/// standard form is lowercase.
pub const COMPLETION_EVENTS: [&str; 5] = [
    "webkitTransitionEnd",
    "mozTransitionEnd",
    "MSTransitionEnd",
    "oTransitionEnd",
    "transitionend",
];

/// Attribute present on an element while a completion watcher is pending.
pub const PENDING_ATTRIBUTE: &str = "data-transition-pending";

/// Caller completion callback; receives the element that finished.
pub type OnComplete<E> = Box<dyn FnOnce(&E)>;

/// Engine-internal completion callback that also learns the cause.
pub(crate) type Completion<E> = Box<dyn FnOnce(&E, CompletionCause)>;

/// Wrap a closure as an optional completion callback.
///
/// ```rust
/// use segue::animation::then;
/// use segue::host::ElementId;
///
/// let callback = then(|el: &ElementId| println!("{el:?} finished"));
/// assert!(callback.is_some());
/// ```
pub fn then<E, F>(f: F) -> Option<OnComplete<E>>
where
    F: FnOnce(&E) + 'static,
{
    Some(Box::new(f))
}

/// Listener registrations for several aliases of one notification, removed
/// together.
struct FanOut<H: Host> {
    host: H,
    element: H::Element,
    registrations: Vec<(&'static str, ListenerId)>,
}

impl<H: Host> FanOut<H> {
    fn subscribe(host: &H, element: &H::Element, events: &[&'static str], listener: Listener) -> Self {
        let registrations = events
            .iter()
            .map(|event| (*event, host.add_listener(element, event, Rc::clone(&listener))))
            .collect();
        Self {
            host: host.clone(),
            element: element.clone(),
            registrations,
        }
    }

    fn unsubscribe_all(self) {
        for (event, id) in self.registrations {
            self.host.remove_listener(&self.element, event, id);
        }
    }
}

struct PendingWatch<H: Host> {
    fan_out: Option<FanOut<H>>,
    timer: Option<TimerId>,
    strip_transition_after: bool,
    on_complete: Completion<H::Element>,
}

type Slot<H> = Rc<RefCell<Option<PendingWatch<H>>>>;

impl<H: Host> Animator<H> {
    /// Watch `element` for the end of its running transition.
    ///
    /// `on_complete` runs exactly once, on the first completion notification
    /// under any of [`COMPLETION_EVENTS`]. Before it runs, every registered
    /// listener is removed and, when `strip_transition_after` is set, the
    /// element's transition declaration is cleared.
    /// Inside `on_complete` the declaration already reads as unset.
    ///
    /// Without a callback nothing is registered. A watcher registered this
    /// way has no stall timeout: if the host never notifies, the callback
    /// never runs.
    ///
    /// Fails with [`AnimationError::WatchPending`] if another watcher is still
    /// pending on the element.
    pub fn watch(
        &self,
        element: &H::Element,
        strip_transition_after: bool,
        on_complete: Option<OnComplete<H::Element>>,
    ) -> Result<(), AnimationError> {
        self.ensure_idle(element)?;
        if let Some(callback) = on_complete {
            self.register_watch(
                element,
                strip_transition_after,
                None,
                Box::new(move |el, _| callback(el)),
            );
        }
        Ok(())
    }

    /// Whether a completion watcher is pending on `element`.
    pub fn is_watching(&self, element: &H::Element) -> bool {
        self.host.attribute(element, PENDING_ATTRIBUTE).is_some()
    }

    pub(crate) fn ensure_idle(&self, element: &H::Element) -> Result<(), AnimationError> {
        if self.is_watching(element) {
            return Err(AnimationError::WatchPending {
                element: format!("{element:?}"),
            });
        }
        Ok(())
    }

    pub(crate) fn register_watch(
        &self,
        element: &H::Element,
        strip_transition_after: bool,
        stall_deadline_ms: Option<u64>,
        on_complete: Completion<H::Element>,
    ) {
        let slot: Slot<H> = Rc::new(RefCell::new(Some(PendingWatch {
            fan_out: None,
            timer: None,
            strip_transition_after,
            on_complete,
        })));

        let listener: Listener = {
            let host = self.host.clone();
            let element = element.clone();
            let slot = Rc::clone(&slot);
            Rc::new(move |event: &str| {
                let cause = CompletionCause::Notified {
                    event: event.to_string(),
                };
                finish(&host, &element, &slot, cause);
            })
        };
        let fan_out = FanOut::subscribe(&self.host, element, &COMPLETION_EVENTS, listener);

        let timer = stall_deadline_ms.map(|deadline| {
            let host = self.host.clone();
            let element = element.clone();
            let slot = Rc::clone(&slot);
            self.host.schedule(
                deadline,
                Box::new(move || finish(&host, &element, &slot, CompletionCause::TimedOut)),
            )
        });

        if let Some(pending) = slot.borrow_mut().as_mut() {
            pending.fan_out = Some(fan_out);
            pending.timer = timer;
        }
        self.host.set_attribute(element, PENDING_ATTRIBUTE, "");
        log::trace!(
            "watching {element:?} for {} completion events",
            COMPLETION_EVENTS.len()
        );
    }
}

fn finish<H: Host>(host: &H, element: &H::Element, slot: &Slot<H>, cause: CompletionCause) {
    let Some(pending) = slot.borrow_mut().take() else {
        return;
    };

    if let Some(fan_out) = pending.fan_out {
        fan_out.unsubscribe_all();
    }
    if let Some(timer) = pending.timer {
        host.cancel(timer);
    }
    host.remove_attribute(element, PENDING_ATTRIBUTE);
    if pending.strip_transition_after {
        host.set_style(element, StyleProperty::Transition, "");
    }

    match &cause {
        CompletionCause::TimedOut => {
            log::warn!("no completion notification from {element:?}; forcing completion")
        }
        CompletionCause::Notified { event } => log::trace!("{element:?} completed via {event}"),
    }
    (pending.on_complete)(element, cause);
}
