//! In-process document with a virtual clock.
//!
//! `MemoryDocument` behaves like a browser document as far as the engine can
//! observe: a style write that changes a value while a non-zero transition
//! declaration covers the property starts a transition, and when the clock
//! passes its end the document emits completion events on the element. A
//! write that does not change the value, or a zero duration, emits nothing.
//!
//! Completions are coalesced per element: one batch of events fires when the
//! last running property of the element finishes.

use super::{Host, Listener, ListenerId, Task, TimerId};
use crate::core::StyleProperty;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

/// Upper bound on events fired by a single `run_until_idle` call.
const MAX_IDLE_EVENTS: usize = 10_000;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

struct Registration {
    id: ListenerId,
    event: String,
    listener: Listener,
}

struct ElementState {
    tag: String,
    styles: BTreeMap<StyleProperty, String>,
    attributes: BTreeMap<String, String>,
    listeners: Vec<Registration>,
    completes_at: Option<u64>,
    flushes: usize,
}

struct PendingTimer {
    id: TimerId,
    due: u64,
    task: Task,
}

struct Inner {
    now_ms: u64,
    next_id: u64,
    elements: HashMap<ElementId, ElementState>,
    timers: Vec<PendingTimer>,
    completion_events: Vec<String>,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            elements: HashMap::new(),
            timers: Vec::new(),
            completion_events: vec!["transitionend".to_string()],
        }
    }
}

enum Due {
    Completion(ElementId),
    Timer(Task),
}

/// Deterministic in-memory [`Host`].
///
/// Cloning yields another handle to the same document.
///
/// # Example
///
/// ```rust
/// use segue::core::StyleProperty;
/// use segue::host::{Host, MemoryDocument};
///
/// let doc = MemoryDocument::new();
/// let el = doc.create_element("div");
///
/// doc.set_style(&el, StyleProperty::Transition, "all 100ms");
/// doc.set_style(&el, StyleProperty::Opacity, "0");
/// assert!(doc.is_animating(el));
///
/// doc.advance(100);
/// assert!(!doc.is_animating(el));
/// ```
#[derive(Clone, Default)]
pub struct MemoryDocument {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryDocument")
            .field("now_ms", &inner.now_ms)
            .field("elements", &inner.elements.len())
            .field("timers", &inner.timers.len())
            .field("completion_events", &inner.completion_events)
            .finish()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the event names emitted when a transition completes.
    ///
    /// Defaults to `["transitionend"]`. Emitting several names simulates a
    /// host that fires vendor-prefixed variants alongside the standard one.
    pub fn with_completion_events<I, S>(self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.borrow_mut().completion_events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn create_element(&self, tag: &str) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = ElementId(inner.next_id());
        inner.elements.insert(
            id,
            ElementState {
                tag: tag.to_string(),
                styles: BTreeMap::new(),
                attributes: BTreeMap::new(),
                listeners: Vec::new(),
                completes_at: None,
                flushes: 0,
            },
        );
        id
    }

    pub fn tag(&self, element: ElementId) -> Option<String> {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .map(|el| el.tag.clone())
    }

    /// Whether `element` is still attached to the document.
    pub fn contains(&self, element: ElementId) -> bool {
        self.inner.borrow().elements.contains_key(&element)
    }

    /// Style flushes requested on `element` since it was created.
    pub fn style_flushes(&self, element: ElementId) -> usize {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .map_or(0, |el| el.flushes)
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.inner.borrow().now_ms
    }

    /// Listeners currently registered on `element`, across all events.
    pub fn listener_count(&self, element: ElementId) -> usize {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .map_or(0, |el| el.listeners.len())
    }

    /// Listeners currently registered on `element` for `event`.
    pub fn listeners_for(&self, element: ElementId, event: &str) -> usize {
        self.inner.borrow().elements.get(&element).map_or(0, |el| {
            el.listeners.iter().filter(|r| r.event == event).count()
        })
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Whether a transition is running on `element`.
    pub fn is_animating(&self, element: ElementId) -> bool {
        self.inner
            .borrow()
            .elements
            .get(&element)
            .is_some_and(|el| el.completes_at.is_some())
    }

    /// Deliver `event` to the listeners of `element`.
    ///
    /// Listeners removed by an earlier listener of the same dispatch are
    /// skipped. Returns how many listeners ran.
    pub fn dispatch(&self, element: ElementId, event: &str) -> usize {
        self.deliver(element, &[event.to_string()])
    }

    /// Deliver every name in `events` to `element` as one notification.
    ///
    /// The registrations are read once, before any listener runs. A listener
    /// added while the batch is in flight does not see its later names, and a
    /// snapshot listener removed in the meantime is skipped.
    fn deliver(&self, element: ElementId, events: &[String]) -> usize {
        let snapshot: Vec<(&str, ListenerId)> = match self.inner.borrow().elements.get(&element) {
            Some(el) => events
                .iter()
                .flat_map(move |event| {
                    el.listeners
                        .iter()
                        .filter(move |r| r.event == *event)
                        .map(move |r| (event.as_str(), r.id))
                })
                .collect(),
            None => return 0,
        };

        let mut invoked = 0;
        for (event, id) in snapshot {
            let listener = self
                .inner
                .borrow()
                .elements
                .get(&element)
                .and_then(|el| el.listeners.iter().find(|r| r.id == id && r.event == event))
                .map(|r| Rc::clone(&r.listener));
            if let Some(listener) = listener {
                listener(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Move the clock forward, firing due completions and timers in time
    /// order. Completions win ties against timers.
    pub fn advance(&self, ms: u64) {
        let until = self.now_ms().saturating_add(ms);
        while let Some(due) = self.pop_due(until) {
            self.fire(due);
        }
        self.inner.borrow_mut().now_ms = until;
    }

    /// Advance until no transition or timer is pending.
    ///
    /// Returns the virtual time that elapsed. Stops after a bounded number of
    /// events so a self-rescheduling timer cannot spin forever.
    pub fn run_until_idle(&self) -> u64 {
        let start = self.now_ms();
        for _ in 0..MAX_IDLE_EVENTS {
            let Some(next) = self.next_due_time() else {
                break;
            };
            let now = self.now_ms();
            self.advance(next.saturating_sub(now));
        }
        self.now_ms() - start
    }

    fn next_due_time(&self) -> Option<u64> {
        let inner = self.inner.borrow();
        let completion = inner.elements.values().filter_map(|el| el.completes_at).min();
        let timer = inner.timers.iter().map(|t| t.due).min();
        match (completion, timer) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn pop_due(&self, until: u64) -> Option<Due> {
        let mut inner = self.inner.borrow_mut();
        let completion = inner
            .elements
            .iter()
            .filter_map(|(id, el)| el.completes_at.map(|at| (at, *id)))
            .min();
        let timer = inner
            .timers
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(index, t)| (t.due, index));

        match (completion, timer) {
            (Some((at, id)), timer) if at <= until && timer.map_or(true, |(due, _)| at <= due) => {
                inner.now_ms = inner.now_ms.max(at);
                if let Some(el) = inner.elements.get_mut(&id) {
                    el.completes_at = None;
                }
                Some(Due::Completion(id))
            }
            (_, Some((due, index))) if due <= until => {
                inner.now_ms = inner.now_ms.max(due);
                let timer = inner.timers.remove(index);
                Some(Due::Timer(timer.task))
            }
            _ => None,
        }
    }

    fn fire(&self, due: Due) {
        match due {
            Due::Completion(element) => {
                let events = self.inner.borrow().completion_events.clone();
                log::trace!("completion on {element:?} at {}ms", self.now_ms());
                self.deliver(element, &events);
            }
            Due::Timer(task) => task(),
        }
    }
}

/// Duration in ms that `declaration` assigns to `property`, if any.
///
/// Understands comma-separated `<property> <time>` entries with `ms` or `s`
/// units; `all` matches every property.
fn transition_ms(declaration: &str, property: StyleProperty) -> Option<u64> {
    declaration
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split_whitespace();
            let name = parts.next()?;
            let time = parts.next()?;
            if name == "all" || name == property.css_name() {
                parse_time_ms(time)
            } else {
                None
            }
        })
        .max()
}

fn parse_time_ms(token: &str) -> Option<u64> {
    if let Some(ms) = token.strip_suffix("ms") {
        ms.parse::<f64>().ok().map(|v| v.max(0.0).round() as u64)
    } else if let Some(s) = token.strip_suffix('s') {
        s.parse::<f64>().ok().map(|v| (v.max(0.0) * 1000.0).round() as u64)
    } else {
        None
    }
}

impl Host for MemoryDocument {
    type Element = ElementId;

    fn style(&self, element: &ElementId, property: StyleProperty) -> String {
        self.inner
            .borrow()
            .elements
            .get(element)
            .and_then(|el| el.styles.get(&property).cloned())
            .unwrap_or_default()
    }

    fn set_style(&self, element: &ElementId, property: StyleProperty, value: &str) {
        let mut inner = self.inner.borrow_mut();
        let now = inner.now_ms;
        let Some(el) = inner.elements.get_mut(element) else {
            log::warn!("set_style on unknown element {element:?}");
            return;
        };

        let previous = el.styles.get(&property).map_or("", String::as_str);
        if previous == value {
            return;
        }

        if property == StyleProperty::Transition {
            if value.is_empty() {
                el.completes_at = None;
            }
        } else {
            let duration = el
                .styles
                .get(&StyleProperty::Transition)
                .and_then(|decl| transition_ms(decl, property))
                .unwrap_or(0);
            if duration > 0 {
                let end = now + duration;
                el.completes_at = Some(el.completes_at.map_or(end, |at| at.max(end)));
            }
        }

        if value.is_empty() {
            el.styles.remove(&property);
        } else {
            el.styles.insert(property, value.to_string());
        }
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .elements
            .get(element)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn set_attribute(&self, element: &ElementId, name: &str, value: &str) {
        match self.inner.borrow_mut().elements.get_mut(element) {
            Some(el) => {
                el.attributes.insert(name.to_string(), value.to_string());
            }
            None => log::warn!("set_attribute on unknown element {element:?}"),
        }
    }

    fn remove_attribute(&self, element: &ElementId, name: &str) {
        if let Some(el) = self.inner.borrow_mut().elements.get_mut(element) {
            el.attributes.remove(name);
        }
    }

    fn remove_element(&self, element: &ElementId) {
        let removed = self.inner.borrow_mut().elements.remove(element);
        if removed.is_some() {
            log::trace!("removed {element:?}");
        }
    }

    fn flush_styles(&self, element: &ElementId) {
        if let Some(el) = self.inner.borrow_mut().elements.get_mut(element) {
            el.flushes += 1;
        }
    }

    fn add_listener(&self, element: &ElementId, event: &str, listener: Listener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id());
        match inner.elements.get_mut(element) {
            Some(el) => el.listeners.push(Registration {
                id,
                event: event.to_string(),
                listener,
            }),
            None => log::warn!("add_listener on unknown element {element:?}"),
        }
        id
    }

    fn remove_listener(&self, element: &ElementId, event: &str, id: ListenerId) {
        if let Some(el) = self.inner.borrow_mut().elements.get_mut(element) {
            el.listeners.retain(|r| !(r.id == id && r.event == event));
        }
    }

    fn schedule(&self, delay_ms: u64, task: Task) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let id = TimerId(inner.next_id());
        let due = inner.now_ms.saturating_add(delay_ms);
        inner.timers.push(PendingTimer { id, due, task });
        id
    }

    fn cancel(&self, timer: TimerId) {
        self.inner.borrow_mut().timers.retain(|t| t.id != timer);
    }
}
