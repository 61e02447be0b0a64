//! Host document abstraction.
//!
//! The animation engine never owns elements. It reads and writes inline
//! styles, flags elements with attributes, registers listeners and schedules
//! timers through the [`Host`] trait. Hosts are cheap handles (`Clone`) so
//! completion callbacks can carry them.
//!
//! All host operations are infallible from the engine's point of view. Host
//! implementations that can fail log the failure and carry on.
//!
//! Two hosts are provided:
//! - [`MemoryDocument`]: deterministic in-process document with a virtual clock
//! - `WebDocument` (feature `web`): real DOM elements via `web-sys`

mod memory;
#[cfg(feature = "web")]
mod web;

pub use memory::{ElementId, MemoryDocument};
#[cfg(feature = "web")]
pub use web::WebDocument;

use crate::core::StyleProperty;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::rc::Rc;

/// Identifies a listener registration so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Event listener. Receives the name of the event that fired.
pub type Listener = Rc<dyn Fn(&str)>;

/// One-shot task run by a host timer.
pub type Task = Box<dyn FnOnce()>;

/// Read/write access to a document's elements, listeners and timers.
///
/// Styles use the empty string for "not set", matching inline style
/// declarations in the DOM. Writing the empty string removes the property.
pub trait Host: Clone + 'static {
    /// Opaque handle to an element owned by the document.
    type Element: Clone + Debug + 'static;

    fn style(&self, element: &Self::Element, property: StyleProperty) -> String;

    fn set_style(&self, element: &Self::Element, property: StyleProperty, value: &str);

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// Detach `element` from the document. Unknown elements are ignored.
    fn remove_element(&self, element: &Self::Element);

    /// Force pending style writes on `element` to be computed.
    ///
    /// Called between seeding a start value and writing the target so both
    /// writes are not coalesced into one. The default does nothing.
    fn flush_styles(&self, _element: &Self::Element) {}

    /// Register `listener` for `event` on `element`.
    fn add_listener(&self, element: &Self::Element, event: &str, listener: Listener) -> ListenerId;

    /// Remove a registration made by [`Host::add_listener`].
    ///
    /// Removing an unknown or already removed id is a no-op.
    fn remove_listener(&self, element: &Self::Element, event: &str, id: ListenerId);

    /// Run `task` once after `delay_ms`.
    fn schedule(&self, delay_ms: u64, task: Task) -> TimerId;

    /// Cancel a pending timer. Cancelling a fired timer is a no-op.
    fn cancel(&self, timer: TimerId);
}
