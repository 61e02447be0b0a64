//! Browser host backed by `web-sys`.
//!
//! Listener closures are owned by the document handle and released when
//! their registration is removed. A registration is usually removed from
//! inside its own callback, so released closures are parked and dropped on
//! the next turn of the event loop instead of immediately.
//!
//! Browsers batch style writes made in the same frame, so a start value
//! written right before its target would never transition. `flush_styles`
//! reads `offsetWidth` to force the pending writes through first.

use super::{Host, Listener, ListenerId, Task, TimerId};
use crate::core::StyleProperty;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

type EventClosure = Closure<dyn FnMut(web_sys::Event)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<u64, EventClosure>,
    retired: Vec<EventClosure>,
    timers: HashMap<u64, i32>,
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// [`Host`] over live DOM elements.
#[derive(Clone, Default)]
pub struct WebDocument {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for WebDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("WebDocument")
            .field("listeners", &registry.listeners.len())
            .field("timers", &registry.timers.len())
            .finish()
    }
}

impl WebDocument {
    pub fn new() -> Self {
        Self::default()
    }

    fn retire(&self, closure: EventClosure) {
        let first = {
            let mut registry = self.registry.borrow_mut();
            registry.retired.push(closure);
            registry.retired.len() == 1
        };
        if !first {
            return;
        }

        let registry = Rc::clone(&self.registry);
        let flush = Closure::once_into_js(move || registry.borrow_mut().retired.clear());
        let Some(window) = web_sys::window() else {
            log::warn!("no window; retired listeners are kept until the document is dropped");
            return;
        };
        if let Err(e) =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(flush.unchecked_ref(), 0)
        {
            log::warn!("failed to schedule listener cleanup: {e:?}");
        }
    }
}

impl Host for WebDocument {
    type Element = HtmlElement;

    fn style(&self, element: &HtmlElement, property: StyleProperty) -> String {
        element
            .style()
            .get_property_value(property.css_name())
            .unwrap_or_default()
    }

    fn set_style(&self, element: &HtmlElement, property: StyleProperty, value: &str) {
        let style = element.style();
        let result = if value.is_empty() {
            style.remove_property(property.css_name()).map(|_| ())
        } else {
            style.set_property(property.css_name(), value)
        };
        if let Err(e) = result {
            log::warn!("failed to set {property} to '{value}': {e:?}");
        }
    }

    fn attribute(&self, element: &HtmlElement, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &HtmlElement, name: &str, value: &str) {
        if let Err(e) = element.set_attribute(name, value) {
            log::warn!("failed to set attribute {name}: {e:?}");
        }
    }

    fn remove_attribute(&self, element: &HtmlElement, name: &str) {
        if let Err(e) = element.remove_attribute(name) {
            log::warn!("failed to remove attribute {name}: {e:?}");
        }
    }

    fn remove_element(&self, element: &HtmlElement) {
        element.remove();
    }

    fn flush_styles(&self, element: &HtmlElement) {
        let _ = element.offset_width();
    }

    fn add_listener(&self, element: &HtmlElement, event: &str, listener: Listener) -> ListenerId {
        let closure = EventClosure::new(move |evt: web_sys::Event| listener(evt.type_().as_str()));
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        if let Err(e) = element.add_event_listener_with_callback(event, callback) {
            log::warn!("failed to add {event} listener: {e:?}");
        }

        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.listeners.insert(id, closure);
        ListenerId(id)
    }

    fn remove_listener(&self, element: &HtmlElement, event: &str, id: ListenerId) {
        let closure = self.registry.borrow_mut().listeners.remove(&id.0);
        let Some(closure) = closure else {
            return;
        };
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        if let Err(e) = element.remove_event_listener_with_callback(event, callback) {
            log::warn!("failed to remove {event} listener: {e:?}");
        }
        self.retire(closure);
    }

    fn schedule(&self, delay_ms: u64, task: Task) -> TimerId {
        let id = self.registry.borrow_mut().next_id();
        let Some(window) = web_sys::window() else {
            log::warn!("no window; timer {id} will never fire");
            return TimerId(id);
        };

        let registry = Rc::clone(&self.registry);
        let callback = Closure::once_into_js(move || {
            registry.borrow_mut().timers.remove(&id);
            task();
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay) {
            Ok(handle) => {
                self.registry.borrow_mut().timers.insert(id, handle);
            }
            Err(e) => log::warn!("failed to schedule timer: {e:?}"),
        }
        TimerId(id)
    }

    fn cancel(&self, timer: TimerId) {
        let handle = self.registry.borrow_mut().timers.remove(&timer.0);
        if let (Some(handle), Some(window)) = (handle, web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }
}
