//! Transition engine: completion watching, single transitions, sequences
//! and fade presets.
//!
//! Every operation is a method on [`Animator`], a cheap handle pairing a
//! [`Host`] with an [`AnimatorConfig`]. Completion is always detected from
//! host notifications; nothing here waits on a fixed timer unless a stall
//! timeout is configured.
//!
//! # Example
//!
//! ```rust
//! use segue::animation::{then, Animator};
//! use segue::core::{StyleChangeSet, StyleProperty};
//! use segue::host::{ElementId, Host, MemoryDocument};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let doc = MemoryDocument::new();
//! let el = doc.create_element("div");
//! let animator = Animator::new(doc.clone());
//!
//! let done = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&done);
//! animator
//!     .animate(
//!         &el,
//!         &StyleChangeSet::new().with(StyleProperty::Left, "50px"),
//!         300,
//!         then(move |_: &ElementId| flag.set(true)),
//!         true,
//!     )
//!     .unwrap();
//!
//! doc.advance(300);
//! assert!(done.get());
//! assert_eq!(doc.style(&el, StyleProperty::Transition), "");
//! ```

mod error;
mod presets;
mod sequence;
mod transition;
mod watcher;

pub use error::{AnimationError, StepViolation};
pub use sequence::{
    on_finish, on_step, validate_steps, SequenceCallback, SequenceHandle, StepCallback,
    TransitionStep,
};
pub use watcher::{then, OnComplete, COMPLETION_EVENTS, PENDING_ATTRIBUTE};

use crate::config::AnimatorConfig;
use crate::host::Host;

/// Animation service bound to one host document.
///
/// Cloning is cheap and shares the host.
#[derive(Clone, Debug)]
pub struct Animator<H: Host> {
    host: H,
    config: AnimatorConfig,
}

impl<H: Host> Animator<H> {
    /// Animator with the default configuration (no stall timeout).
    pub fn new(host: H) -> Self {
        Self::with_config(host, AnimatorConfig::default())
    }

    pub fn with_config(host: H, config: AnimatorConfig) -> Self {
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }
}
