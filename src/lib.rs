//! Segue: event-driven CSS transition sequencing
//!
//! Segue runs style transitions on document elements and chains them into
//! ordered sequences. Completion is detected from the host's own
//! transition-end notifications rather than from timers guessed to match
//! the animation duration.
//!
//! # Core Concepts
//!
//! - **Host**: the document being animated, behind the [`host::Host`] trait
//! - **Watcher**: a one-shot listener across every vendor spelling of the
//!   transition-end event
//! - **Transition**: one change set applied to one element over a duration
//! - **Sequence**: transitions run one after another, each gated on the
//!   previous one's completion
//!
//! # Example
//!
//! ```rust
//! use segue::animation::{on_finish, on_step, Animator, TransitionStep};
//! use segue::core::{StyleChangeSet, StyleProperty};
//! use segue::host::{ElementId, Host, MemoryDocument};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let doc = MemoryDocument::new();
//! let title = doc.create_element("h1");
//! let body = doc.create_element("p");
//! let animator = Animator::new(doc.clone());
//!
//! let finished = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&finished);
//! let handle = animator
//!     .sequence(
//!         vec![
//!             TransitionStep::new(title, StyleChangeSet::new().with(StyleProperty::Opacity, "0"), 100),
//!             TransitionStep::new(body, StyleChangeSet::new().with(StyleProperty::Left, "50px"), 300),
//!         ],
//!         on_finish(move || flag.set(true)),
//!         on_step(|el: &ElementId, index, total| println!("{el:?}: {}/{total}", index + 1)),
//!     )
//!     .unwrap();
//!
//! doc.run_until_idle();
//! assert!(finished.get());
//! assert!(handle.is_done());
//! assert_eq!(doc.style(&body, StyleProperty::Transition), "");
//! ```

pub mod animation;
pub mod builder;
pub mod config;
pub mod core;
pub mod display;
pub mod host;

// Re-export commonly used types
pub use animation::{AnimationError, Animator, SequenceHandle, TransitionStep};
pub use builder::{AnimatorBuilder, SequenceBuilder};
pub use config::AnimatorConfig;
pub use core::{size_fill, Rect, StyleChangeSet, StyleProperty};
pub use host::Host;
