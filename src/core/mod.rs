//! Pure value types and helpers.
//!
//! Nothing in this module touches a host document:
//! - Style vocabulary and change sets
//! - Cover-fit rectangle sizing
//! - Hex colors
//! - Sequence lifecycle state and step history

mod color;
mod history;
mod rect;
mod state;
mod style;

pub use color::{lighten_hex, Color, ColorError};
pub use history::{CompletionCause, SequenceHistory, StepRecord};
pub use rect::{size_fill, Rect};
pub use state::SequenceState;
pub use style::{StyleChangeSet, StyleError, StyleProperty};
