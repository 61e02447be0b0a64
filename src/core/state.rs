//! Lifecycle state of a transition sequence.
//!
//! A sequence counts down through one state per remaining step and ends in
//! [`SequenceState::Done`]. The state is a plain value; the driver that owns
//! it lives in the animation module.

use serde::{Deserialize, Serialize};

/// Position of a sequence within its step list.
///
/// # Example
///
/// ```rust
/// use segue::core::SequenceState;
///
/// let state = SequenceState::start(2);
/// assert_eq!(state, SequenceState::Running { remaining: 2 });
///
/// let state = state.advance().advance();
/// assert!(state.is_final());
/// assert_eq!(state.name(), "Done");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceState {
    /// Steps are still queued; the head step is animating.
    Running { remaining: usize },
    /// Every step has completed.
    Done,
}

impl SequenceState {
    /// Initial state for a sequence of `total` steps.
    ///
    /// An empty sequence starts out `Done`.
    pub fn start(total: usize) -> Self {
        if total == 0 {
            Self::Done
        } else {
            Self::Running { remaining: total }
        }
    }

    /// State after the head step completes.
    ///
    /// `Done` is terminal and advances to itself.
    pub fn advance(self) -> Self {
        match self {
            Self::Running { remaining } if remaining > 1 => Self::Running {
                remaining: remaining - 1,
            },
            _ => Self::Done,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Running { .. } => "Running",
            Self::Done => "Done",
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Steps not yet completed.
    pub fn remaining(&self) -> usize {
        match self {
            Self::Running { remaining } => *remaining,
            Self::Done => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_counts_all_steps() {
        assert_eq!(SequenceState::start(3).remaining(), 3);
        assert_eq!(SequenceState::start(0), SequenceState::Done);
    }

    #[test]
    fn advance_counts_down_to_done() {
        let mut state = SequenceState::start(3);
        let mut seen = vec![state.remaining()];
        while !state.is_final() {
            state = state.advance();
            seen.push(state.remaining());
        }
        assert_eq!(seen, vec![3, 2, 1, 0]);
    }

    #[test]
    fn done_is_terminal() {
        assert_eq!(SequenceState::Done.advance(), SequenceState::Done);
        assert!(SequenceState::Done.is_final());
        assert!(!SequenceState::Running { remaining: 1 }.is_final());
    }

    #[test]
    fn state_names() {
        assert_eq!(SequenceState::Running { remaining: 4 }.name(), "Running");
        assert_eq!(SequenceState::Done.name(), "Done");
    }

    #[test]
    fn state_serializes_correctly() {
        let state = SequenceState::Running { remaining: 2 };
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: SequenceState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
