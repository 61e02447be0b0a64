//! Record of completed sequence steps.
//!
//! A history is append-only: `record` returns a new history and leaves the
//! original untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a watched transition was confirmed complete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionCause {
    /// The host delivered a completion notification under this event name.
    Notified { event: String },
    /// No notification arrived; the stall timeout forced completion.
    TimedOut,
}

impl CompletionCause {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}

/// One completed step of a sequence.
///
/// # Example
///
/// ```rust
/// use segue::core::{CompletionCause, StepRecord};
/// use chrono::Utc;
///
/// let record = StepRecord {
///     index: 0,
///     total: 2,
///     duration_ms: 300,
///     cause: CompletionCause::Notified { event: "transitionend".into() },
///     completed_at: Utc::now(),
/// };
/// assert!(!record.is_last());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based position in the original step list
    pub index: usize,
    /// Length of the original step list
    pub total: usize,
    /// Configured transition duration of the step
    pub duration_ms: u64,
    pub cause: CompletionCause,
    pub completed_at: DateTime<Utc>,
}

impl StepRecord {
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// Ordered record of the steps a sequence has completed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceHistory {
    steps: Vec<StepRecord>,
}

impl SequenceHistory {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record a completed step, returning a new history.
    ///
    /// ```rust
    /// use segue::core::{CompletionCause, SequenceHistory, StepRecord};
    /// use chrono::Utc;
    ///
    /// let history = SequenceHistory::new();
    /// let next = history.record(StepRecord {
    ///     index: 0,
    ///     total: 1,
    ///     duration_ms: 100,
    ///     cause: CompletionCause::TimedOut,
    ///     completed_at: Utc::now(),
    /// });
    /// assert_eq!(next.steps().len(), 1);
    /// assert!(history.steps().is_empty()); // Original unchanged
    /// ```
    pub fn record(&self, step: StepRecord) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn last(&self) -> Option<&StepRecord> {
        self.steps.last()
    }

    /// Indices of completed steps, in completion order.
    pub fn indices(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.index).collect()
    }

    /// Number of steps forced through by the stall timeout.
    pub fn timed_out(&self) -> usize {
        self.steps.iter().filter(|s| s.cause.is_timeout()).count()
    }

    /// Wall-clock time between the first and last recorded completion.
    pub fn elapsed(&self) -> Option<Duration> {
        let (first, last) = (self.steps.first()?, self.steps.last()?);
        last.completed_at
            .signed_duration_since(first.completed_at)
            .to_std()
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, total: usize, cause: CompletionCause) -> StepRecord {
        StepRecord {
            index,
            total,
            duration_ms: 100,
            cause,
            completed_at: Utc::now(),
        }
    }

    fn notified() -> CompletionCause {
        CompletionCause::Notified {
            event: "transitionend".to_string(),
        }
    }

    #[test]
    fn record_is_append_only() {
        let empty = SequenceHistory::new();
        let one = empty.record(record(0, 2, notified()));
        let two = one.record(record(1, 2, CompletionCause::TimedOut));

        assert!(empty.steps().is_empty());
        assert_eq!(one.steps().len(), 1);
        assert_eq!(two.indices(), vec![0, 1]);
        assert!(two.last().unwrap().is_last());
    }

    #[test]
    fn counts_timeouts() {
        let history = SequenceHistory::new()
            .record(record(0, 3, notified()))
            .record(record(1, 3, CompletionCause::TimedOut))
            .record(record(2, 3, notified()));
        assert_eq!(history.timed_out(), 1);
    }

    #[test]
    fn elapsed_requires_records() {
        assert!(SequenceHistory::new().elapsed().is_none());

        let start = Utc::now();
        let history = SequenceHistory::new()
            .record(StepRecord {
                completed_at: start,
                ..record(0, 2, notified())
            })
            .record(StepRecord {
                completed_at: start + chrono::Duration::milliseconds(250),
                ..record(1, 2, notified())
            });
        assert_eq!(history.elapsed(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn history_roundtrip_serialization() {
        let history = SequenceHistory::new()
            .record(record(0, 2, notified()))
            .record(record(1, 2, CompletionCause::TimedOut));

        let json = serde_json::to_string(&history).unwrap();
        let back: SequenceHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
