//! Transition history tracking.
//!
//! Every machine keeps a [`HistoryLog`]: the initial state plus one
//! timestamped [`TransitionRecord`] per successful transition. The log is
//! append-only and unbounded, and never deduplicates revisited states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single successful transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The event that fired
    pub event: String,
    /// The state the machine left
    pub from: String,
    /// The state the machine entered
    pub to: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only log of the states a machine has occupied.
///
/// The log is seeded with the machine's initial state, so [`states`] always
/// holds at least one entry and its length is one greater than the number
/// of recorded transitions. `record` returns a new log rather than
/// mutating in place.
///
/// [`states`]: HistoryLog::states
///
/// # Example
///
/// ```rust
/// use transit::core::{HistoryLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = HistoryLog::new("new");
/// let log = log.record(TransitionRecord {
///     event: "pay".to_string(),
///     from: "new".to_string(),
///     to: "paid".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.states(), ["new", "paid"]);
/// assert_eq!(log.latest(), "paid");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLog {
    initial: String,
    records: Vec<TransitionRecord>,
}

impl HistoryLog {
    /// Create a log seeded with the initial state.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            initial: initial.into(),
            records: Vec::new(),
        }
    }

    /// Append a transition, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self {
            initial: self.initial.clone(),
            records,
        }
    }

    /// States occupied so far, oldest first, starting with the initial
    /// state.
    pub fn states(&self) -> Vec<&str> {
        let mut states = Vec::with_capacity(1 + self.records.len());
        states.push(self.initial.as_str());
        for record in &self.records {
            states.push(record.to.as_str());
        }
        states
    }

    /// The most recently entered state, or the initial state when nothing
    /// has been recorded yet.
    pub fn latest(&self) -> &str {
        self.records
            .last()
            .map(|r| r.to.as_str())
            .unwrap_or(&self.initial)
    }

    /// The state the log was seeded with.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// All recorded transitions in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Elapsed time between the first and last recorded transition.
    ///
    /// `None` when nothing has been recorded yet.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }
}
