//! Transition log of a context.
//!
//! Every installation of a state, including the initial one, appends a
//! [`TransitionRecord`]. States are recorded by name so the log can be
//! serialised alongside a checkpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single transition.
///
/// `from` is `None` for the record written when a context installs its
/// initial state.
///
/// # Example
///
/// ```rust
/// use shifter::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: Some("Idle".to_string()),
///     to: "Busy".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_initial());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Name of the state being replaced
    pub from: Option<String>,
    /// Name of the state being installed
    pub to: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Whether this record is the initial installation.
    pub fn is_initial(&self) -> bool {
        self.from.is_none()
    }
}

/// Ordered log of transitions.
///
/// [`record`](TransitionLog::record) is pure and returns a new log. The
/// context appends in place and may cap the log at a fixed capacity, in
/// which case the oldest records are dropped first.
///
/// # Example
///
/// ```rust
/// use shifter::core::{TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new()
///     .record(TransitionRecord {
///         from: None,
///         to: "Idle".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(TransitionRecord {
///         from: Some("Idle".to_string()),
///         to: "Busy".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// assert_eq!(log.path(), vec!["Idle", "Busy"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new log.
    ///
    /// The existing log is left unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    pub(crate) fn push(&mut self, record: TransitionRecord, capacity: Option<usize>) {
        self.records.push(record);
        if let Some(capacity) = capacity {
            self.truncate_front(capacity);
        }
    }

    pub(crate) fn truncate_front(&mut self, capacity: usize) {
        if self.records.len() > capacity {
            let excess = self.records.len() - capacity;
            self.records.drain(..excess);
        }
    }

    /// Names of the states traversed.
    ///
    /// Starts with the `from` of the first record when it has one (the
    /// log was capped or built by hand), then the `to` of every record.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(from) = self.records.first().and_then(|r| r.from.as_deref()) {
            path.push(from);
        }
        for record in &self.records {
            path.push(record.to.as_str());
        }
        path
    }

    /// Time between the first and last record.
    ///
    /// Returns `None` for an empty log or when timestamps run backwards.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// All records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(from: Option<&str>, to: &str) -> TransitionRecord {
        TransitionRecord {
            from: from.map(str::to_string),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::new();
        assert!(log.is_empty());
        assert!(log.path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let log = TransitionLog::new();
        let new_log = log.record(record(None, "A"));

        assert_eq!(log.len(), 0);
        assert_eq!(new_log.len(), 1);
    }

    #[test]
    fn path_starts_at_initial_installation() {
        let log = TransitionLog::new()
            .record(record(None, "A"))
            .record(record(Some("A"), "B"))
            .record(record(Some("B"), "A"));

        assert_eq!(log.path(), vec!["A", "B", "A"]);
    }

    #[test]
    fn path_includes_leading_from_of_capped_log() {
        let log = TransitionLog::new()
            .record(record(Some("A"), "B"))
            .record(record(Some("B"), "C"));

        assert_eq!(log.path(), vec!["A", "B", "C"]);
    }

    #[test]
    fn push_respects_capacity() {
        let mut log = TransitionLog::new();
        log.push(record(None, "A"), Some(2));
        log.push(record(Some("A"), "B"), Some(2));
        log.push(record(Some("B"), "C"), Some(2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].to, "B");
        assert_eq!(log.last().map(|r| r.to.as_str()), Some("C"));
    }

    #[test]
    fn push_without_capacity_keeps_everything() {
        let mut log = TransitionLog::new();
        for _ in 0..50 {
            log.push(record(Some("A"), "A"), None);
        }
        assert_eq!(log.len(), 50);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let first = record(None, "A");
        std::thread::sleep(Duration::from_millis(10));
        let second = record(Some("A"), "B");

        let log = TransitionLog::new().record(first).record(second);

        let duration = log.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn single_record_has_zero_duration() {
        let log = TransitionLog::new().record(record(None, "A"));
        assert_eq!(log.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn initial_record_is_flagged() {
        assert!(record(None, "A").is_initial());
        assert!(!record(Some("A"), "B").is_initial());
    }

    #[test]
    fn log_serializes_correctly() {
        let log = TransitionLog::new()
            .record(record(None, "A"))
            .record(record(Some("A"), "B"));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog = serde_json::from_str(&json).unwrap();

        assert_eq!(log, deserialized);
    }
}
