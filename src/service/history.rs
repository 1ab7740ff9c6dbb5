//! Bounded log of recent services.
//!
//! Behaves as a stack (newest on top) with a sliding window: pushing onto
//! a full stack evicts the oldest entry at the bottom rather than
//! rejecting the new one.

use std::collections::VecDeque;

use tracing::warn;

use crate::error::{TriageError, TriageResult};
use crate::models::HistoryEntry;

/// Most-recent-first service history with a fixed capacity.
#[derive(Debug, Clone)]
pub struct ServiceHistory {
    /// Oldest at the front, newest at the back.
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl ServiceHistory {
    /// Creates an empty history holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> TriageResult<Self> {
        if capacity == 0 {
            return Err(TriageError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Pushes an entry on top, returning the evicted oldest entry if the
    /// stack was full.
    pub fn push(&mut self, entry: HistoryEntry) -> Option<HistoryEntry> {
        let evicted = if self.is_full() {
            self.entries.pop_front()
        } else {
            None
        };
        if let Some(old) = &evicted {
            warn!(
                sequence = old.sequence,
                patient_id = old.patient_id,
                capacity = self.capacity,
                "history full, evicted oldest entry"
            );
        }
        self.entries.push_back(entry);
        evicted
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    /// The most recent entry.
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Entries from most recent to least recent.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Configured bound.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether nothing has been recorded (or everything was popped).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the next push will evict.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Doctor, Patient, Severity};

    fn entry(seq: u64) -> HistoryEntry {
        let patient = Patient::new(seq, format!("P{seq}"), Severity::new(3).unwrap(), seq);
        HistoryEntry::new(&patient, &Doctor::new("Who", 0), seq)
    }

    fn sequences(history: &ServiceHistory) -> Vec<u64> {
        history.iter().map(|e| e.sequence).collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(
            ServiceHistory::new(0).unwrap_err(),
            TriageError::InvalidCapacity(0)
        );
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = ServiceHistory::new(5).unwrap();
        assert!(history.is_empty());
        for seq in 1..=3 {
            assert!(history.push(entry(seq)).is_none());
        }
        assert_eq!(sequences(&history), vec![3, 2, 1]);
        assert_eq!(history.peek().unwrap().sequence, 3);
        // Display does not mutate.
        assert_eq!(history.len(), 3);
        assert!(!history.is_full());
    }

    #[test]
    fn test_overflow_evicts_oldest() {
        let mut history = ServiceHistory::new(3).unwrap();
        for seq in 1..=3 {
            history.push(entry(seq));
        }
        assert!(history.is_full());

        let evicted = history.push(entry(4)).unwrap();
        assert_eq!(evicted.sequence, 1);
        assert_eq!(sequences(&history), vec![4, 3, 2]);
        assert_eq!(history.len(), history.capacity());
    }

    #[test]
    fn test_capacity_one_keeps_latest() {
        let mut history = ServiceHistory::new(1).unwrap();
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.peek().unwrap().sequence, 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_pop() {
        let mut history = ServiceHistory::new(2).unwrap();
        assert!(history.pop().is_none());
        history.push(entry(1));
        history.push(entry(2));
        assert_eq!(history.pop().unwrap().sequence, 2);
        assert_eq!(history.pop().unwrap().sequence, 1);
        assert!(history.is_empty());
        assert!(history.peek().is_none());
    }
}
