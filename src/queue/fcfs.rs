//! First-come-first-served baseline queue.
//!
//! Plain FIFO, optionally bounded. Used as the comparison baseline for
//! the severity-ordered queue and by the benchmark harness.

use std::collections::VecDeque;

use crate::error::{TriageError, TriageResult};
use crate::models::Patient;

/// Arrival-ordered queue.
#[derive(Debug, Clone, Default)]
pub struct FcfsQueue {
    patients: VecDeque<Patient>,
    capacity: Option<usize>,
}

impl FcfsQueue {
    /// Creates an unbounded queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a queue that holds at most `capacity` patients.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero.
    pub fn bounded(capacity: usize) -> TriageResult<Self> {
        if capacity == 0 {
            return Err(TriageError::InvalidCapacity(capacity));
        }
        Ok(Self {
            patients: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        })
    }

    /// Builds an unbounded queue from patients in any order, sorted by
    /// arrival sequence.
    pub fn from_arrivals<I>(patients: I) -> Self
    where
        I: IntoIterator<Item = Patient>,
    {
        let mut sorted: Vec<Patient> = patients.into_iter().collect();
        sorted.sort_by_key(|p| p.arrival_seq);
        Self {
            patients: sorted.into(),
            capacity: None,
        }
    }

    /// Appends a patient at the rear.
    ///
    /// # Errors
    /// `QueueFull` if the queue is bounded and full.
    pub fn enqueue(&mut self, patient: Patient) -> TriageResult<()> {
        if let Some(cap) = self.capacity.filter(|&cap| self.patients.len() >= cap) {
            return Err(TriageError::QueueFull(cap));
        }
        self.patients.push_back(patient);
        Ok(())
    }

    /// Removes the patient at the front.
    ///
    /// # Errors
    /// `EmptyQueue` if nobody is waiting.
    pub fn dequeue(&mut self) -> TriageResult<Patient> {
        self.patients.pop_front().ok_or(TriageError::EmptyQueue)
    }

    /// Earliest arrival still waiting.
    pub fn front(&self) -> Option<&Patient> {
        self.patients.front()
    }

    /// Latest arrival.
    pub fn rear(&self) -> Option<&Patient> {
        self.patients.back()
    }

    /// Front to rear.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Patient> {
        self.patients.iter()
    }

    /// Number of waiting patients.
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Whether nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Whether a bounded queue is at capacity.
    pub fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|cap| self.patients.len() >= cap)
    }

    /// Configured bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn patient(id: u64, seq: u64) -> Patient {
        Patient::new(id, format!("P{id}"), Severity::new(3).unwrap(), seq)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = FcfsQueue::new();
        queue.enqueue(patient(1, 1)).unwrap();
        queue.enqueue(patient(2, 2)).unwrap();
        queue.enqueue(patient(3, 3)).unwrap();

        assert_eq!(queue.front().unwrap().id, 1);
        assert_eq!(queue.rear().unwrap().id, 3);
        let backward: Vec<u64> = queue.iter().rev().map(|p| p.id).collect();
        assert_eq!(backward, vec![3, 2, 1]);

        assert_eq!(queue.dequeue().unwrap().id, 1);
        assert_eq!(queue.dequeue().unwrap().id, 2);
        assert_eq!(queue.dequeue().unwrap().id, 3);
        assert_eq!(queue.dequeue(), Err(TriageError::EmptyQueue));
    }

    #[test]
    fn test_bounded_rejects_overflow() {
        let mut queue = FcfsQueue::bounded(2).unwrap();
        queue.enqueue(patient(1, 1)).unwrap();
        queue.enqueue(patient(2, 2)).unwrap();
        assert!(queue.is_full());
        assert_eq!(queue.enqueue(patient(3, 3)), Err(TriageError::QueueFull(2)));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_zero_capacity() {
        assert_eq!(
            FcfsQueue::bounded(0).unwrap_err(),
            TriageError::InvalidCapacity(0)
        );
    }

    #[test]
    fn test_from_arrivals_sorts() {
        let queue = FcfsQueue::from_arrivals(vec![patient(9, 3), patient(7, 1), patient(8, 2)]);
        let ids: Vec<u64> = queue.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
        assert!(!queue.is_full());
        assert_eq!(queue.capacity(), None);
    }
}
