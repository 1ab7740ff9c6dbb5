//! Indexed binary heap ordered by urgency.
//!
//! # Algorithm
//!
//! Array-backed binary heap where the root is the most urgent patient.
//! A side index (`PatientId` → heap slot) is updated on every swap, so
//! severity updates and removals locate their node in O(1) and restore
//! heap order with a single sift in O(log n).
//!
//! # Ordering
//! Severity descending, then arrival sequence ascending. Arrival
//! sequences are unique, so no two queued patients compare equal.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 6.5 (Priority Queues)

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::error::{TriageError, TriageResult};
use crate::models::{Patient, PatientId, Severity};

/// Total triage order: `Less` means `a` is served before `b`.
pub fn urgency_order(a: &Patient, b: &Patient) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| a.arrival_seq.cmp(&b.arrival_seq))
}

/// Severity-ordered queue of waiting patients.
///
/// # Example
/// ```
/// use u_triage::models::{Patient, Severity};
/// use u_triage::queue::PriorityQueue;
///
/// let mut queue = PriorityQueue::new();
/// queue.insert(Patient::new(101, "A", Severity::new(3).unwrap(), 1)).unwrap();
/// queue.insert(Patient::new(102, "B", Severity::new(5).unwrap(), 2)).unwrap();
/// assert_eq!(queue.extract_most_urgent().unwrap().id, 102);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PriorityQueue {
    heap: Vec<Patient>,
    positions: HashMap<PatientId, usize>,
}

impl PriorityQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` patients.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
        }
    }

    /// Queues a patient. O(log n).
    ///
    /// # Errors
    /// `DuplicateId` if a patient with the same ID is already queued.
    pub fn insert(&mut self, patient: Patient) -> TriageResult<()> {
        if self.positions.contains_key(&patient.id) {
            return Err(TriageError::DuplicateId(patient.id));
        }
        let slot = self.heap.len();
        self.positions.insert(patient.id, slot);
        self.heap.push(patient);
        let slot = self.sift_up(slot);
        debug!(patient_id = self.heap[slot].id, slot, "queued patient");
        Ok(())
    }

    /// Removes and returns the most urgent patient. O(log n).
    ///
    /// # Errors
    /// `EmptyQueue` if nobody is waiting.
    pub fn extract_most_urgent(&mut self) -> TriageResult<Patient> {
        if self.heap.is_empty() {
            return Err(TriageError::EmptyQueue);
        }
        Ok(self.remove_at(0))
    }

    /// Withdraws a specific patient from the queue. O(log n).
    ///
    /// # Errors
    /// `NotFound` if the patient is not queued.
    pub fn remove(&mut self, id: PatientId) -> TriageResult<Patient> {
        let slot = *self.positions.get(&id).ok_or(TriageError::NotFound(id))?;
        Ok(self.remove_at(slot))
    }

    /// Changes a queued patient's severity and restores heap order.
    ///
    /// Returns the previous severity.
    ///
    /// # Errors
    /// `NotFound` if the patient is not queued.
    pub fn update_severity(&mut self, id: PatientId, severity: Severity) -> TriageResult<Severity> {
        let slot = *self.positions.get(&id).ok_or(TriageError::NotFound(id))?;
        let previous = std::mem::replace(&mut self.heap[slot].severity, severity);

        let slot = match severity.cmp(&previous) {
            Ordering::Greater => self.sift_up(slot),
            Ordering::Less => self.sift_down(slot),
            Ordering::Equal => slot,
        };
        debug!(patient_id = id, %previous, %severity, slot, "re-prioritized patient");
        Ok(previous)
    }

    /// The most urgent patient, without removing it.
    pub fn peek(&self) -> Option<&Patient> {
        self.heap.first()
    }

    /// Looks up a queued patient.
    pub fn get(&self, id: PatientId) -> Option<&Patient> {
        self.positions.get(&id).map(|&slot| &self.heap[slot])
    }

    /// Whether the patient is queued.
    pub fn contains(&self, id: PatientId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Number of waiting patients.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nobody is waiting.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Iterates queued patients in heap (not service) order.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.heap.iter()
    }

    /// Queued patients in service order. Does not modify the queue.
    ///
    /// Sorting a copy yields exactly the sequence repeated extraction would,
    /// since `urgency_order` is total over queued patients.
    pub fn ordered(&self) -> Vec<&Patient> {
        let mut patients: Vec<&Patient> = self.heap.iter().collect();
        patients.sort_by(|a, b| urgency_order(a, b));
        patients
    }

    /// Patient IDs in service order. Does not modify the queue.
    pub fn ordered_ids(&self) -> Vec<PatientId> {
        self.ordered().into_iter().map(|p| p.id).collect()
    }

    fn remove_at(&mut self, slot: usize) -> Patient {
        let last = self.heap.len() - 1;
        self.swap(slot, last);
        let patient = self.heap.swap_remove(last);
        self.positions.remove(&patient.id);

        if slot < self.heap.len() {
            // The moved-in patient may belong above or below this slot.
            let moved = self.sift_up(slot);
            if moved == slot {
                self.sift_down(slot);
            }
        }
        patient
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        urgency_order(&self.heap[a], &self.heap[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.precedes(slot, parent) {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) -> usize {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            let right = left + 1;
            let mut best = slot;

            if left < len && self.precedes(left, best) {
                best = left;
            }
            if right < len && self.precedes(right, best) {
                best = right;
            }
            if best == slot {
                return slot;
            }
            self.swap(slot, best);
            slot = best;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.positions.insert(self.heap[a].id, a);
        self.positions.insert(self.heap[b].id, b);
    }
}
