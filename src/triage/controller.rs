//! Triage controller.
//!
//! # Algorithm
//!
//! 1. **Admit**: validate, stamp the next arrival sequence, index the
//!    patient in both the priority queue and the record store.
//! 2. **Serve**: pop the most urgent patient, take the doctor on turn,
//!    log a history entry, then mark (or drop) the record.
//! 3. **Re-prioritize**: change severity in the queue and the record store
//!    together.
//!
//! Every operation validates before it mutates, so a rejected call leaves
//! all structures untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::compare::OrderingComparison;
use super::config::TriageConfig;
use crate::error::{TriageError, TriageResult};
use crate::models::{
    Doctor, HistoryEntry, Patient, PatientId, PatientIntake, PatientStatus, Severity,
};
use crate::queue::{FcfsQueue, PriorityQueue};
use crate::records::{PatientStore, Traversal, TraversalOrder};
use crate::service::{DoctorRotation, ServiceHistory};
use crate::validation::{normalize_name, validate_intake, ValidationError};

/// Result of serving one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServedPatient {
    /// The patient, as extracted from the queue.
    pub patient: Patient,
    /// Assigned doctor.
    pub doctor: Doctor,
    /// Service sequence number.
    pub sequence: u64,
}

/// Counts for a status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSnapshot {
    /// Patients waiting.
    pub waiting: usize,
    /// Records in the store.
    pub records: usize,
    /// History entries held.
    pub history_len: usize,
    /// History bound.
    pub history_capacity: usize,
    /// Patients served so far this session.
    pub served_total: u64,
    /// Doctor on turn.
    pub next_doctor: String,
}

/// Owns and coordinates every triage structure for one session.
///
/// # Example
/// ```
/// use u_triage::triage::{TriageConfig, TriageController};
///
/// let mut triage = TriageController::new(&TriageConfig::new(["Grey", "Yang"])).unwrap();
/// triage.add_patient(101, "Alice", 3).unwrap();
/// triage.add_patient(102, "Bob", 5).unwrap();
///
/// let served = triage.serve_patient().unwrap();
/// assert_eq!(served.patient.id, 102);
/// assert_eq!(served.doctor.name, "Grey");
/// ```
#[derive(Debug, Clone)]
pub struct TriageController {
    queue: PriorityQueue,
    records: PatientStore,
    rotation: DoctorRotation,
    history: ServiceHistory,
    last_arrival: u64,
    last_service: u64,
    retain_served_records: bool,
}

impl TriageController {
    /// Builds a session from a configuration.
    ///
    /// # Errors
    /// `EmptyRotation`, `BlankName`, or `InvalidCapacity` per
    /// [`TriageConfig::validate`].
    pub fn new(config: &TriageConfig) -> TriageResult<Self> {
        config.validate()?;
        let rotation = DoctorRotation::new(&config.doctors)?;
        let history = ServiceHistory::new(config.history_capacity)?;
        info!(
            doctors = rotation.len(),
            history_capacity = history.capacity(),
            "triage session configured"
        );
        Ok(Self {
            queue: PriorityQueue::new(),
            records: PatientStore::new(),
            rotation,
            history,
            last_arrival: 0,
            last_service: 0,
            retain_served_records: config.retain_served_records,
        })
    }

    /// Admits a patient.
    ///
    /// # Errors
    /// - `InvalidSeverity` if `severity` is outside 1..=5.
    /// - `BlankName` if `name` is blank.
    /// - `DuplicateId` if the ID is queued or recorded.
    pub fn add_patient(
        &mut self,
        id: PatientId,
        name: &str,
        severity: i64,
    ) -> TriageResult<Patient> {
        let severity = Severity::new(severity)?;
        let name = normalize_name(name, "patient")?;
        if self.queue.contains(id) || self.records.contains(id) {
            return Err(TriageError::DuplicateId(id));
        }

        self.last_arrival += 1;
        let patient = Patient::new(id, name, severity, self.last_arrival);
        self.queue.insert(patient.clone())?;
        self.records.insert(patient.clone())?;

        info!(
            patient_id = id,
            %severity,
            arrival_seq = patient.arrival_seq,
            waiting = self.queue.len(),
            "admitted patient"
        );
        Ok(patient)
    }

    /// Admits a batch atomically: either every row is admitted, in order,
    /// or none is and every problem is reported.
    pub fn admit_all(&mut self, batch: &[PatientIntake]) -> Result<Vec<Patient>, Vec<ValidationError>> {
        validate_intake(batch, |id| self.queue.contains(id) || self.records.contains(id))?;

        let mut admitted = Vec::with_capacity(batch.len());
        for row in batch {
            // Already validated; a failure here would be a store bug.
            if let Ok(patient) = self.add_patient(row.id, &row.name, row.severity) {
                admitted.push(patient);
            }
        }
        Ok(admitted)
    }

    /// Serves the most urgent waiting patient.
    ///
    /// # Errors
    /// `EmptyQueue` if nobody is waiting.
    pub fn serve_patient(&mut self) -> TriageResult<ServedPatient> {
        let mut patient = self.queue.extract_most_urgent()?;
        patient.status = PatientStatus::Served;

        let doctor = self.rotation.next_doctor().clone();
        self.last_service += 1;
        self.history
            .push(HistoryEntry::new(&patient, &doctor, self.last_service));

        if self.retain_served_records {
            self.records.set_status(patient.id, PatientStatus::Served)?;
        } else {
            self.records.remove(patient.id)?;
        }

        info!(
            patient_id = patient.id,
            severity = %patient.severity,
            doctor = %doctor.name,
            sequence = self.last_service,
            waiting = self.queue.len(),
            "served patient"
        );
        Ok(ServedPatient {
            patient,
            doctor,
            sequence: self.last_service,
        })
    }

    /// Changes a waiting patient's severity in both the queue and the
    /// record store. Returns the previous severity.
    ///
    /// Served patients keep the severity they were served at.
    ///
    /// # Errors
    /// - `InvalidSeverity` if `severity` is outside 1..=5.
    /// - `NotFound` if the patient is not waiting.
    pub fn update_severity(&mut self, id: PatientId, severity: i64) -> TriageResult<Severity> {
        let severity = Severity::new(severity)?;
        if !self.queue.contains(id) || !self.records.contains(id) {
            return Err(TriageError::NotFound(id));
        }

        let previous = self.queue.update_severity(id, severity)?;
        self.records.update_severity(id, severity)?;
        info!(patient_id = id, %previous, %severity, "updated severity");
        Ok(previous)
    }

    /// Deletes a record. A patient still waiting is withdrawn from the
    /// queue as well.
    ///
    /// # Errors
    /// `NotFound` if no record has this ID.
    pub fn remove_record(&mut self, id: PatientId) -> TriageResult<Patient> {
        let removed = self.records.remove(id)?;
        if self.queue.contains(id) {
            self.queue.remove(id)?;
            debug!(patient_id = id, "withdrew waiting patient");
        }
        info!(patient_id = id, "removed record");
        Ok(removed)
    }

    /// The pending set in severity-first and arrival order.
    ///
    /// Works on copies; neither the queue nor the store changes.
    pub fn compare_orderings(&self) -> OrderingComparison {
        let priority: Vec<Patient> = self.queue.ordered().into_iter().cloned().collect();
        let fcfs = FcfsQueue::from_arrivals(self.queue.iter().cloned());
        OrderingComparison {
            priority,
            fcfs: fcfs.iter().cloned().collect(),
        }
    }

    /// Looks up a record.
    ///
    /// # Errors
    /// `NotFound` if no record has this ID.
    pub fn find(&self, id: PatientId) -> TriageResult<&Patient> {
        self.records.find(id)
    }

    /// Walks the record store.
    pub fn traverse(&self, order: TraversalOrder) -> Traversal<'_> {
        self.records.traverse(order)
    }

    /// Removes the most recent history entry.
    pub fn pop_history(&mut self) -> Option<HistoryEntry> {
        self.history.pop()
    }

    /// Most recent history entry.
    pub fn peek_history(&self) -> Option<&HistoryEntry> {
        self.history.peek()
    }

    /// Service history.
    pub fn history(&self) -> &ServiceHistory {
        &self.history
    }

    /// Waiting patients.
    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }

    /// Patient records.
    pub fn records(&self) -> &PatientStore {
        &self.records
    }

    /// Doctor rotation.
    pub fn rotation(&self) -> &DoctorRotation {
        &self.rotation
    }

    /// Number of waiting patients.
    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    /// Summary counts.
    pub fn snapshot(&self) -> TriageSnapshot {
        TriageSnapshot {
            waiting: self.queue.len(),
            records: self.records.len(),
            history_len: self.history.len(),
            history_capacity: self.history.capacity(),
            served_total: self.last_service,
            next_doctor: self.rotation.on_turn().name.clone(),
        }
    }
}
