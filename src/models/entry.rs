//! Service history entry.
//!
//! Records that a patient was seen by a doctor. The patient fields are a
//! snapshot taken at service time, so later record edits do not rewrite
//! history.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Doctor, Patient, PatientId, Severity};

/// Immutable record of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Served patient ID.
    pub patient_id: PatientId,
    /// Patient name at service time.
    pub patient_name: String,
    /// Severity at service time.
    pub severity: Severity,
    /// Assigned doctor.
    pub doctor: String,
    /// Service order (1-based, monotonic per session).
    pub sequence: u64,
}

impl HistoryEntry {
    /// Snapshots a service of `patient` by `doctor`.
    pub fn new(patient: &Patient, doctor: &Doctor, sequence: u64) -> Self {
        Self {
            patient_id: patient.id,
            patient_name: patient.name.clone(),
            severity: patient.severity,
            doctor: doctor.name.clone(),
            sequence,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} Patient(id={}, name={}, sev={}) served by Dr. {}",
            self.sequence, self.patient_id, self.patient_name, self.severity, self.doctor
        )
    }
}
