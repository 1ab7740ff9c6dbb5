//! Patient model.
//!
//! A patient is the unit of work in triage: identified by a caller-supplied
//! ID, rated on a 1-5 severity scale, and stamped with an arrival sequence
//! number at intake. The arrival sequence only breaks severity ties.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{TriageError, TriageResult};

/// Caller-supplied patient identifier.
pub type PatientId = u64;

/// Urgency rating on a 1-5 scale (5 = most urgent).
///
/// Construction validates the range, so a `Severity` value is always in
/// `[1, 5]`. Ordering follows urgency: `Severity::CRITICAL` is the greatest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Severity(u8);

impl Severity {
    /// Lowest valid rating.
    pub const MIN: u8 = 1;
    /// Highest valid rating.
    pub const MAX: u8 = 5;

    /// Non-urgent.
    pub const LOW: Severity = Severity(1);
    /// Critical, served first.
    pub const CRITICAL: Severity = Severity(5);

    /// Every rating, lowest first.
    pub const ALL: [Severity; 5] = [
        Severity(1),
        Severity(2),
        Severity(3),
        Severity(4),
        Severity(5),
    ];

    /// Validates and wraps a raw rating.
    ///
    /// # Errors
    /// `InvalidSeverity` if `value` is outside `1..=5`.
    pub fn new(value: i64) -> TriageResult<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(TriageError::InvalidSeverity(value))
        }
    }

    /// Raw rating.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Severity {
    type Error = TriageError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for i64 {
    fn from(severity: Severity) -> Self {
        i64::from(severity.0)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a patient is in the triage lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    /// Queued, not yet seen by a doctor.
    #[default]
    Waiting,
    /// Served; kept for record display.
    Served,
}

/// A patient known to the triage system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Unique identifier.
    pub id: PatientId,
    /// Display name (never blank).
    pub name: String,
    /// Current urgency rating.
    pub severity: Severity,
    /// Intake order, assigned once and never changed.
    pub arrival_seq: u64,
    /// Lifecycle state.
    pub status: PatientStatus,
}

impl Patient {
    /// Creates a waiting patient.
    pub fn new(
        id: PatientId,
        name: impl Into<String>,
        severity: Severity,
        arrival_seq: u64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            severity,
            arrival_seq,
            status: PatientStatus::Waiting,
        }
    }

    /// Sets the lifecycle state.
    pub fn with_status(mut self, status: PatientStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the patient is still queued.
    pub fn is_waiting(&self) -> bool {
        self.status == PatientStatus::Waiting
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={}, name={}, severity={}",
            self.id, self.name, self.severity
        )
    }
}

/// Unvalidated intake request, as typed by a clerk or read from a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientIntake {
    /// Requested identifier.
    pub id: PatientId,
    /// Requested name.
    pub name: String,
    /// Raw severity, checked at admission.
    pub severity: i64,
}

impl PatientIntake {
    /// Creates an intake request.
    pub fn new(id: PatientId, name: impl Into<String>, severity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_range() {
        assert_eq!(Severity::new(1).unwrap(), Severity::LOW);
        assert_eq!(Severity::new(5).unwrap(), Severity::CRITICAL);
        assert_eq!(Severity::new(0), Err(TriageError::InvalidSeverity(0)));
        assert_eq!(Severity::new(6), Err(TriageError::InvalidSeverity(6)));
        assert_eq!(Severity::new(-3), Err(TriageError::InvalidSeverity(-3)));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::CRITICAL > Severity::new(4).unwrap());
        assert_eq!(Severity::ALL.iter().max(), Some(&Severity::CRITICAL));
    }

    #[test]
    fn test_severity_serde_rejects_out_of_range() {
        let ok: Severity = serde_json::from_str("3").unwrap();
        assert_eq!(ok.value(), 3);
        assert!(serde_json::from_str::<Severity>("9").is_err());
        assert_eq!(serde_json::to_string(&Severity::CRITICAL).unwrap(), "5");
    }

    #[test]
    fn test_patient_builder() {
        let p = Patient::new(7, "Ada", Severity::new(4).unwrap(), 3);
        assert_eq!(p.id, 7);
        assert_eq!(p.name, "Ada");
        assert_eq!(p.arrival_seq, 3);
        assert!(p.is_waiting());

        let served = p.with_status(PatientStatus::Served);
        assert!(!served.is_waiting());
        assert_eq!(served.to_string(), "id=7, name=Ada, severity=4");
    }
}
