//! Input validation for patient intake.
//!
//! Single-field checks (`normalize_name`) return a `TriageError` so they
//! compose with `?`. Batch intake (`validate_intake`) collects every
//! problem so a clerk can fix them all at once. Detects:
//! - Duplicate IDs within the batch
//! - IDs already known to the system
//! - Blank names
//! - Severities outside 1..=5

use std::collections::HashSet;

use crate::error::{TriageError, TriageResult};
use crate::models::{PatientId, PatientIntake, Severity};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending patient ID.
    pub patient_id: PatientId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two intake rows share the same ID.
    DuplicateId,
    /// The ID is already queued or recorded.
    ExistingId,
    /// Name is empty or whitespace.
    BlankName,
    /// Severity outside 1..=5.
    InvalidSeverity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, patient_id: PatientId, message: impl Into<String>) -> Self {
        Self {
            kind,
            patient_id,
            message: message.into(),
        }
    }
}

/// Trims a name and rejects it if nothing is left.
///
/// `field` names the kind of entity ("patient", "doctor") in the error.
pub fn normalize_name(name: &str, field: &'static str) -> TriageResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TriageError::BlankName(field));
    }
    Ok(trimmed.to_string())
}

/// Validates a batch of intake requests.
///
/// `is_known` reports whether an ID is already present in the system.
///
/// # Returns
/// `Ok(())` if every row is admissible, `Err(errors)` with all detected issues.
pub fn validate_intake<F>(batch: &[PatientIntake], is_known: F) -> ValidationResult
where
    F: Fn(PatientId) -> bool,
{
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for row in batch {
        if !seen.insert(row.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                row.id,
                format!("Duplicate patient ID in batch: {}", row.id),
            ));
        } else if is_known(row.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ExistingId,
                row.id,
                format!("Patient ID {} is already registered", row.id),
            ));
        }

        if row.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                row.id,
                format!("Patient {} has a blank name", row.id),
            ));
        }

        if let Err(e) = Severity::new(row.severity) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSeverity,
                row.id,
                format!("Patient {}: {e}", row.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Vec<PatientIntake> {
        vec![
            PatientIntake::new(1, "Alice", 3),
            PatientIntake::new(2, "Bob", 5),
            PatientIntake::new(3, "Carol", 1),
        ]
    }

    #[test]
    fn test_valid_batch() {
        assert!(validate_intake(&sample_batch(), |_| false).is_ok());
    }

    #[test]
    fn test_duplicate_in_batch() {
        let mut batch = sample_batch();
        batch.push(PatientIntake::new(2, "Bobby", 2));

        let errors = validate_intake(&batch, |_| false).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert_eq!(errors[0].patient_id, 2);
    }

    #[test]
    fn test_existing_id() {
        let errors = validate_intake(&sample_batch(), |id| id == 3).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::ExistingId && e.patient_id == 3));
    }

    #[test]
    fn test_blank_name() {
        let batch = vec![PatientIntake::new(1, "   ", 2)];
        let errors = validate_intake(&batch, |_| false).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::BlankName);
    }

    #[test]
    fn test_invalid_severity() {
        let batch = vec![PatientIntake::new(1, "Dan", 6)];
        let errors = validate_intake(&batch, |_| false).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidSeverity);
        assert!(errors[0].message.contains("invalid severity 6"));
    }

    #[test]
    fn test_multiple_errors() {
        let batch = vec![
            PatientIntake::new(1, "", 0),
            PatientIntake::new(1, "Eve", 9),
        ];
        let errors = validate_intake(&batch, |_| false).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Ada ", "patient").unwrap(), "Ada");
        assert_eq!(
            normalize_name("\t", "doctor"),
            Err(TriageError::BlankName("doctor"))
        );
    }
}
