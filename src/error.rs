//! Error types for triage operations.
//!
//! Every fallible operation returns `TriageResult<T>`. Failures are
//! recoverable: a rejected operation leaves the queue, record store,
//! rotation, and history exactly as they were.

use thiserror::Error;

use crate::models::PatientId;

/// Errors raised by the triage core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriageError {
    /// Severity outside the 1..=5 scale.
    #[error("invalid severity {0}: must be between 1 and 5")]
    InvalidSeverity(i64),

    /// A patient or doctor name was empty or whitespace.
    #[error("{0} name must not be blank")]
    BlankName(&'static str),

    /// A bounded container was configured with zero capacity.
    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    /// Doctor rotation configured with no doctors.
    #[error("doctor rotation requires at least one doctor")]
    EmptyRotation,

    /// A patient with this identifier is already queued or recorded.
    #[error("patient {0} already exists")]
    DuplicateId(PatientId),

    /// No patient with this identifier.
    #[error("patient {0} not found")]
    NotFound(PatientId),

    /// Serve/extract with no waiting patients.
    #[error("no patients waiting")]
    EmptyQueue,

    /// A bounded FCFS queue is at capacity.
    #[error("queue is full (capacity {0})")]
    QueueFull(usize),

    /// A text command could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}

/// Coarse error categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input: severity range, blank name, capacity, malformed command.
    Validation,
    /// Identifier already present.
    DuplicateId,
    /// Identifier unknown.
    NotFound,
    /// Nothing to serve.
    EmptyQueue,
    /// No doctors configured.
    EmptyRotation,
    /// Bounded FIFO rejected an arrival.
    QueueFull,
}

impl TriageError {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TriageError::InvalidSeverity(_)
            | TriageError::BlankName(_)
            | TriageError::InvalidCapacity(_)
            | TriageError::InvalidCommand(_) => ErrorKind::Validation,
            TriageError::EmptyRotation => ErrorKind::EmptyRotation,
            TriageError::DuplicateId(_) => ErrorKind::DuplicateId,
            TriageError::NotFound(_) => ErrorKind::NotFound,
            TriageError::EmptyQueue => ErrorKind::EmptyQueue,
            TriageError::QueueFull(_) => ErrorKind::QueueFull,
        }
    }
}

/// Convenience alias for `Result<T, TriageError>`.
pub type TriageResult<T> = Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TriageError::InvalidSeverity(6).to_string(),
            "invalid severity 6: must be between 1 and 5"
        );
        assert_eq!(TriageError::NotFound(42).to_string(), "patient 42 not found");
        assert_eq!(
            TriageError::BlankName("doctor").to_string(),
            "doctor name must not be blank"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(TriageError::InvalidSeverity(0).kind(), ErrorKind::Validation);
        assert_eq!(TriageError::InvalidCapacity(0).kind(), ErrorKind::Validation);
        assert_eq!(TriageError::DuplicateId(1).kind(), ErrorKind::DuplicateId);
        assert_eq!(TriageError::EmptyQueue.kind(), ErrorKind::EmptyQueue);
        assert_eq!(TriageError::EmptyRotation.kind(), ErrorKind::EmptyRotation);
    }

    #[test]
    fn test_is_std_error() {
        let e: Box<dyn std::error::Error> = Box::new(TriageError::EmptyQueue);
        assert_eq!(e.to_string(), "no patients waiting");
    }
}
