//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::error::{TriageError, TriageResult};

/// Default bound on the service history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Setup parameters for a triage session.
///
/// # Example
/// ```
/// use u_triage::triage::TriageConfig;
///
/// let config = TriageConfig::new(["Grey", "Yang"])
///     .with_history_capacity(5)
///     .with_retain_served_records(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Doctor names in rotation order.
    pub doctors: Vec<String>,
    /// Maximum number of history entries kept.
    pub history_capacity: usize,
    /// Keep served patients in the record store (marked served).
    /// When `false`, records are removed at service time.
    pub retain_served_records: bool,
}

impl TriageConfig {
    /// Creates a configuration for the given doctors.
    pub fn new<I, S>(doctors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            doctors: doctors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the history bound.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets whether served records are kept.
    pub fn with_retain_served_records(mut self, retain: bool) -> Self {
        self.retain_served_records = retain;
        self
    }

    /// Adds a doctor at the end of the rotation.
    pub fn with_doctor(mut self, name: impl Into<String>) -> Self {
        self.doctors.push(name.into());
        self
    }

    /// Checks the configuration without building anything.
    ///
    /// # Errors
    /// - `EmptyRotation` if no doctors are configured.
    /// - `BlankName` if a doctor name is blank.
    /// - `InvalidCapacity` if the history capacity is zero.
    pub fn validate(&self) -> TriageResult<()> {
        if self.doctors.is_empty() {
            return Err(TriageError::EmptyRotation);
        }
        if self.doctors.iter().any(|d| d.trim().is_empty()) {
            return Err(TriageError::BlankName("doctor"));
        }
        if self.history_capacity == 0 {
            return Err(TriageError::InvalidCapacity(self.history_capacity));
        }
        Ok(())
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            doctors: Vec::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            retain_served_records: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = TriageConfig::new(["A"])
            .with_doctor("B")
            .with_history_capacity(3)
            .with_retain_served_records(false);

        assert_eq!(config.doctors, vec!["A", "B"]);
        assert_eq!(config.history_capacity, 3);
        assert!(!config.retain_served_records);
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            TriageConfig::default().validate(),
            Err(TriageError::EmptyRotation)
        );
        assert_eq!(
            TriageConfig::new(["A"]).with_history_capacity(0).validate(),
            Err(TriageError::InvalidCapacity(0))
        );
        assert_eq!(
            TriageConfig::new(["A", ""]).validate(),
            Err(TriageError::BlankName("doctor"))
        );
        assert!(TriageConfig::new(["A"]).validate().is_ok());
    }

    #[test]
    fn test_serde_defaults() {
        let config: TriageConfig = serde_json::from_str(r#"{"doctors": ["Grey"]}"#).unwrap();
        assert_eq!(config.history_capacity, DEFAULT_HISTORY_CAPACITY);
        assert!(config.retain_served_records);

        let json = serde_json::to_string(&config).unwrap();
        let back: TriageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
