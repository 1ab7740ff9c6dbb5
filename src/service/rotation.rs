//! Round-robin doctor assignment.

use crate::error::{TriageError, TriageResult};
use crate::models::Doctor;
use crate::validation::normalize_name;

/// Fixed, ordered pool of doctors handed out cyclically.
///
/// # Example
/// ```
/// use u_triage::service::DoctorRotation;
///
/// let mut rotation = DoctorRotation::new(["Grey", "Shepherd"]).unwrap();
/// assert_eq!(rotation.next_doctor().name, "Grey");
/// assert_eq!(rotation.next_doctor().name, "Shepherd");
/// assert_eq!(rotation.next_doctor().name, "Grey");
/// ```
#[derive(Debug, Clone)]
pub struct DoctorRotation {
    doctors: Vec<Doctor>,
    cursor: usize,
}

impl DoctorRotation {
    /// Configures the rotation in the given order.
    ///
    /// Names are trimmed.
    ///
    /// # Errors
    /// - `EmptyRotation` if no names are given.
    /// - `BlankName` if any name is blank.
    pub fn new<I, S>(names: I) -> TriageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let doctors = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Ok(Doctor::new(normalize_name(name.as_ref(), "doctor")?, index)))
            .collect::<TriageResult<Vec<_>>>()?;

        if doctors.is_empty() {
            return Err(TriageError::EmptyRotation);
        }
        Ok(Self { doctors, cursor: 0 })
    }

    /// Returns the doctor on turn and advances to the next one.
    pub fn next_doctor(&mut self) -> &Doctor {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.doctors.len();
        &self.doctors[index]
    }

    /// The doctor who will be returned by the next `next_doctor` call.
    pub fn on_turn(&self) -> &Doctor {
        &self.doctors[self.cursor]
    }

    /// Configured doctors in rotation order.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Number of doctors.
    pub fn len(&self) -> usize {
        self.doctors.len()
    }

    /// Always `false`; a rotation cannot be built empty.
    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_in_configured_order() {
        let names = ["Grey", "Yang", "Karev"];
        let mut rotation = DoctorRotation::new(names).unwrap();

        let first_cycle: Vec<String> = (0..3).map(|_| rotation.next_doctor().name.clone()).collect();
        assert_eq!(first_cycle, names);

        // Call N+1 repeats call 1.
        assert_eq!(rotation.next_doctor().name, "Grey");
        assert_eq!(rotation.on_turn().name, "Yang");
    }

    #[test]
    fn test_rotation_indices() {
        let rotation = DoctorRotation::new(vec!["A".to_string(), "B".to_string()]).unwrap();
        let indices: Vec<usize> = rotation.doctors().iter().map(|d| d.rotation_index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(rotation.len(), 2);
        assert!(!rotation.is_empty());
    }

    #[test]
    fn test_single_doctor() {
        let mut rotation = DoctorRotation::new(["Solo"]).unwrap();
        for _ in 0..5 {
            assert_eq!(rotation.next_doctor().name, "Solo");
        }
    }

    #[test]
    fn test_empty_rejected() {
        let names: [&str; 0] = [];
        assert_eq!(
            DoctorRotation::new(names).unwrap_err(),
            TriageError::EmptyRotation
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(
            DoctorRotation::new(["Grey", "  "]).unwrap_err(),
            TriageError::BlankName("doctor")
        );
    }

    #[test]
    fn test_names_trimmed() {
        let mut rotation = DoctorRotation::new([" Grey "]).unwrap();
        assert_eq!(rotation.next_doctor().name, "Grey");
    }
}
