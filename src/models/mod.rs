//! Triage domain models.
//!
//! Provides the data types shared by the priority queue, the record
//! store, the doctor rotation, and the service history.
//!
//! # Domain Mappings
//!
//! | u-triage | Emergency Dept | Walk-in Clinic |
//! |----------|----------------|----------------|
//! | Patient | Triaged arrival | Walk-in visit |
//! | Severity | ESI level (inverted) | Urgency flag |
//! | Doctor | Attending on shift | Duty physician |
//! | HistoryEntry | Disposition log line | Visit record |

mod doctor;
mod entry;
mod patient;

pub use doctor::Doctor;
pub use entry::HistoryEntry;
pub use patient::{Patient, PatientId, PatientIntake, PatientStatus, Severity};
