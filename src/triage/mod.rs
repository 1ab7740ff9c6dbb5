//! Triage orchestration and evaluation.
//!
//! `TriageController` ties the priority queue, record store, doctor
//! rotation, and service history into one session. `OrderingComparison`
//! and `ComparisonKpi` evaluate severity-first ordering against FCFS.
//!
//! # Data Flow
//!
//! ```text
//! intake ──► PriorityQueue ─┐
//!        └─► PatientStore   │ serve
//!                           ▼
//!              DoctorRotation ──► ServiceHistory
//! ```

mod compare;
mod config;
mod controller;

pub use compare::{ComparisonKpi, OrderingComparison, SeverityPositions};
pub use config::{TriageConfig, DEFAULT_HISTORY_CAPACITY};
pub use controller::{ServedPatient, TriageController, TriageSnapshot};
