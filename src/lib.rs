//! Patient triage scheduling for the U-Engine ecosystem.
//!
//! Serves patients by urgency instead of arrival: a severity-ordered
//! priority queue, a searchable patient record tree, round-robin doctor
//! assignment, and a bounded service history, coordinated by a single
//! controller. A FCFS baseline is kept for side-by-side evaluation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Patient`, `Severity`, `Doctor`, `HistoryEntry`
//! - **`queue`**: `PriorityQueue` (indexed binary heap) and `FcfsQueue` baseline
//! - **`records`**: `PatientStore` (BST keyed by ID) with iterative traversals
//! - **`service`**: `DoctorRotation` and `ServiceHistory`
//! - **`triage`**: `TriageController`, `TriageConfig`, ordering comparison and KPIs
//! - **`command`**: Text/serde commands dispatched onto the controller
//! - **`validation`**: Intake checks (duplicate IDs, blank names, severity range)
//! - **`workload`**: Seeded synthetic loads and a throughput benchmark
//!
//! # Example
//!
//! ```
//! use u_triage::triage::{TriageConfig, TriageController};
//!
//! let config = TriageConfig::new(["Grey"]).with_history_capacity(1);
//! let mut triage = TriageController::new(&config).unwrap();
//!
//! triage.add_patient(101, "Alice", 3).unwrap();
//! triage.add_patient(102, "Bob", 5).unwrap();
//! triage.add_patient(103, "Carol", 3).unwrap();
//!
//! let order: Vec<u64> = (0..3).map(|_| triage.serve_patient().unwrap().patient.id).collect();
//! assert_eq!(order, vec![102, 101, 103]);
//! assert_eq!(triage.peek_history().unwrap().patient_id, 103);
//! ```
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 6 (Heaps), Ch. 12 (BSTs)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod command;
pub mod error;
pub mod models;
pub mod queue;
pub mod records;
pub mod service;
pub mod triage;
pub mod validation;
pub mod workload;

pub use error::{ErrorKind, TriageError, TriageResult};
