//! Service-side bookkeeping.
//!
//! - **`DoctorRotation`**: round-robin doctor assignment.
//! - **`ServiceHistory`**: bounded most-recent-first log of services.

mod history;
mod rotation;

pub use history::ServiceHistory;
pub use rotation::DoctorRotation;
