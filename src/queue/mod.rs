//! Triage queues.
//!
//! Provides the severity-ordered `PriorityQueue` and the arrival-ordered
//! `FcfsQueue` baseline it is compared against.
//!
//! # Disciplines
//!
//! | Queue | Order | Insert | Extract | Re-prioritize |
//! |-------|-------|--------|---------|---------------|
//! | `PriorityQueue` | severity desc, arrival asc | O(log n) | O(log n) | O(log n) |
//! | `FcfsQueue` | arrival asc | O(1) | O(1) | n/a |

mod fcfs;
mod priority;

pub use fcfs::FcfsQueue;
pub use priority::{urgency_order, PriorityQueue};
