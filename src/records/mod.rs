//! Patient record store.
//!
//! An unbalanced binary search tree keyed by patient ID. Records outlive
//! their time in the queue so served patients can still be looked up and
//! listed.
//!
//! # Complexity
//!
//! | Operation | Average | Worst (sorted inserts) |
//! |-----------|---------|------------------------|
//! | insert / find / remove | O(log n) | O(n) |
//! | traverse | O(n) | O(n) |
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 12 (Binary Search Trees)

mod store;
mod traversal;

pub use store::PatientStore;
pub use traversal::{Traversal, TraversalOrder};
