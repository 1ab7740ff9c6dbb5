//! Doctor model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A doctor in the service rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Display name.
    pub name: String,
    /// Position in the configured rotation (fixed for the session).
    pub rotation_index: usize,
}

impl Doctor {
    /// Creates a doctor at the given rotation slot.
    pub fn new(name: impl Into<String>, rotation_index: usize) -> Self {
        Self {
            name: name.into(),
            rotation_index,
        }
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dr. {}", self.name)
    }
}
