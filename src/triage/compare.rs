//! Side-by-side evaluation of the two triage disciplines.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg position (per severity) | Mean 1-based service slot of that severity class |
//! | Advanced | Patients served earlier than FCFS would serve them |
//! | Delayed | Patients served later than FCFS would serve them |
//! | Critical first slot | Service slot of the first severity-5 patient |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Patient, PatientId, Severity};

/// Pending patients in both service orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingComparison {
    /// Severity-first order (what the priority queue will do).
    pub priority: Vec<Patient>,
    /// Arrival order (what a FCFS queue would do).
    pub fcfs: Vec<Patient>,
}

impl OrderingComparison {
    /// IDs in severity-first order.
    pub fn priority_ids(&self) -> Vec<PatientId> {
        self.priority.iter().map(|p| p.id).collect()
    }

    /// IDs in arrival order.
    pub fn fcfs_ids(&self) -> Vec<PatientId> {
        self.fcfs.iter().map(|p| p.id).collect()
    }

    /// Whether nobody is pending.
    pub fn is_empty(&self) -> bool {
        self.priority.is_empty()
    }

    /// Number of pending patients.
    pub fn len(&self) -> usize {
        self.priority.len()
    }
}

/// Average service slot of one severity class under each discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityPositions {
    /// Severity class.
    pub severity: Severity,
    /// Pending patients in this class.
    pub patients: usize,
    /// Mean 1-based slot under severity-first ordering.
    pub priority_avg_position: f64,
    /// Mean 1-based slot under FCFS.
    pub fcfs_avg_position: f64,
}

/// Ordering quality indicators for a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonKpi {
    /// Per-severity positions, most urgent class first. Empty classes omitted.
    pub by_severity: Vec<SeverityPositions>,
    /// Patients moved earlier by severity ordering.
    pub advanced: usize,
    /// Patients moved later by severity ordering.
    pub delayed: usize,
    /// Slot of the first critical patient under (priority, FCFS), if any.
    pub critical_first_slot: Option<(usize, usize)>,
}

impl ComparisonKpi {
    /// Computes indicators from a comparison.
    pub fn calculate(comparison: &OrderingComparison) -> Self {
        let fcfs_slot: HashMap<PatientId, usize> = comparison
            .fcfs
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i + 1))
            .collect();

        let mut advanced = 0;
        let mut delayed = 0;
        // severity → (count, priority slot sum, fcfs slot sum)
        let mut sums: HashMap<Severity, (usize, usize, usize)> = HashMap::new();

        for (i, p) in comparison.priority.iter().enumerate() {
            let priority_slot = i + 1;
            let fcfs = fcfs_slot.get(&p.id).copied().unwrap_or(priority_slot);

            if priority_slot < fcfs {
                advanced += 1;
            } else if priority_slot > fcfs {
                delayed += 1;
            }

            let entry = sums.entry(p.severity).or_default();
            entry.0 += 1;
            entry.1 += priority_slot;
            entry.2 += fcfs;
        }

        let by_severity = Severity::ALL
            .iter()
            .rev()
            .filter_map(|sev| {
                sums.get(sev).map(|&(n, prio_sum, fcfs_sum)| SeverityPositions {
                    severity: *sev,
                    patients: n,
                    priority_avg_position: prio_sum as f64 / n as f64,
                    fcfs_avg_position: fcfs_sum as f64 / n as f64,
                })
            })
            .collect();

        let first_critical = |patients: &[Patient]| {
            patients
                .iter()
                .position(|p| p.severity == Severity::CRITICAL)
                .map(|i| i + 1)
        };
        let critical_first_slot =
            first_critical(&comparison.priority).zip(first_critical(&comparison.fcfs));

        Self {
            by_severity,
            advanced,
            delayed,
            critical_first_slot,
        }
    }
}
