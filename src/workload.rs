//! Synthetic patient loads and a throughput benchmark.
//!
//! Generates reproducible patient streams (uniform random severity, one
//! arrival per tick) and times a full arrive-then-drain cycle through
//! both the FCFS baseline and the priority queue.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::TriageResult;
use crate::models::{Patient, PatientId, Severity};
use crate::queue::{FcfsQueue, PriorityQueue};

/// Load sizes used when none are given.
pub const DEFAULT_SIZES: [usize; 4] = [1_000, 5_000, 10_000, 20_000];

/// Generates `n` patients with IDs `1..=n`, arrival sequences `1..=n`, and
/// uniformly random severities. The same seed yields the same stream.
pub fn generate_patients(n: usize, seed: u64) -> Vec<Patient> {
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n)
        .map(|i| {
            let severity = Severity::ALL[rng.random_range(0..Severity::ALL.len())];
            Patient::new(i as PatientId, format!("Patient_{i}"), severity, i as u64)
        })
        .collect()
}

/// Median severity of a load (0.0 when empty).
pub fn median_severity(patients: &[Patient]) -> f64 {
    if patients.is_empty() {
        return 0.0;
    }
    let mut values: Vec<u8> = patients.iter().map(|p| p.severity.value()).collect();
    values.sort_unstable();

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        f64::from(values[mid])
    } else {
        (f64::from(values[mid - 1]) + f64::from(values[mid])) / 2.0
    }
}

/// Timing for one load size.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    /// Number of patients.
    pub patients: usize,
    /// Median severity of the generated load.
    pub median_severity: f64,
    /// Arrive + drain through the FCFS queue.
    pub fcfs: Duration,
    /// Arrive + drain through the priority queue.
    pub priority: Duration,
}

/// Times arrive-then-drain for each size with a shared seed.
///
/// # Errors
/// Propagates queue errors; none occur for generated loads, whose IDs
/// are unique.
pub fn run_benchmark(sizes: &[usize], seed: u64) -> TriageResult<Vec<BenchmarkRow>> {
    sizes
        .iter()
        .map(|&n| {
            let patients = generate_patients(n, seed);
            let fcfs = time_fcfs(&patients)?;
            let priority = time_priority(&patients)?;
            debug!(patients = n, ?fcfs, ?priority, "benchmarked load");
            Ok(BenchmarkRow {
                patients: n,
                median_severity: median_severity(&patients),
                fcfs,
                priority,
            })
        })
        .collect()
}

fn time_fcfs(patients: &[Patient]) -> TriageResult<Duration> {
    let start = Instant::now();
    let mut queue = FcfsQueue::new();
    for p in patients {
        queue.enqueue(p.clone())?;
    }
    while queue.dequeue().is_ok() {}
    Ok(start.elapsed())
}

fn time_priority(patients: &[Patient]) -> TriageResult<Duration> {
    let start = Instant::now();
    let mut queue = PriorityQueue::with_capacity(patients.len());
    for p in patients {
        queue.insert(p.clone())?;
    }
    while queue.extract_most_urgent().is_ok() {}
    Ok(start.elapsed())
}
