use crate::meta::{CaseRecord, CaseStatus};

/// Aggregated timing of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub completed: usize,
    pub hung: usize,
    /// Sum of completed case times, in seconds
    pub total: f64,
    /// Mean completed case time, `None` if nothing completed
    pub mean: Option<f64>,
    /// Slowest completed case
    pub slowest: Option<(String, f64)>,
    /// Completed cases whose solver exited with a non-zero status
    pub nonzero_exit: usize,
}

pub fn summarize(records: &[CaseRecord]) -> Summary {
    let completed = records
        .iter()
        .filter(|r| r.status == CaseStatus::Completed)
        .collect::<Vec<_>>();
    let total = completed.iter().map(|r| r.time).sum::<f64>();
    let mean = if completed.is_empty() {
        None
    } else {
        Some(total / completed.len() as f64)
    };
    let slowest = completed
        .iter()
        .max_by(|a, b| a.time.total_cmp(&b.time))
        .map(|r| (r.case.clone(), r.time));
    Summary {
        completed: completed.len(),
        hung: records.len() - completed.len(),
        total,
        mean,
        slowest,
        nonzero_exit: completed
            .iter()
            .filter(|r| r.exit_code.is_some_and(|c| c != 0))
            .count(),
    }
}
