//! Validated run configuration handed to the engine by the CLI layer.

use std::path::PathBuf;

/// Which aggregation the predictor performs over the k nearest neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Plurality vote over categorical labels.
    Classification,
    /// Arithmetic mean over numeric targets.
    Regression,
}

/// Validated configuration for one run.
///
/// Invariants (enforced by the CLI layer before construction): `k >= 1` and
/// `thread_count >= 1`. `k` is additionally validated against the final
/// training-set size once the table has been parsed, since the size is not
/// known up front.
#[derive(Debug, Clone)]
pub struct Config {
    pub task: Task,
    /// Label column, 0-indexed. `None` means the column is inferred from the
    /// table; required for regression and for all-numeric classification.
    pub label_column: Option<usize>,
    /// Number of neighbors aggregated per query.
    pub k: usize,
    /// Worker pool size for the per-sample distance pass.
    pub thread_count: usize,
    /// Path of the comma-separated training table.
    pub training_file: PathBuf,
}
