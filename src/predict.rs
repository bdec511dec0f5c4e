//! Aggregation of the k nearest neighbors into a prediction.
//!
//! Classification is a plurality vote over the neighbors' labels, with ties
//! on vote count broken by the label seen first in ascending-distance order,
//! so the closest neighbor's label wins. Regression is the arithmetic mean
//! of the neighbors' numeric targets.

use std::collections::HashMap;
use std::fmt;

use crate::config::Task;
use crate::distance::Neighbor;
use crate::error::QueryError;

/// The answer to one query. The CLI layer decides how to render it.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Label(String),
    Value(f64),
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Label(label) => write!(f, "{label}"),
            Prediction::Value(value) => write!(f, "{value}"),
        }
    }
}

/// Aggregates `neighbors` (ascending by distance) per `task`.
pub fn predict(task: Task, neighbors: &[Neighbor<'_>]) -> Result<Prediction, QueryError> {
    match task {
        Task::Classification => plurality_vote(neighbors).map(Prediction::Label),
        Task::Regression => mean_target(neighbors).map(Prediction::Value),
    }
}

/// Most frequent label among the neighbors; on a count tie the label that
/// appears first in the given order wins.
pub fn plurality_vote(neighbors: &[Neighbor<'_>]) -> Result<String, QueryError> {
    let mut counts: HashMap<&str, usize> = HashMap::with_capacity(neighbors.len());
    for neighbor in neighbors {
        let label = neighbor
            .sample
            .target
            .as_label()
            .ok_or(QueryError::TargetMismatch)?;
        *counts.entry(label).or_insert(0) += 1;
    }

    let mut winner: Option<&str> = None;
    let mut winner_count = 0;
    for neighbor in neighbors {
        let label = neighbor
            .sample
            .target
            .as_label()
            .ok_or(QueryError::TargetMismatch)?;
        let count = counts[label];
        if count > winner_count {
            winner = Some(label);
            winner_count = count;
        }
    }

    winner
        .map(str::to_owned)
        .ok_or(QueryError::EmptyNeighborSet)
}

/// Mean of the neighbors' numeric targets. The running sum is compensated
/// (Kahan) to limit accumulation error over large k.
pub fn mean_target(neighbors: &[Neighbor<'_>]) -> Result<f64, QueryError> {
    if neighbors.is_empty() {
        return Err(QueryError::EmptyNeighborSet);
    }

    let mut sum = 0.0;
    let mut compensation = 0.0;
    for neighbor in neighbors {
        let value = neighbor
            .sample
            .target
            .as_value()
            .ok_or(QueryError::TargetMismatch)?;
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }

    Ok(sum / neighbors.len() as f64)
}
