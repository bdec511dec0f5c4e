//! Euclidean distance and k-nearest selection.
//!
//! The distance pass is embarrassingly parallel: each per-sample computation
//! is independent and read-only against the training store, so it fans out
//! over the current rayon pool. The parallel collect joins every worker
//! before selection runs, which is the barrier the selection step relies on.

use rayon::prelude::*;

use crate::error::QueryError;
use crate::parse::Query;
use crate::store::{Sample, TrainingStore};

/// One training sample paired with its distance to the current query.
/// Borrows into the training store and never outlives the query's
/// prediction step.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub distance: f64,
    /// Original sample index, the tie-break for equal distances.
    pub index: usize,
    pub sample: &'a Sample,
}

/// Euclidean distance between two feature vectors of equal length: the
/// square root of the summed squared per-feature differences.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    sum.sqrt()
}

/// Finds the `k` nearest training samples to `query`.
///
/// Returns exactly `k` neighbors in ascending distance order, ties broken by
/// original sample index, so the result is deterministic regardless of how
/// the parallel pass interleaves.
///
/// # Errors
///
/// - [`QueryError::KTooLarge`] if `k` exceeds the store size.
/// - [`QueryError::DimensionMismatch`] if any sample's feature count differs
///   from the query's. Unreachable for stores built against the query's
///   schema, but checked on every sample.
///
/// # Complexity
///
/// - Time: O(n·d / t) for the distance pass over n samples of d features on
///   t workers, plus O(n log n) for selection.
/// - Space: O(n) for the distance table.
pub fn k_nearest<'a>(
    query: &Query,
    store: &'a TrainingStore,
    k: usize,
) -> Result<Vec<Neighbor<'a>>, QueryError> {
    let samples = store.samples();
    if k > samples.len() {
        return Err(QueryError::KTooLarge {
            k,
            samples: samples.len(),
        });
    }

    let mut neighbors = samples
        .par_iter()
        .enumerate()
        .map(|(index, sample)| {
            if sample.features.len() != query.features.len() {
                return Err(QueryError::DimensionMismatch {
                    expected: sample.features.len(),
                    actual: query.features.len(),
                });
            }
            Ok(Neighbor {
                distance: euclidean(&sample.features, &query.features),
                index,
                sample,
            })
        })
        .collect::<Result<Vec<_>, QueryError>>()?;

    neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.index.cmp(&b.index)));
    neighbors.truncate(k);
    Ok(neighbors)
}
