//! Error types for schema inference, row parsing, and query evaluation.
//!
//! Setup failures (`SchemaError`, `ParseError` during the bulk training
//! parse) are fatal and abort the run before any query is answered. During
//! the query loop, `ParseError` and `QueryError` abort only the offending
//! query; the loop continues with the next line.

use thiserror::Error;

/// Result type for k-NN operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error wrapping every failure the engine can surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures while inferring the table layout. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// More than one non-numeric column outside the header.
    #[error(
        "columns {first} and {second} are both non-numeric; cannot infer a single label column"
    )]
    AmbiguousLabel { first: usize, second: usize },

    /// The caller-supplied label column disagrees with the inferred one.
    #[error(
        "label column {requested} was requested but column {found} holds the non-numeric data ({raw:?})"
    )]
    LabelMismatch {
        requested: usize,
        found: usize,
        raw: String,
    },

    /// Regression requires every column to be numeric.
    #[error("regression requested but column {column} holds non-numeric data ({raw:?})")]
    NonNumericForRegression { column: usize, raw: String },

    /// Every column is numeric and no label column was supplied.
    #[error("every column is numeric and no label column was supplied")]
    NoLabelColumn,

    /// The supplied label column does not exist in the table.
    #[error("label column {column} is out of range for a table with {column_count} columns")]
    LabelOutOfRange { column: usize, column_count: usize },

    /// The table has no inspectable data row.
    #[error("training table has no data rows")]
    EmptyTable,
}

/// Failures while parsing a single delimited line. Line and column numbers
/// are 1-based and 0-based respectively, matching how the table is addressed
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected {expected} fields, found {actual}")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("line {line}, column {column}: {raw:?} is not a number")]
    InvalidNumber {
        line: usize,
        column: usize,
        raw: String,
    },
}

/// Failures while answering a single query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Feature-count mismatch between the query and a training sample.
    /// Unreachable when the store was built against the same schema, but
    /// checked on every distance computation.
    #[error("query has {actual} features but training samples have {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// k exceeds the training-set size. Validated once at startup.
    #[error("k = {k} exceeds the {samples} available training samples")]
    KTooLarge { k: usize, samples: usize },

    /// No neighbors were supplied to the aggregation step.
    #[error("no neighbors to aggregate")]
    EmptyNeighborSet,

    /// A neighbor's target variant does not match the configured task.
    /// Unreachable when the store was built by the row parser.
    #[error("neighbor target does not match the configured task")]
    TargetMismatch,
}
