//! k-nearest-neighbor classification and regression over delimited tabular
//! data.
//!
//! The pipeline: a [`Schema`] is inferred from the first line(s) of the
//! training table, the table is bulk-parsed into an immutable
//! [`TrainingStore`], and queries read one-per-line are answered by a
//! parallel Euclidean distance pass, k-smallest selection, and either a
//! plurality vote over labels or a mean over numeric targets.

pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod parse;
pub mod predict;
pub mod schema;
pub mod store;

pub use config::{Config, Task};
pub use distance::{euclidean, k_nearest, Neighbor};
pub use engine::Engine;
pub use error::{Error, ParseError, QueryError, Result, SchemaError};
pub use parse::Query;
pub use predict::{predict, Prediction};
pub use schema::Schema;
pub use store::{Sample, Target, TrainingStore};
