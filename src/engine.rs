//! The query loop: schema inference, bulk training parse, then one
//! prediction per input line.
//!
//! Each query runs to completion (distance pass, selection, prediction)
//! before the next one starts; only the distance pass inside a query is
//! parallel, on a pool owned by the engine and sized by the configuration.

use std::io::{BufRead, Seek};

use log::warn;
use rayon::ThreadPool;

use crate::config::Config;
use crate::distance;
use crate::error::{QueryError, Result};
use crate::parse::{self, Query};
use crate::predict::{self, Prediction};
use crate::schema::Schema;
use crate::store::TrainingStore;

/// A fully trained k-NN engine, ready to answer queries.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use knn::{Config, Engine, Prediction, Task};
///
/// let config = Config {
///     task: Task::Classification,
///     label_column: None,
///     k: 1,
///     thread_count: 1,
///     training_file: "clusters.csv".into(),
/// };
/// let table = "1,1,A\n1,2,A\n5,5,B\n5,6,B\n";
/// let engine = Engine::from_reader(&config, &mut Cursor::new(table)).unwrap();
///
/// let prediction = engine.predict_line("1,1", 1).unwrap();
/// assert_eq!(prediction, Prediction::Label("A".to_string()));
/// ```
#[derive(Debug)]
pub struct Engine {
    schema: Schema,
    store: TrainingStore,
    k: usize,
    pool: ThreadPool,
}

impl Engine {
    /// Infers the schema from `reader`, bulk-parses the training table, and
    /// validates `config.k` against the final training-set size.
    ///
    /// Any failure here is fatal; no query is processed after one.
    pub fn from_reader<R: BufRead + Seek>(config: &Config, reader: &mut R) -> Result<Self> {
        let schema = Schema::infer(reader, config.task, config.label_column)?;
        let store = TrainingStore::from_reader(reader, &schema)?;

        // k can only be checked once the table is parsed.
        if config.k > store.len() {
            return Err(QueryError::KTooLarge {
                k: config.k,
                samples: store.len(),
            }
            .into());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()?;

        Ok(Engine {
            schema,
            store,
            k: config.k,
            pool,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn store(&self) -> &TrainingStore {
        &self.store
    }

    /// Answers one already-parsed query.
    pub fn predict(&self, query: &Query) -> Result<Prediction> {
        let neighbors = self
            .pool
            .install(|| distance::k_nearest(query, &self.store, self.k))?;
        Ok(predict::predict(self.schema.task, &neighbors)?)
    }

    /// Parses one raw query line and answers it. `line_no` is 1-based and is
    /// carried into any parse error.
    pub fn predict_line(&self, line: &str, line_no: usize) -> Result<Prediction> {
        let query = parse::parse_query_line(line, &self.schema, line_no)?;
        self.predict(&query)
    }

    /// Reads query lines from `queries` until end-of-input and hands each
    /// outcome to `emit` with its 1-based line number.
    ///
    /// A line that fails to parse or predict is reported and skipped; the
    /// loop continues with the next line. Only a read failure on the stream
    /// itself is fatal.
    pub fn run<R, F>(&self, queries: R, mut emit: F) -> Result<()>
    where
        R: BufRead,
        F: FnMut(usize, Result<Prediction>),
    {
        for (idx, line) in queries.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;
            match self.predict_line(&line, line_no) {
                Ok(prediction) => emit(line_no, Ok(prediction)),
                Err(err) => {
                    warn!("query line {line_no} skipped: {err}");
                    emit(line_no, Err(err));
                }
            }
        }
        Ok(())
    }
}
