//! Immutable in-memory collection of parsed training samples.
//!
//! The store is built once from the training stream and is read-only for the
//! rest of the run; neighbors borrow into it for the duration of a single
//! query. That immutability is what lets the distance pass share it across
//! workers without locking.

use std::io::BufRead;

use log::debug;

use crate::error::{Result, SchemaError};
use crate::parse;
use crate::schema::Schema;

/// What a training sample predicts: a class label or a numeric value,
/// matching the schema's task.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Label(String),
    Value(f64),
}

impl Target {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Target::Label(label) => Some(label),
            Target::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<f64> {
        match self {
            Target::Value(value) => Some(*value),
            Target::Label(_) => None,
        }
    }
}

/// One parsed training row.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f64>,
    pub target: Target,
}

/// All training samples, in table order.
#[derive(Debug, Clone)]
pub struct TrainingStore {
    samples: Vec<Sample>,
}

impl TrainingStore {
    pub fn new(samples: Vec<Sample>) -> Self {
        TrainingStore { samples }
    }

    /// Bulk-parses the training table. Any parse failure is fatal here: a
    /// corrupt training set cannot be partially trusted.
    ///
    /// The header line, when the schema says there is one, is skipped; fully
    /// blank lines are skipped as well. Line numbers in errors are 1-based
    /// and count every line of the file, header and blanks included.
    pub fn from_reader<R: BufRead>(reader: R, schema: &Schema) -> Result<Self> {
        let label_column = schema.label_column.ok_or(SchemaError::NoLabelColumn)?;

        let mut samples = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if schema.has_header && idx == 0 {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }
            samples.push(parse::parse_training_line(
                &line,
                schema,
                label_column,
                idx + 1,
            )?);
        }

        debug!("parsed {} training samples", samples.len());
        if log::log_enabled!(log::Level::Debug) {
            for (idx, sample) in samples.iter().enumerate() {
                debug!(
                    "sample {idx}: features {:?}, target {:?}",
                    sample.features, sample.target
                );
            }
        }

        Ok(TrainingStore { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::Task;
    use crate::error::{Error, ParseError};

    fn schema() -> Schema {
        Schema {
            column_count: 3,
            label_column: Some(2),
            has_header: false,
            task: Task::Classification,
        }
    }

    #[test]
    fn bulk_parse_collects_samples_in_order() {
        let table = "1,1,A\n1,2,A\n5,5,B\n5,6,B\n";
        let store = TrainingStore::from_reader(Cursor::new(table), &schema()).unwrap();
        assert_eq!(store.len(), 4);
        assert_eq!(store.samples()[0].features, vec![1.0, 1.0]);
        assert_eq!(store.samples()[3].target, Target::Label("B".to_string()));
    }

    #[test]
    fn header_line_is_skipped() {
        let table = "x,y,species\n1,1,A\n";
        let mut with_header = schema();
        with_header.has_header = true;
        let store = TrainingStore::from_reader(Cursor::new(table), &with_header).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn blank_lines_are_skipped_but_numbering_counts_them() {
        let table = "1,1,A\n\n5,5,B\n";
        let store = TrainingStore::from_reader(Cursor::new(table), &schema()).unwrap();
        assert_eq!(store.len(), 2);

        let bad = "1,1,A\n\n5,bad,B\n";
        match TrainingStore::from_reader(Cursor::new(bad), &schema()) {
            Err(Error::Parse(ParseError::InvalidNumber { line: 3, .. })) => {}
            other => panic!("expected invalid number on line 3, got {other:?}"),
        }
    }

    #[test]
    fn training_parse_errors_are_fatal() {
        let table = "1,1,A\n1,2\n5,5,B\n";
        match TrainingStore::from_reader(Cursor::new(table), &schema()) {
            Err(Error::Parse(ParseError::ColumnCountMismatch {
                line: 2,
                expected: 3,
                actual: 2,
            })) => {}
            other => panic!("expected column count mismatch, got {other:?}"),
        }
    }
}
