//! Table layout inference.
//!
//! The schema of a training table is determined by inspecting its first
//! line(s) rather than external metadata:
//! - column count is the field count of the first line;
//! - a first line with two or more non-numeric fields is a header and is
//!   excluded from the data;
//! - a single non-numeric column in the inspected data line is the label
//!   column and forces classification;
//! - an all-numeric table takes the caller's task, and needs the label
//!   column supplied explicitly.
//!
//! Inference rewinds the stream when it is done so the bulk parser re-reads
//! the table from the start.

use std::io::{BufRead, Seek};

use log::debug;

use crate::config::Task;
use crate::error::{Result, SchemaError};
use crate::parse::trim_line_end;

/// Field separator for training tables and query lines.
pub const DELIMITER: char = ',';

/// Resolved layout of a training table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Number of fields per training line.
    pub column_count: usize,
    /// Label column, 0-indexed. Always populated after successful inference.
    pub label_column: Option<usize>,
    /// Whether the first line is a header and must be skipped.
    pub has_header: bool,
    /// The task the table supports.
    pub task: Task,
}

impl Schema {
    /// Number of features per sample and per query.
    pub fn feature_count(&self) -> usize {
        self.column_count - 1
    }

    /// Infers the schema from the first line(s) of `reader`, then rewinds it.
    ///
    /// `task` and `label_column` are the caller's request; inference either
    /// confirms them against the data or fails.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::EmptyTable`] if there is no inspectable data line.
    /// - [`SchemaError::AmbiguousLabel`] if more than one column is
    ///   non-numeric outside the header.
    /// - [`SchemaError::LabelMismatch`] if the supplied label column
    ///   disagrees with the inferred one.
    /// - [`SchemaError::NonNumericForRegression`] if regression was requested
    ///   and any column is non-numeric.
    /// - [`SchemaError::NoLabelColumn`] if every column is numeric and no
    ///   label column was supplied.
    /// - [`SchemaError::LabelOutOfRange`] if the supplied label column does
    ///   not exist.
    pub fn infer<R: BufRead + Seek>(
        reader: &mut R,
        task: Task,
        label_column: Option<usize>,
    ) -> Result<Self> {
        let mut first = String::new();
        if reader.read_line(&mut first)? == 0 {
            return Err(SchemaError::EmptyTable.into());
        }
        let first_fields: Vec<&str> = trim_line_end(&first).split(DELIMITER).collect();
        let column_count = first_fields.len();

        let has_header = categorical_columns(&first_fields).len() >= 2;
        let mut second = String::new();
        let inspected: Vec<&str> = if has_header {
            if reader.read_line(&mut second)? == 0 {
                return Err(SchemaError::EmptyTable.into());
            }
            trim_line_end(&second).split(DELIMITER).collect()
        } else {
            first_fields
        };

        if let Some(column) = label_column {
            if column >= column_count {
                return Err(SchemaError::LabelOutOfRange {
                    column,
                    column_count,
                }
                .into());
            }
        }

        let categorical = categorical_columns(&inspected);
        let schema = match categorical.as_slice() {
            [] => match label_column {
                Some(column) => Schema {
                    column_count,
                    label_column: Some(column),
                    has_header,
                    task,
                },
                None => return Err(SchemaError::NoLabelColumn.into()),
            },
            &[column] => {
                if task == Task::Regression {
                    return Err(SchemaError::NonNumericForRegression {
                        column,
                        raw: inspected[column].to_string(),
                    }
                    .into());
                }
                if let Some(requested) = label_column {
                    if requested != column {
                        return Err(SchemaError::LabelMismatch {
                            requested,
                            found: column,
                            raw: inspected[column].to_string(),
                        }
                        .into());
                    }
                }
                Schema {
                    column_count,
                    label_column: Some(column),
                    has_header,
                    task: Task::Classification,
                }
            }
            &[first, second, ..] => {
                return Err(SchemaError::AmbiguousLabel { first, second }.into())
            }
        };

        // The bulk parser re-reads the table from the top.
        reader.rewind()?;

        debug!(
            "inferred schema: {} columns, label column {:?}, header {}, task {:?}",
            schema.column_count, schema.label_column, schema.has_header, schema.task
        );
        Ok(schema)
    }
}

/// Indices of the fields that do not read as numbers.
fn categorical_columns(fields: &[&str]) -> Vec<usize> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| !is_numeric_field(field))
        .map(|(column, _)| column)
        .collect()
}

/// A field is numeric when it is an optional sign followed by digits with at
/// most one decimal point and at least one digit. Anything else, including
/// the empty string and exponent notation, counts as categorical.
fn is_numeric_field(field: &str) -> bool {
    let rest = field.strip_prefix(['+', '-']).unwrap_or(field);
    let mut digits = 0;
    let mut dots = 0;
    for c in rest.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => {
                dots += 1;
                if dots > 1 {
                    return false;
                }
            }
            _ => return false,
        }
    }
    digits > 0
}
