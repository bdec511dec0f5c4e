//! Conversion of delimited text lines into typed records.
//!
//! One routine covers both uses: training lines carry the label column and
//! become [`Sample`]s, query lines carry features only and become
//! [`Query`]s.

use crate::config::Task;
use crate::error::ParseError;
use crate::schema::{Schema, DELIMITER};
use crate::store::{Sample, Target};

/// A single point to be predicted. One per input line, discarded after the
/// prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub features: Vec<f64>,
}

/// Parses one training line against `schema`.
///
/// The line must split into exactly `schema.column_count` fields. The field
/// at `label_column` becomes the sample's target, categorical or numeric per
/// the schema's task; every other field parses as a feature. `line_no` is
/// 1-based and is carried into any error.
pub fn parse_training_line(
    line: &str,
    schema: &Schema,
    label_column: usize,
    line_no: usize,
) -> Result<Sample, ParseError> {
    let fields: Vec<&str> = trim_line_end(line).split(DELIMITER).collect();
    if fields.len() != schema.column_count {
        return Err(ParseError::ColumnCountMismatch {
            line: line_no,
            expected: schema.column_count,
            actual: fields.len(),
        });
    }

    let target = match schema.task {
        Task::Classification => Target::Label(fields[label_column].to_string()),
        Task::Regression => Target::Value(parse_number(fields[label_column], label_column, line_no)?),
    };

    let mut features = Vec::with_capacity(schema.feature_count());
    for (column, field) in fields.iter().enumerate() {
        if column != label_column {
            features.push(parse_number(field, column, line_no)?);
        }
    }

    Ok(Sample { features, target })
}

/// Parses one query line against `schema`. Every field is a feature; the
/// expected count is `schema.column_count - 1` since queries carry no label.
pub fn parse_query_line(line: &str, schema: &Schema, line_no: usize) -> Result<Query, ParseError> {
    let fields: Vec<&str> = trim_line_end(line).split(DELIMITER).collect();
    let expected = schema.feature_count();
    if fields.len() != expected {
        return Err(ParseError::ColumnCountMismatch {
            line: line_no,
            expected,
            actual: fields.len(),
        });
    }

    let features = fields
        .iter()
        .enumerate()
        .map(|(column, field)| parse_number(field, column, line_no))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Query { features })
}

fn parse_number(field: &str, column: usize, line: usize) -> Result<f64, ParseError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            line,
            column,
            raw: field.to_string(),
        })
}

/// Strips trailing `\n` / `\r\n` before splitting.
pub(crate) fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classification_schema() -> Schema {
        Schema {
            column_count: 3,
            label_column: Some(2),
            has_header: false,
            task: Task::Classification,
        }
    }

    fn regression_schema() -> Schema {
        Schema {
            column_count: 3,
            label_column: Some(1),
            has_header: false,
            task: Task::Regression,
        }
    }

    #[test]
    fn training_line_with_label() {
        let schema = classification_schema();
        let sample = parse_training_line("1.0,2.5,setosa\n", &schema, 2, 1).unwrap();
        assert_eq!(sample.features, vec![1.0, 2.5]);
        assert_eq!(sample.target, Target::Label("setosa".to_string()));
    }

    #[test]
    fn regression_target_in_middle_column_keeps_feature_order() {
        let schema = regression_schema();
        let sample = parse_training_line("1.0,42.0,2.0", &schema, 1, 1).unwrap();
        assert_eq!(sample.features, vec![1.0, 2.0]);
        assert_eq!(sample.target, Target::Value(42.0));
    }

    #[test]
    fn wrong_field_count_names_both_counts() {
        let schema = classification_schema();
        let err = parse_training_line("1.0,setosa", &schema, 2, 7).unwrap_err();
        assert_eq!(
            err,
            ParseError::ColumnCountMismatch {
                line: 7,
                expected: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn bad_feature_names_column_and_text() {
        let schema = classification_schema();
        let err = parse_training_line("1.0,abc,setosa", &schema, 2, 3).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                line: 3,
                column: 1,
                raw: "abc".to_string(),
            }
        );
    }

    #[test]
    fn bad_regression_target_is_reported() {
        let schema = regression_schema();
        let err = parse_training_line("1.0,abc,2.0", &schema, 1, 2).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                line: 2,
                column: 1,
                raw: "abc".to_string(),
            }
        );
    }

    #[test]
    fn query_line_has_no_label_column() {
        let schema = classification_schema();
        let query = parse_query_line("1.5,2.5\r\n", &schema, 1).unwrap();
        assert_eq!(query.features, vec![1.5, 2.5]);
    }

    #[test]
    fn query_with_label_count_is_rejected() {
        let schema = classification_schema();
        let err = parse_query_line("1.5,2.5,setosa", &schema, 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::ColumnCountMismatch {
                line: 4,
                expected: 2,
                actual: 3,
            }
        );
    }
}
