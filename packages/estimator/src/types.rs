//! Input records and the result table.

use serde::{Deserialize, Serialize};

/// One unit of work: a stable property identifier paired with its question.
///
/// `question: None` is the missing-input sentinel: the estimator emits an
/// all-missing row for it without issuing a request. Pairing the question
/// with its identifier in one value keeps the two aligned by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Stable external identifier
    pub qpid: String,

    /// Question text, or `None` when no question could be built
    pub question: Option<String>,
}

impl QuestionRecord {
    /// Create a record with a question.
    pub fn new(qpid: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            qpid: qpid.into(),
            question: Some(question.into()),
        }
    }

    /// Create a missing-input record.
    pub fn missing(qpid: impl Into<String>) -> Self {
        Self {
            qpid: qpid.into(),
            question: None,
        }
    }

    /// Whether this record is the missing-input sentinel.
    pub fn is_missing(&self) -> bool {
        self.question.is_none()
    }
}

/// One output row; `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub question: Option<String>,
    pub gpt_response: Option<String>,
    pub qpid: String,
    pub bathrooms: Option<f64>,
    pub bedrooms: Option<f64>,
    pub tokens_used: Option<u32>,
    pub time_seconds: Option<f64>,
}

impl ResultRow {
    /// Row for a missing-input record: every derived field is missing.
    pub fn missing(qpid: impl Into<String>) -> Self {
        Self {
            question: None,
            gpt_response: None,
            qpid: qpid.into(),
            bathrooms: None,
            bedrooms: None,
            tokens_used: None,
            time_seconds: None,
        }
    }
}

/// Ordered collection of result rows, one per input record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Fixed column names, in output order.
    pub const COLUMNS: [&'static str; 7] = [
        "question",
        "gpt_response",
        "qpid",
        "bathrooms",
        "bedrooms",
        "tokens_used",
        "time_seconds",
    ];

    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Append a row, preserving insertion order.
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// All rows, in input order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// Consume the table, yielding its rows.
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }
}

impl IntoIterator for ResultTable {
    type Item = ResultRow;
    type IntoIter = std::vec::IntoIter<ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_record() {
        let record = QuestionRecord::missing("P1");
        assert!(record.is_missing());
        assert_eq!(record.qpid, "P1");
    }

    #[test]
    fn test_missing_row_has_no_values() {
        let row = ResultRow::missing("P1");
        assert_eq!(row.question, None);
        assert_eq!(row.gpt_response, None);
        assert_eq!(row.bedrooms, None);
        assert_eq!(row.bathrooms, None);
        assert_eq!(row.tokens_used, None);
        assert_eq!(row.time_seconds, None);
        assert_eq!(row.qpid, "P1");
    }

    #[test]
    fn test_table_preserves_order() {
        let mut table = ResultTable::new();
        table.push(ResultRow::missing("A"));
        table.push(ResultRow::missing("B"));

        let qpids: Vec<_> = table.iter().map(|r| r.qpid.as_str()).collect();
        assert_eq!(qpids, ["A", "B"]);
    }

    #[test]
    fn test_column_names() {
        assert_eq!(
            ResultTable::COLUMNS,
            [
                "question",
                "gpt_response",
                "qpid",
                "bathrooms",
                "bedrooms",
                "tokens_used",
                "time_seconds",
            ]
        );
    }
}
