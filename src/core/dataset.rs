use serde::{Deserialize, Serialize};

use super::column::ColumnMeta;
use super::row::Row;

/// A named, ordered collection of rows plus inferred column metadata.
///
/// The engine only ever reads a dataset; every query stage allocates
/// fresh output rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub columns: Vec<ColumnMeta>,
    #[serde(rename = "data")]
    pub rows: Vec<Row>,
}

impl Dataset {
    #[must_use]
    pub const fn new(id: String, columns: Vec<ColumnMeta>, rows: Vec<Row>) -> Self {
        Self { id, columns, rows }
    }

    /// Builds a dataset from rows alone, inferring column metadata.
    ///
    /// Column order is first appearance across all rows.
    #[must_use]
    pub fn from_rows(id: impl Into<String>, rows: Vec<Row>) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for row in &rows {
            for column in row.columns() {
                if !names.contains(&column) {
                    names.push(column);
                }
            }
        }

        let columns = names
            .iter()
            .map(|name| ColumnMeta::infer(*name, rows.iter().filter_map(|row| row.get(name))))
            .collect();

        Self::new(id.into(), columns, rows)
    }

    #[must_use]
    pub fn get_column(&self, name: &str) -> Option<&ColumnMeta> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
