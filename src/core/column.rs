use serde::{Deserialize, Serialize};

use super::value::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    Boolean,
    Text,
}

impl ColumnType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnMeta {
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Infers a column type from its non-null cells.
    ///
    /// All numbers -> `Number`, all booleans -> `Boolean`, anything else
    /// (including a column with no non-null cell) -> `Text`.
    pub fn infer<'a>(name: impl Into<String>, cells: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut all_numbers = true;
        let mut all_booleans = true;
        let mut seen = false;

        for cell in cells {
            match cell {
                Value::Null => continue,
                Value::Number(_) => all_booleans = false,
                Value::Boolean(_) => all_numbers = false,
                Value::Text(_) => {
                    all_numbers = false;
                    all_booleans = false;
                }
            }
            seen = true;
        }

        let column_type = match (seen, all_numbers, all_booleans) {
            (true, true, _) => ColumnType::Number,
            (true, _, true) => ColumnType::Boolean,
            _ => ColumnType::Text,
        };
        Self::new(name, column_type)
    }
}
