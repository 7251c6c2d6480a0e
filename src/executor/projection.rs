/// Column selection (projection without grouping)

use crate::query::SelectColumn;
use crate::types::{Row, Value};

pub struct Projector;

impl Projector {
    /// Narrow each row to the selected columns, renamed to their aliases.
    ///
    /// An empty selection means "all columns": rows pass through whole.
    /// A selected column missing from a row comes out as `Null`.
    #[must_use]
    pub fn project(rows: &[&Row], columns: &[SelectColumn]) -> Vec<Row> {
        if columns.is_empty() {
            return rows.iter().map(|row| (*row).clone()).collect();
        }

        rows.iter()
            .map(|row| {
                let mut out = Row::with_capacity(columns.len());
                for col in columns {
                    let value = row.get(&col.column).cloned().unwrap_or(Value::Null);
                    out.insert(col.output_name(), value);
                }
                out
            })
            .collect()
    }
}
