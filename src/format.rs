use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};

use crate::types::{Dataset, Row};

/// Column headers in first-seen order across all rows.
fn headers(rows: &[Row]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for row in rows {
        for column in row.columns() {
            if !names.contains(&column) {
                names.push(column);
            }
        }
    }
    names
}

/// Render result rows as a text table with a trailing row count.
#[must_use]
pub fn format_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "(0 rows)\n".to_string();
    }

    let columns = headers(rows);
    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(|c| Cell::new(c)));

    for row in rows {
        // absent cells stay blank, Null prints as NULL
        table.add_row(columns.iter().map(|c| match row.get(c) {
            Some(value) if value.is_null() => Cell::new("NULL"),
            Some(value) => Cell::new(value),
            None => Cell::new(""),
        }));
    }

    format!("{}\n({} rows)\n", table, rows.len())
}

/// One line per dataset: id, row count and inferred column types.
#[must_use]
pub fn format_datasets<'a>(datasets: impl IntoIterator<Item = &'a Dataset>) -> String {
    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["dataset", "rows", "columns"]);

    for dataset in datasets {
        let columns = dataset
            .columns
            .iter()
            .map(|c| format!("{} ({})", c.name, c.column_type.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&dataset.id),
            Cell::new(dataset.row_count()),
            Cell::new(columns),
        ]);
    }

    format!("{table}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    #[test]
    fn test_format_empty() {
        assert_eq!(format_rows(&[]), "(0 rows)\n");
    }

    #[test]
    fn test_format_rows() {
        let rows: Vec<Row> = vec![
            [("region", Value::text("North")), ("revenue", Value::Number(150.0))]
                .into_iter()
                .collect(),
            [("region", Value::text("South")), ("profit", Value::Null)]
                .into_iter()
                .collect(),
        ];
        let out = format_rows(&rows);

        assert!(out.contains("region"));
        assert!(out.contains("profit"));
        assert!(out.contains("150"));
        assert!(out.contains("NULL"));
        assert!(out.ends_with("(2 rows)\n"));
    }

    #[test]
    fn test_format_datasets() {
        let dataset = Dataset::from_rows(
            "sales",
            vec![[("revenue", Value::Number(1.0))].into_iter().collect()],
        );
        let out = format_datasets([&dataset]);
        assert!(out.contains("sales"));
        assert!(out.contains("revenue (number)"));
    }
}
