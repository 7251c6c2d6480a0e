use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::executor::coercion::parse_number;
use crate::types::{Catalog, ColumnMeta, Dataset, QueryError, Row, Value};

/// Turns one raw CSV cell into a typed value.
///
/// Empty -> `Null`, `true`/`false` (any case) -> `Boolean`, numeric text ->
/// `Number`, everything else stays `Text` exactly as written.
#[must_use]
pub fn parse_cell(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    if raw.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    match parse_number(raw) {
        Some(n) => Value::Number(n),
        None => Value::Text(raw.to_string()),
    }
}

/// Reads a CSV stream with a header row into a dataset named `id`.
///
/// Rows may be ragged: missing trailing cells leave the column absent
/// from that row, surplus cells are dropped.
pub fn read_csv<R: Read>(id: impl Into<String>, reader: R) -> Result<Dataset, QueryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), parse_cell(cell)))
            .collect();
        rows.push(row);
    }

    let columns = headers
        .iter()
        .map(|name| ColumnMeta::infer(name.clone(), rows.iter().filter_map(|row| row.get(name))))
        .collect();

    Ok(Dataset::new(id.into(), columns, rows))
}

/// Loads one CSV file; the dataset id is the file stem.
pub fn load_file(path: &Path) -> Result<Dataset, QueryError> {
    let id = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| QueryError::InvalidRequest(format!("bad file name: {}", path.display())))?;

    let dataset = read_csv(id, File::open(path)?)?;
    debug!(dataset = %dataset.id, rows = dataset.row_count(), "csv loaded");
    Ok(dataset)
}

/// Registers every `*.csv` file in `dir` into a fresh catalog.
pub fn load_dir(dir: &Path) -> Result<Catalog, QueryError> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    let mut catalog = Catalog::new();
    for path in paths {
        catalog.register(load_file(&path)?)?;
    }

    info!(dir = %dir.display(), datasets = catalog.len(), "data directory loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(""), Value::Null);
        assert_eq!(parse_cell("   "), Value::Null);
        assert_eq!(parse_cell("TRUE"), Value::Boolean(true));
        assert_eq!(parse_cell("false"), Value::Boolean(false));
        assert_eq!(parse_cell("12000"), Value::Number(12000.0));
        assert_eq!(parse_cell("-3.25"), Value::Number(-3.25));
        assert_eq!(parse_cell("Widget A"), Value::text("Widget A"));
        assert_eq!(parse_cell("inf"), Value::text("inf"));
    }

    #[test]
    fn test_read_csv() {
        let csv = "region,revenue,active\nNorth,100,true\nSouth,,false\nEast,n/a,\n";
        let dataset = read_csv("sales", csv.as_bytes()).unwrap();

        assert_eq!(dataset.id, "sales");
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.rows[0].get("revenue"), Some(&Value::Number(100.0)));
        assert_eq!(dataset.rows[1].get("revenue"), Some(&Value::Null));
        assert_eq!(
            dataset.columns,
            vec![
                ColumnMeta::new("region", ColumnType::Text),
                ColumnMeta::new("revenue", ColumnType::Text),
                ColumnMeta::new("active", ColumnType::Boolean),
            ]
        );
    }

    #[test]
    fn test_read_ragged_csv() {
        let csv = "a,b,c\n1,2\n1,2,3,4\n";
        let dataset = read_csv("ragged", csv.as_bytes()).unwrap();

        assert!(!dataset.rows[0].contains("c"));
        assert_eq!(dataset.rows[1].len(), 3);
        assert_eq!(dataset.get_column("c").map(|c| c.column_type), Some(ColumnType::Number));
    }

    #[test]
    fn test_load_dir() {
        let dir = TempDir::new().unwrap();
        let mut sales = File::create(dir.path().join("sales.csv")).unwrap();
        writeln!(sales, "region,revenue\nNorth,100\nSouth,200").unwrap();
        let mut users = File::create(dir.path().join("users.CSV")).unwrap();
        writeln!(users, "name\nAda").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = load_dir(dir.path()).unwrap();
        assert_eq!(catalog.ids(), vec!["sales", "users"]);
        assert_eq!(catalog.get("sales").map(Dataset::row_count), Some(2));
    }

    #[test]
    fn test_load_missing_dir() {
        assert!(matches!(
            load_dir(Path::new("/definitely/not/here")),
            Err(QueryError::Io(_))
        ));
    }
}
