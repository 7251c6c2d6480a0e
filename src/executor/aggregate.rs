/// Grouping and aggregation
///
/// Rows are partitioned by the `|`-joined text of their group-by values, so
/// values of different types that print the same (`1` and `"1"`) share a
/// partition. Partitions come out in first-seen order.

use std::collections::HashMap;

use tracing::debug;

use super::coercion::to_number;
use crate::query::{AggregationKind, SelectColumn};
use crate::types::{Row, Value};

const KEY_SEPARATOR: &str = "|";

/// One partition of the filtered rows; `rows[0]` is the representative.
#[derive(Debug)]
pub struct Group<'a> {
    pub key: String,
    pub rows: Vec<&'a Row>,
}

impl<'a> Group<'a> {
    #[must_use]
    pub fn representative(&self) -> &'a Row {
        self.rows[0]
    }
}

pub struct Aggregator;

impl Aggregator {
    #[must_use]
    pub fn group_key(row: &Row, group_by: &[String]) -> String {
        group_by
            .iter()
            .map(|col| row.value(col).to_string())
            .collect::<Vec<_>>()
            .join(KEY_SEPARATOR)
    }

    /// Split rows into disjoint, exhaustive partitions in first-seen order.
    ///
    /// Every group holds at least one row.
    #[must_use]
    pub fn partition<'a>(rows: &[&'a Row], group_by: &[String]) -> Vec<Group<'a>> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<Group<'a>> = Vec::new();

        for &row in rows {
            let key = Self::group_key(row, group_by);
            match index.get(&key) {
                Some(&slot) => groups[slot].rows.push(row),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }

        groups
    }

    /// Numeric values of `column` across `rows`, with non-numbers dropped.
    #[must_use]
    pub fn numeric_values(rows: &[&Row], column: &str) -> Vec<f64> {
        rows.iter()
            .map(|row| to_number(row.value(column)))
            .filter(|n| !n.is_nan())
            .collect()
    }

    /// Reduce numeric values; an empty input yields 0 for every function.
    ///
    /// `count` is the number of numeric values, not the number of rows.
    /// Returns `None` for `AggregationKind::None`, which does not reduce.
    #[must_use]
    pub fn reduce(kind: AggregationKind, values: &[f64]) -> Option<f64> {
        let result = match kind {
            AggregationKind::None => return None,
            AggregationKind::Sum => values.iter().sum(),
            AggregationKind::Count => values.len() as f64,
            AggregationKind::Avg => {
                if values.is_empty() {
                    0.0
                } else {
                    values.iter().sum::<f64>() / values.len() as f64
                }
            }
            AggregationKind::Min => values.iter().copied().reduce(f64::min).unwrap_or(0.0),
            AggregationKind::Max => values.iter().copied().reduce(f64::max).unwrap_or(0.0),
        };
        Some(result)
    }

    /// GROUP BY with per-column aggregation.
    ///
    /// Each output row holds the group-by columns (taken from the first row
    /// of the partition), then every selected column under its output name:
    /// aggregated columns are reduced over the whole partition, plain
    /// columns take the representative's value.
    #[must_use]
    pub fn aggregate(rows: &[&Row], columns: &[SelectColumn], group_by: &[String]) -> Vec<Row> {
        let groups = Self::partition(rows, group_by);
        debug!(groups = groups.len(), rows = rows.len(), "rows partitioned");

        groups
            .iter()
            .map(|group| {
                let first = group.representative();
                let mut out = Row::with_capacity(group_by.len() + columns.len());

                for col in group_by {
                    out.insert(col.clone(), first.value(col).clone());
                }

                for col in columns {
                    let value = if col.aggregation == AggregationKind::None {
                        first.value(&col.column).clone()
                    } else {
                        let values = Self::numeric_values(&group.rows, &col.column);
                        Self::reduce(col.aggregation, &values).map_or(Value::Null, Value::Number)
                    };
                    out.insert(col.output_name(), value);
                }

                out
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sale(region: &str, product: &str, revenue: Value) -> Row {
        [
            ("region", Value::text(region)),
            ("product", Value::text(product)),
            ("revenue", revenue),
        ]
        .into_iter()
        .collect()
    }

    fn sales() -> Vec<Row> {
        vec![
            sale("North", "Widget A", Value::Number(100.0)),
            sale("North", "Widget B", Value::Number(50.0)),
            sale("South", "Widget A", Value::Number(200.0)),
            sale("North", "Widget A", Value::text("n/a")),
        ]
    }

    #[test]
    fn test_reduce_empty_is_zero() {
        for kind in [
            AggregationKind::Sum,
            AggregationKind::Count,
            AggregationKind::Avg,
            AggregationKind::Min,
            AggregationKind::Max,
        ] {
            assert_eq!(Aggregator::reduce(kind, &[]), Some(0.0));
        }
        assert_eq!(Aggregator::reduce(AggregationKind::None, &[1.0]), None);
    }

    #[test]
    fn test_reduce_values() {
        let values = [4.0, -2.0, 10.0];
        assert_eq!(Aggregator::reduce(AggregationKind::Sum, &values), Some(12.0));
        assert_eq!(Aggregator::reduce(AggregationKind::Count, &values), Some(3.0));
        assert_eq!(Aggregator::reduce(AggregationKind::Avg, &values), Some(4.0));
        assert_eq!(Aggregator::reduce(AggregationKind::Min, &values), Some(-2.0));
        assert_eq!(Aggregator::reduce(AggregationKind::Max, &values), Some(10.0));
    }

    #[test]
    fn test_partition_first_seen_order() {
        let rows = sales();
        let refs: Vec<&Row> = rows.iter().collect();
        let groups = Aggregator::partition(&refs, &["region".to_string()]);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["North", "South"]);
        assert_eq!(groups[0].rows.len(), 3);
        assert_eq!(groups[1].rows.len(), 1);
    }

    #[test]
    fn test_composite_key() {
        let rows = sales();
        let group_by = vec!["region".to_string(), "product".to_string()];
        assert_eq!(Aggregator::group_key(&rows[0], &group_by), "North|Widget A");

        let refs: Vec<&Row> = rows.iter().collect();
        assert_eq!(Aggregator::partition(&refs, &group_by).len(), 3);
    }

    #[test]
    fn test_key_merges_values_that_print_alike() {
        let rows: Vec<Row> = vec![
            [("k", Value::Number(1.0))].into_iter().collect(),
            [("k", Value::text("1"))].into_iter().collect(),
        ];
        let refs: Vec<&Row> = rows.iter().collect();
        assert_eq!(Aggregator::partition(&refs, &["k".to_string()]).len(), 1);
    }

    #[test]
    fn test_aggregate_sum_and_pick_first() {
        let rows = sales();
        let refs: Vec<&Row> = rows.iter().collect();
        let out = Aggregator::aggregate(
            &refs,
            &[
                SelectColumn::aggregate("revenue", AggregationKind::Sum),
                SelectColumn::new("product"),
            ],
            &["region".to_string()],
        );

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].columns().collect::<Vec<_>>(), vec!["region", "revenue", "product"]);
        assert_eq!(out[0].get("revenue"), Some(&Value::Number(150.0)));
        assert_eq!(out[0].get("product"), Some(&Value::text("Widget A")));
        assert_eq!(out[1].get("revenue"), Some(&Value::Number(200.0)));
    }

    #[test]
    fn test_count_skips_non_numeric_values() {
        let rows = sales();
        let refs: Vec<&Row> = rows.iter().collect();
        let out = Aggregator::aggregate(
            &refs,
            &[
                SelectColumn::aggregate("revenue", AggregationKind::Count).with_alias("n"),
                SelectColumn::aggregate("revenue", AggregationKind::Avg).with_alias("mean"),
            ],
            &["region".to_string()],
        );

        // three North rows, one of them "n/a"
        assert_eq!(out[0].get("n"), Some(&Value::Number(2.0)));
        assert_eq!(out[0].get("mean"), Some(&Value::Number(75.0)));
    }

    #[test]
    fn test_aggregate_over_text_column_is_zero() {
        let rows = sales();
        let refs: Vec<&Row> = rows.iter().collect();
        let out = Aggregator::aggregate(
            &refs,
            &[SelectColumn::aggregate("product", AggregationKind::Max)],
            &["region".to_string()],
        );
        assert_eq!(out[0].get("product"), Some(&Value::Number(0.0)));
    }
}
