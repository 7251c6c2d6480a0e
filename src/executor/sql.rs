/// SQL-subset execution
///
/// Stages run in a fixed order whatever the clause order in the text:
/// FROM -> LIMIT -> WHERE -> GROUP BY. LIMIT truncates the source rows
/// before WHERE and GROUP BY see them. Any clause that failed to extract
/// is a no-op stage.

use tracing::{debug, warn};

use super::aggregate::Aggregator;
use super::conditions::ConditionEvaluator;
use crate::parser::{AggregateSelect, SqlClauses, WhereCondition};
use crate::query::FilterOperator;
use crate::types::{DatasetProvider, Row, Value};

pub struct SqlExecutor;

impl SqlExecutor {
    /// Run `sql` against the dataset named in its FROM clause.
    pub fn execute<P>(provider: &P, sql: &str) -> Vec<Row>
    where
        P: DatasetProvider + ?Sized,
    {
        let clauses = SqlClauses::extract(sql);
        debug!(?clauses, "sql clauses extracted");

        let Some(table) = clauses.from.as_deref() else {
            warn!("no FROM clause found, empty result");
            return Vec::new();
        };
        let Some(dataset) = provider.get_dataset(table) else {
            debug!(dataset = table, "dataset not found, empty result");
            return Vec::new();
        };

        let source = match clauses.limit {
            Some(n) => &dataset.rows[..n.min(dataset.rows.len())],
            None => &dataset.rows[..],
        };
        let mut rows: Vec<&Row> = source.iter().collect();

        if let Some(condition) = &clauses.condition {
            Self::apply_condition(&mut rows, condition);
        }

        match &clauses.group_by {
            Some(column) => Self::group(&rows, column, &clauses.aggregates),
            None => rows.into_iter().cloned().collect(),
        }
    }

    /// WHERE understands `=`, `>` and `<`; any other operator keeps every row.
    fn condition_operator(op: &str) -> Option<FilterOperator> {
        match op {
            "=" => Some(FilterOperator::Equals),
            ">" => Some(FilterOperator::GreaterThan),
            "<" => Some(FilterOperator::LessThan),
            _ => None,
        }
    }

    fn apply_condition(rows: &mut Vec<&Row>, condition: &WhereCondition) {
        let Some(operator) = Self::condition_operator(&condition.operator) else {
            warn!(operator = %condition.operator, "unsupported WHERE operator, clause ignored");
            return;
        };

        let operand = Value::text(condition.value.as_str());
        rows.retain(|row| {
            ConditionEvaluator::compare(row.value(&condition.column), &operator, &operand, None)
        });
    }

    /// One row per distinct value of `column`: the group value plus every
    /// aggregate from the SELECT list.
    fn group(rows: &[&Row], column: &str, aggregates: &[AggregateSelect]) -> Vec<Row> {
        let group_by = [column.to_string()];

        Aggregator::partition(rows, &group_by)
            .iter()
            .map(|group| {
                let mut out = Row::with_capacity(1 + aggregates.len());
                out.insert(column, group.representative().value(column).clone());

                for agg in aggregates {
                    let values = Aggregator::numeric_values(&group.rows, &agg.column);
                    let result = Aggregator::reduce(agg.function, &values).unwrap_or(0.0);
                    out.insert(agg.output_name(), Value::Number(result));
                }
                out
            })
            .collect()
    }
}
