/// Filter evaluation
///
/// A row survives when every clause holds (plain AND, no OR, no negation
/// besides `!=`). Clauses are pure, so evaluation order is irrelevant.
/// Supports: =, !=, >, <, >=, <=, contains, startsWith, endsWith, between.
/// An unrecognised operator is vacuously true.

use tracing::{debug, warn};

use super::coercion::{loose_equals, to_lower_text, to_number};
use crate::query::{Filter, FilterOperator};
use crate::types::{Row, Value};

pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Keep the rows matching every filter, in their original order.
    pub fn apply<'a, I>(rows: I, filters: &[Filter]) -> Vec<&'a Row>
    where
        I: IntoIterator<Item = &'a Row>,
    {
        for filter in filters {
            if let FilterOperator::Unknown(op) = &filter.operator {
                warn!(column = %filter.column, operator = %op, "unsupported filter operator, clause ignored");
            }
        }

        let kept: Vec<&Row> = rows
            .into_iter()
            .filter(|row| Self::matches_all(row, filters))
            .collect();
        debug!(filters = filters.len(), kept = kept.len(), "filters applied");
        kept
    }

    #[must_use]
    pub fn matches_all(row: &Row, filters: &[Filter]) -> bool {
        filters.iter().all(|filter| Self::evaluate(row, filter))
    }

    /// Evaluate one clause against the named column of `row`
    #[must_use]
    pub fn evaluate(row: &Row, filter: &Filter) -> bool {
        Self::compare(
            row.value(&filter.column),
            &filter.operator,
            &filter.value,
            filter.value2.as_ref(),
        )
    }

    /// Core predicate: `cell <operator> operand`.
    ///
    /// Ordering operators compare numerically and are false whenever either
    /// side is not a number.
    #[must_use]
    pub fn compare(
        cell: &Value,
        operator: &FilterOperator,
        operand: &Value,
        operand2: Option<&Value>,
    ) -> bool {
        match operator {
            FilterOperator::Equals => loose_equals(cell, operand),
            FilterOperator::NotEquals => !loose_equals(cell, operand),
            FilterOperator::GreaterThan => to_number(cell) > to_number(operand),
            FilterOperator::LessThan => to_number(cell) < to_number(operand),
            FilterOperator::GreaterThanOrEqual => to_number(cell) >= to_number(operand),
            FilterOperator::LessThanOrEqual => to_number(cell) <= to_number(operand),
            FilterOperator::Contains => to_lower_text(cell).contains(&to_lower_text(operand)),
            FilterOperator::StartsWith => {
                to_lower_text(cell).starts_with(&to_lower_text(operand))
            }
            FilterOperator::EndsWith => to_lower_text(cell).ends_with(&to_lower_text(operand)),
            FilterOperator::Between => match operand2 {
                Some(high) => {
                    let x = to_number(cell);
                    x >= to_number(operand) && x <= to_number(high)
                }
                None => true,
            },
            FilterOperator::Unknown(_) => true,
        }
    }
}
