/// ORDER BY and LIMIT
///
/// Sorting is stable. LIMIT is applied last and only ever shortens the
/// sequence.

use super::coercion::sort_compare;
use crate::query::{OrderBy, SortDirection};
use crate::types::Row;

pub struct Orderer;

impl Orderer {
    pub fn order(rows: &mut [Row], order_by: &OrderBy) {
        rows.sort_by(|a, b| {
            let cmp = sort_compare(a.value(&order_by.column), b.value(&order_by.column));
            match order_by.direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });
    }

    pub fn limit(rows: &mut Vec<Row>, limit: Option<usize>) {
        if let Some(n) = limit {
            rows.truncate(n);
        }
    }

    #[must_use]
    pub fn order_and_limit(
        mut rows: Vec<Row>,
        order_by: Option<&OrderBy>,
        limit: Option<usize>,
    ) -> Vec<Row> {
        if let Some(order_by) = order_by {
            Self::order(&mut rows, order_by);
        }
        Self::limit(&mut rows, limit);
        rows
    }
}
