/// Declarative (structured) query execution
///
/// Pipeline: filter -> (aggregate | project | pass through) -> order -> limit.

use tracing::debug;

use super::aggregate::Aggregator;
use super::conditions::ConditionEvaluator;
use super::ordering::Orderer;
use super::projection::Projector;
use crate::query::DeclarativeQuery;
use crate::types::{DatasetProvider, Row};

pub struct DeclarativeExecutor;

impl DeclarativeExecutor {
    /// Run `query` against the dataset `dataset_id`.
    ///
    /// An unknown dataset yields no rows.
    pub fn execute<P>(provider: &P, dataset_id: &str, query: &DeclarativeQuery) -> Vec<Row>
    where
        P: DatasetProvider + ?Sized,
    {
        let Some(dataset) = provider.get_dataset(dataset_id) else {
            debug!(dataset = dataset_id, "dataset not found, empty result");
            return Vec::new();
        };

        Self::execute_rows(&dataset.rows, query)
    }

    /// Run `query` over an already resolved row sequence.
    #[must_use]
    pub fn execute_rows(rows: &[Row], query: &DeclarativeQuery) -> Vec<Row> {
        let filtered = ConditionEvaluator::apply(rows, &query.filters);

        let shaped = if !query.group_by.is_empty() && query.has_aggregation() {
            Aggregator::aggregate(&filtered, &query.columns, &query.group_by)
        } else {
            // empty `columns` passes rows through whole
            Projector::project(&filtered, &query.columns)
        };

        let result = Orderer::order_and_limit(shaped, query.order_by.as_ref(), query.limit);
        debug!(input = rows.len(), output = result.len(), "declarative query executed");
        result
    }
}
