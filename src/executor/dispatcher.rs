use tracing::debug;

use crate::query::{Query, QueryRequest, QueryResponse};
use crate::types::DatasetProvider;

// Path-specific executors
use super::declarative::DeclarativeExecutor;
use super::sql::SqlExecutor;

pub struct QueryExecutor;

impl QueryExecutor {
    /// Executes one request against `provider`.
    ///
    /// Never fails: an unknown dataset, a malformed clause or an
    /// unsupported operator all degrade to fewer (or no) rows.
    ///
    /// The SQL path resolves its dataset from the FROM clause; the
    /// request's `dataset_id` is only used by declarative queries.
    pub fn execute<P>(provider: &P, request: &QueryRequest) -> QueryResponse
    where
        P: DatasetProvider + ?Sized,
    {
        let rows = match &request.query {
            Query::Declarative(query) => {
                debug!(dataset = %request.dataset_id, "dispatching declarative query");
                DeclarativeExecutor::execute(provider, &request.dataset_id, query)
            }
            Query::Sql(query) => {
                debug!(sql = %query.sql, "dispatching sql query");
                SqlExecutor::execute(provider, &query.sql)
            }
        };

        QueryResponse::from_rows(rows)
    }
}
