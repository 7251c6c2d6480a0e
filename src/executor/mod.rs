/// Executor module - evaluates queries against in-memory datasets
///
/// Structure:
/// - coercion: loose equality, numeric coercion, sort comparator
/// - conditions: filter clause evaluation
/// - projection: column selection and aliasing
/// - aggregate: partitioning and SUM/COUNT/AVG/MIN/MAX
/// - ordering: ORDER BY and LIMIT
/// - declarative: structured query pipeline
/// - sql: SQL-subset pipeline
/// - dispatcher: routes a request to one of the two pipelines

pub mod coercion;
pub mod conditions;
pub mod projection;
pub mod aggregate;
pub mod ordering;
pub mod declarative;
pub mod sql;
pub mod dispatcher;

pub use dispatcher::QueryExecutor;
pub use conditions::ConditionEvaluator;
pub use projection::Projector;
pub use aggregate::{Aggregator, Group};
pub use ordering::Orderer;
pub use declarative::DeclarativeExecutor;
pub use sql::SqlExecutor;
