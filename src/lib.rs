// QueryLens - in-memory ad-hoc query and aggregation engine
// Feeds chart renderers and table views from resident tabular datasets

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![allow(clippy::option_if_let_else)]

// Core data structures (values, rows, datasets, catalog, errors)
pub mod core;

// Re-export all core types as types module
pub mod types {
    pub use crate::core::*;
}

// Query model (declarative form, request/response envelope)
pub mod query;

// SQL-subset clause extraction
pub mod parser;

// Query executor (coercion, filters, projection, aggregation, ordering)
pub mod executor;

// CSV ingestion
pub mod storage;

// Layered configuration
pub mod settings;

// Request-handling layer with result cap
pub mod service;

// Text rendering for the CLI
pub mod format;

// Re-export commonly used types for convenience
pub use crate::core::{Catalog, ColumnMeta, ColumnType, Dataset, DatasetProvider, QueryError, Row, Value};
pub use query::{DeclarativeQuery, Query, QueryRequest, QueryResponse};
pub use executor::QueryExecutor;
pub use settings::{EngineConfig, OutputFormat};
pub use service::{QueryService, ServiceResponse};
