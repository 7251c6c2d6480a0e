// Module declarations
pub mod error;
pub mod value;
pub mod column;
pub mod row;
pub mod dataset;
pub mod catalog;

// Re-exports for convenience
pub use error::QueryError;
pub use value::Value;
pub use column::{ColumnMeta, ColumnType};
pub use row::Row;
pub use dataset::Dataset;
pub use catalog::{Catalog, DatasetProvider};
