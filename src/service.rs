//! Request-handling layer around the engine
//!
//! Owns the dataset provider, decodes JSON requests and applies the
//! optional result cap. The cap lives here, never inside the engine.

use serde::Serialize;
use tracing::{info, warn};

use crate::settings::EngineConfig;
use crate::executor::QueryExecutor;
use crate::query::QueryRequest;
use crate::storage;
use crate::types::{Catalog, DatasetProvider, QueryError, Row};

/// Engine result plus the calling layer's truncation report.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub data: Vec<Row>,
    pub row_count: usize,
    /// Rows the engine produced before the cap.
    pub total_row_count: usize,
    pub truncated: bool,
}

#[derive(Debug)]
pub struct QueryService<P = Catalog> {
    provider: P,
    max_result_rows: Option<usize>,
}

impl QueryService<Catalog> {
    /// Builds a service over every CSV in the configured data directory.
    pub fn from_config(config: &EngineConfig) -> Result<Self, QueryError> {
        let catalog = storage::load_dir(&config.data_dir)?;
        info!(datasets = catalog.len(), "query service ready");
        Ok(Self::new(catalog, config.max_result_rows))
    }
}

impl<P: DatasetProvider> QueryService<P> {
    pub const fn new(provider: P, max_result_rows: Option<usize>) -> Self {
        Self {
            provider,
            max_result_rows,
        }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    pub fn handle(&self, request: &QueryRequest) -> ServiceResponse {
        let mut data = QueryExecutor::execute(&self.provider, request).data;
        let total_row_count = data.len();

        let truncated = match self.max_result_rows {
            Some(cap) if total_row_count > cap => {
                warn!(cap, total = total_row_count, "result capped");
                data.truncate(cap);
                true
            }
            _ => false,
        };

        ServiceResponse {
            row_count: data.len(),
            data,
            total_row_count,
            truncated,
        }
    }

    /// JSON in, JSON out. Only a request that fails to decode is an error.
    pub fn handle_json(&self, body: &str) -> Result<String, QueryError> {
        let request = QueryRequest::from_json(body)?;
        Ok(serde_json::to_string(&self.handle(&request))?)
    }
}
