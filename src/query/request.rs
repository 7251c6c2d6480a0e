use serde::{Deserialize, Serialize};

use super::declarative::DeclarativeQuery;
use crate::core::{QueryError, Row};

/// `{ datasetId, query }` as handed over by the request handler.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    #[serde(default)]
    pub dataset_id: String,
    pub query: Query,
}

impl QueryRequest {
    #[must_use]
    pub fn new(dataset_id: impl Into<String>, query: Query) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            query,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Either `{ "type": "sql", "sql": "..." }` or a declarative query object.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Query {
    Sql(SqlQuery),
    Declarative(DeclarativeQuery),
}

impl Query {
    #[must_use]
    pub fn sql(sql: impl Into<String>) -> Self {
        Self::Sql(SqlQuery::new(sql))
    }
}

impl From<DeclarativeQuery> for Query {
    fn from(query: DeclarativeQuery) -> Self {
        Self::Declarative(query)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SqlQuery {
    #[serde(rename = "type")]
    kind: SqlTag,
    pub sql: String,
}

impl SqlQuery {
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            kind: SqlTag::Sql,
            sql: sql.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
enum SqlTag {
    #[serde(rename = "sql")]
    Sql,
}

/// `{ data, rowCount }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub data: Vec<Row>,
    pub row_count: usize,
}

impl QueryResponse {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_rows(data: Vec<Row>) -> Self {
        let row_count = data.len();
        Self { data, row_count }
    }
}
