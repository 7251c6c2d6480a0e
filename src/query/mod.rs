// Query model: the declarative form and the request/response envelope
mod declarative;
mod request;

pub use declarative::{
    AggregationKind, DeclarativeQuery, Filter, FilterOperator, OrderBy, SelectColumn,
    SortDirection,
};
pub use request::{Query, QueryRequest, QueryResponse, SqlQuery};
