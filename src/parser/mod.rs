// SQL-subset clause extraction (regex per clause, no AST)
mod sql;

pub use sql::{
    AggregateSelect, SqlClauses, WhereCondition, extract_aggregates, extract_condition,
    extract_from, extract_group_by, extract_limit,
};
