/// Clause extraction for the SQL subset
///
/// There is no grammar and no AST: every clause is pulled out of the raw
/// text by its own pattern, independently of where it appears. A clause
/// whose pattern does not match is simply absent.
///
/// Supported shape:
///   SELECT col, FN(col) [AS alias], ... FROM "table"
///   [WHERE col (=|>|<) value] [GROUP BY col] [LIMIT n]
/// Only the first WHERE condition is honoured; AND/OR are not composed.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::query::AggregationKind;

static FROM_RE: OnceLock<Regex> = OnceLock::new();
static LIMIT_RE: OnceLock<Regex> = OnceLock::new();
static WHERE_RE: OnceLock<Regex> = OnceLock::new();
static CONDITION_RE: OnceLock<Regex> = OnceLock::new();
static GROUP_BY_RE: OnceLock<Regex> = OnceLock::new();
static SELECT_RE: OnceLock<Regex> = OnceLock::new();
static AGGREGATE_RE: OnceLock<Regex> = OnceLock::new();
static ALIAS_RE: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("valid regex"))
}

/// `col op value` from the WHERE clause, as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereCondition {
    pub column: String,
    pub operator: String,
    pub value: String,
}

/// `FN(col) [AS alias]` from the SELECT list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSelect {
    pub function: AggregationKind,
    pub column: String,
    pub alias: Option<String>,
}

impl AggregateSelect {
    /// Output key: the explicit alias, else `fn_col` (e.g. `sum_revenue`).
    #[must_use]
    pub fn output_name(&self) -> String {
        self.alias
            .clone()
            .unwrap_or_else(|| format!("{}_{}", self.function.name(), self.column))
    }
}

/// Everything the executor needs, extracted clause by clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlClauses {
    pub from: Option<String>,
    pub limit: Option<usize>,
    pub condition: Option<WhereCondition>,
    pub group_by: Option<String>,
    pub aggregates: Vec<AggregateSelect>,
}

impl SqlClauses {
    #[must_use]
    pub fn extract(sql: &str) -> Self {
        Self {
            from: extract_from(sql),
            limit: extract_limit(sql),
            condition: extract_condition(sql),
            group_by: extract_group_by(sql),
            aggregates: extract_aggregates(sql),
        }
    }
}

#[must_use]
pub fn extract_from(sql: &str) -> Option<String> {
    pattern(&FROM_RE, r#"(?i)FROM\s+"?([^"\s]+)"?"#)
        .captures(sql)
        .map(|caps| caps[1].to_string())
}

#[must_use]
pub fn extract_limit(sql: &str) -> Option<usize> {
    pattern(&LIMIT_RE, r"(?i)LIMIT\s+(\d+)")
        .captures(sql)
        .and_then(|caps| caps[1].parse().ok())
}

/// First `col op value` inside the WHERE clause.
#[must_use]
pub fn extract_condition(sql: &str) -> Option<WhereCondition> {
    let where_text = pattern(&WHERE_RE, r"(?is)WHERE\s+(.+?)(?:GROUP|ORDER|LIMIT|$)")
        .captures(sql)?
        .get(1)?
        .as_str();

    let Some(caps) = pattern(&CONDITION_RE, r#"(\w+)\s*([=<>!]+)\s*['"]?([^'"]+)['"]?"#)
        .captures(where_text)
    else {
        warn!(clause = where_text.trim(), "unparsable WHERE condition, clause ignored");
        return None;
    };

    Some(WhereCondition {
        column: caps[1].to_string(),
        operator: caps[2].to_string(),
        value: caps[3].trim().to_string(),
    })
}

#[must_use]
pub fn extract_group_by(sql: &str) -> Option<String> {
    pattern(&GROUP_BY_RE, r"(?i)GROUP\s+BY\s+(\w+)")
        .captures(sql)
        .map(|caps| caps[1].to_string())
}

/// Aggregate calls in the SELECT list; plain columns are skipped.
#[must_use]
pub fn extract_aggregates(sql: &str) -> Vec<AggregateSelect> {
    let Some(caps) = pattern(&SELECT_RE, r"(?is)SELECT\s+(.+?)\s+FROM").captures(sql) else {
        return Vec::new();
    };

    let aggregate_re = pattern(&AGGREGATE_RE, r"(?i)(SUM|COUNT|AVG|MIN|MAX)\s*\(\s*(\w+)\s*\)");
    let alias_re = pattern(&ALIAS_RE, r"(?i)\bAS\s+(\w+)");

    caps[1]
        .split(',')
        .filter_map(|part| {
            let agg = aggregate_re.captures(part)?;
            Some(AggregateSelect {
                function: AggregationKind::from_name(&agg[1]),
                column: agg[2].to_string(),
                alias: alias_re.captures(part).map(|a| a[1].to_string()),
            })
        })
        .collect()
}
