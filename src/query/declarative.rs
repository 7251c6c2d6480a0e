/// Structured ("visual") query model
///
/// Deserialisation is deliberately forgiving: unknown, missing or non-string
/// operators and aggregations map to pass-through variants, missing lists
/// and filter fields default to empty, and a negative or non-numeric
/// `limit` reads as no limit.

use serde::{Deserialize, Deserializer};

use crate::core::Value;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeclarativeQuery {
    pub columns: Vec<SelectColumn>,
    pub filters: Vec<Filter>,
    pub group_by: Vec<String>,
    pub order_by: Option<OrderBy>,
    #[serde(deserialize_with = "lenient_limit")]
    pub limit: Option<usize>,
}

impl DeclarativeQuery {
    /// True when at least one selected column asks for a real aggregation.
    #[must_use]
    pub fn has_aggregation(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.aggregation != AggregationKind::None)
    }
}

fn lenient_limit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_f64()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.floor() as usize))
}

/// String content of a JSON value; anything that is not a string reads as "".
fn text_of(raw: serde_json::Value) -> String {
    match raw {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    }
}

/// One entry of the `columns` list. A bare string is shorthand for
/// `{column, aggregation: "none"}`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(from = "RawSelectColumn")]
pub struct SelectColumn {
    pub column: String,
    pub aggregation: AggregationKind,
    pub alias: Option<String>,
}

impl SelectColumn {
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            aggregation: AggregationKind::None,
            alias: None,
        }
    }

    #[must_use]
    pub fn aggregate(column: impl Into<String>, aggregation: AggregationKind) -> Self {
        Self {
            aggregation,
            ..Self::new(column)
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Key the column is written under in result rows.
    #[must_use]
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelectColumn {
    Bare(String),
    Full {
        column: String,
        #[serde(default)]
        aggregation: AggregationKind,
        #[serde(default)]
        alias: Option<String>,
    },
}

impl From<RawSelectColumn> for SelectColumn {
    fn from(raw: RawSelectColumn) -> Self {
        match raw {
            RawSelectColumn::Bare(column) => Self::new(column),
            RawSelectColumn::Full {
                column,
                aggregation,
                alias,
            } => Self {
                column,
                aggregation,
                alias,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "serde_json::Value")]
pub enum AggregationKind {
    #[default]
    None,
    Sum,
    Count,
    Avg,
    Min,
    Max,
}

impl AggregationKind {
    /// Case-insensitive lookup; anything unrecognised is `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sum" => Self::Sum,
            "count" => Self::Count,
            "avg" => Self::Avg,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sum => "sum",
            Self::Count => "count",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl From<String> for AggregationKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<serde_json::Value> for AggregationKind {
    fn from(raw: serde_json::Value) -> Self {
        Self::from(text_of(raw))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Filter {
    #[serde(default)]
    pub column: String,
    #[serde(default = "FilterOperator::missing")]
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub value2: Option<Value>,
}

impl Filter {
    #[must_use]
    pub fn new(column: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
            value2: None,
        }
    }

    #[must_use]
    pub fn between(column: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self {
            value2: Some(high.into()),
            ..Self::new(column, FilterOperator::Between, low)
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(from = "serde_json::Value")]
pub enum FilterOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    Between,
    /// Anything unrecognised; evaluates as always true.
    Unknown(String),
}

impl From<&str> for FilterOperator {
    fn from(op: &str) -> Self {
        match op {
            "=" | "==" => Self::Equals,
            "!=" | "<>" => Self::NotEquals,
            ">" => Self::GreaterThan,
            "<" => Self::LessThan,
            ">=" => Self::GreaterThanOrEqual,
            "<=" => Self::LessThanOrEqual,
            "contains" => Self::Contains,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "between" => Self::Between,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for FilterOperator {
    fn from(op: String) -> Self {
        Self::from(op.as_str())
    }
}

impl From<serde_json::Value> for FilterOperator {
    fn from(raw: serde_json::Value) -> Self {
        Self::from(text_of(raw))
    }
}

impl FilterOperator {
    /// Operator of a filter that names none; passes every row.
    #[must_use]
    pub const fn missing() -> Self {
        Self::Unknown(String::new())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl OrderBy {
    #[must_use]
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(from = "serde_json::Value")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<String> for SortDirection {
    fn from(direction: String) -> Self {
        if direction.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

impl From<serde_json::Value> for SortDirection {
    fn from(raw: serde_json::Value) -> Self {
        Self::from(text_of(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_object_columns() {
        let query: DeclarativeQuery = serde_json::from_str(
            r#"{"columns": ["region", {"column": "revenue", "aggregation": "sum", "alias": "total"}]}"#,
        )
        .unwrap();

        assert_eq!(query.columns[0], SelectColumn::new("region"));
        assert_eq!(
            query.columns[1],
            SelectColumn::aggregate("revenue", AggregationKind::Sum).with_alias("total")
        );
        assert_eq!(query.columns[1].output_name(), "total");
        assert!(query.has_aggregation());
        assert!(query.filters.is_empty());
        assert!(query.group_by.is_empty());
    }

    #[test]
    fn test_unknown_operator_and_aggregation_are_lenient() {
        let query: DeclarativeQuery = serde_json::from_str(
            r#"{
                "columns": [{"column": "revenue", "aggregation": "median"}],
                "filters": [{"column": "region", "operator": "like", "value": "N%"}]
            }"#,
        )
        .unwrap();

        assert_eq!(query.columns[0].aggregation, AggregationKind::None);
        assert_eq!(
            query.filters[0].operator,
            FilterOperator::Unknown("like".to_string())
        );
    }

    #[test]
    fn test_limit_parsing() {
        let parse = |json: &str| serde_json::from_str::<DeclarativeQuery>(json).unwrap().limit;
        assert_eq!(parse(r#"{"limit": 5}"#), Some(5));
        assert_eq!(parse(r#"{"limit": 0}"#), Some(0));
        assert_eq!(parse(r#"{"limit": -3}"#), None);
        assert_eq!(parse(r#"{"limit": null}"#), None);
        assert_eq!(parse(r#"{"limit": "1"}"#), None);
        assert_eq!(parse(r#"{"limit": 2.7}"#), Some(2));
        assert_eq!(parse("{}"), None);
    }

    #[test]
    fn test_order_by_direction() {
        let query: DeclarativeQuery =
            serde_json::from_str(r#"{"orderBy": {"column": "revenue", "direction": "DESC"}}"#)
                .unwrap();
        assert_eq!(query.order_by, Some(OrderBy::desc("revenue")));

        let query: DeclarativeQuery =
            serde_json::from_str(r#"{"orderBy": {"column": "revenue"}}"#).unwrap();
        assert_eq!(query.order_by, Some(OrderBy::asc("revenue")));
    }

    #[test]
    fn test_filter_value_shapes() {
        let filters: Vec<Filter> = serde_json::from_str(
            r#"[
                {"column": "revenue", "operator": ">=", "value": 100},
                {"column": "revenue", "operator": "between", "value": "10", "value2": 20},
                {"column": "region", "operator": "startsWith"}
            ]"#,
        )
        .unwrap();

        assert_eq!(filters[0], Filter::new("revenue", FilterOperator::GreaterThanOrEqual, 100.0));
        assert_eq!(filters[1], Filter::between("revenue", "10", 20.0));
        assert_eq!(filters[2].value, Value::Null);
        assert_eq!(filters[2].operator, FilterOperator::StartsWith);
    }

    #[test]
    fn test_aggregation_names() {
        assert_eq!(AggregationKind::from_name("SUM"), AggregationKind::Sum);
        assert_eq!(AggregationKind::from_name("Avg"), AggregationKind::Avg);
        assert_eq!(AggregationKind::from_name("stddev"), AggregationKind::None);
        assert_eq!(AggregationKind::Max.name(), "max");
    }
}
