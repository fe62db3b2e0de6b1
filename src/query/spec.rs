use serde::{Deserialize, Serialize};

use crate::query::ops::{CalculationOp, FilterCombination, FilterOp, SortOrder};

// ---------------------------------------------------------------------------
// QuerySpec
// ---------------------------------------------------------------------------

/// An analytical query: what to compute, over which events, grouped and
/// ordered how, across which time window.
///
/// Unset fields are left off the wire entirely, so a spec fetched from the
/// API and sent back unchanged produces the same JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calculations: Vec<Calculation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_combination: Option<FilterCombination>,
    /// Group-by columns, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdowns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Window length in seconds, ending now. Excludes `start_time`/`end_time`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<i64>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    /// Bucket width in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<i64>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The combination the API applies: AND unless OR was asked for.
    pub fn effective_filter_combination(&self) -> FilterCombination {
        self.filter_combination.unwrap_or_default()
    }

    pub fn calculation(mut self, calculation: Calculation) -> Self {
        self.calculations.push(calculation);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter_combination(mut self, combination: FilterCombination) -> Self {
        self.filter_combination = Some(combination);
        self
    }

    pub fn breakdown(mut self, column: impl Into<String>) -> Self {
        self.breakdowns.push(column.into());
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.orders.push(order);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn time_range(mut self, seconds: i64) -> Self {
        self.time_range = Some(seconds);
        self
    }

    pub fn between(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn granularity(mut self, seconds: i64) -> Self {
        self.granularity = Some(seconds);
        self
    }
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub op: CalculationOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl Calculation {
    /// A calculation without a column, e.g. COUNT.
    pub fn new(op: CalculationOp) -> Self {
        Self { op, column: None }
    }

    pub fn on(op: CalculationOp, column: impl Into<String>) -> Self {
        Self {
            op,
            column: Some(column.into()),
        }
    }

    pub fn count() -> Self {
        Self::new(CalculationOp::Count)
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<FilterValue>,
}

impl Filter {
    /// A filter without a value, e.g. `exists`.
    pub fn new(column: impl Into<String>, op: FilterOp) -> Self {
        Self {
            column: column.into(),
            op,
            value: None,
        }
    }

    pub fn with_value(column: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            column: column.into(),
            op,
            value: Some(value.into()),
        }
    }
}

/// Right-hand side of a filter. Which variant is used follows the column's
/// type, and the variant survives a JSON round trip: `10000`, `10000.0` and
/// `"10000"` decode back to `Integer`, `Float` and `String` respectively.
/// Integers above `i64::MAX` decode to `UnsignedInteger`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Boolean(bool),
    Integer(i64),
    UnsignedInteger(u64),
    Float(f64),
    String(String),
    /// Operand set for `in` / `not-in`.
    List(Vec<FilterValue>),
}

impl FilterValue {
    pub fn is_list(&self) -> bool {
        matches!(self, FilterValue::List(_))
    }

    pub fn is_empty_string(&self) -> bool {
        matches!(self, FilterValue::String(s) if s.is_empty())
    }

    /// False for NaN or an infinity anywhere in the value. JSON has no
    /// spelling for those, so they would go out as `null`.
    pub fn is_finite(&self) -> bool {
        match self {
            FilterValue::Float(v) => v.is_finite(),
            FilterValue::List(items) => items.iter().all(FilterValue::is_finite),
            _ => true,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::String(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::String(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Integer(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Integer(v.into())
    }
}

impl From<u64> for FilterValue {
    fn from(v: u64) -> Self {
        FilterValue::UnsignedInteger(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Boolean(v)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(v: Vec<T>) -> Self {
        FilterValue::List(v.into_iter().map(Into::into).collect())
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Sort key. Orders either by a breakdown column (`column` only) or by a
/// calculation result (`op`, plus `column` when the op aggregates one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op: Option<CalculationOp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl Order {
    pub fn by_column(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::default()
        }
    }

    pub fn by_calculation(calculation: &Calculation) -> Self {
        Self {
            column: calculation.column.clone(),
            op: Some(calculation.op),
            order: None,
        }
    }

    pub fn ascending(mut self) -> Self {
        self.order = Some(SortOrder::Ascending);
        self
    }

    pub fn descending(mut self) -> Self {
        self.order = Some(SortOrder::Descending);
        self
    }
}
