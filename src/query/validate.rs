use thiserror::Error;

use crate::query::spec::{Calculation, Filter, Order, QuerySpec};

/// A client-side invariant violation. `field` is the dotted, indexed path of
/// the offending field, e.g. `queries[0].query.filters[1].value`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}`: {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Re-root this error under `prefix`.
    pub fn nested(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

/// Checked before an entity is sent. Reports the first violation, walking
/// fields in declaration order, so the result is deterministic.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for QuerySpec {
    fn validate(&self) -> Result<(), ValidationError> {
        for (i, calculation) in self.calculations.iter().enumerate() {
            check_calculation(calculation).map_err(|e| e.nested(&format!("calculations[{i}]")))?;
        }

        for (i, filter) in self.filters.iter().enumerate() {
            check_filter(filter).map_err(|e| e.nested(&format!("filters[{i}]")))?;
        }

        for (i, column) in self.breakdowns.iter().enumerate() {
            if column.is_empty() {
                return Err(ValidationError::new(format!("breakdowns[{i}]"), "must not be empty"));
            }
        }

        for (i, order) in self.orders.iter().enumerate() {
            check_order(order).map_err(|e| e.nested(&format!("orders[{i}]")))?;
        }

        non_negative("limit", self.limit)?;
        non_negative("time_range", self.time_range)?;
        if self.time_range.is_some() && (self.start_time.is_some() || self.end_time.is_some()) {
            return Err(ValidationError::new(
                "time_range",
                "cannot be combined with start_time/end_time",
            ));
        }
        non_negative("start_time", self.start_time)?;
        non_negative("end_time", self.end_time)?;
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(ValidationError::new("end_time", "must not be before start_time"));
            }
        }
        non_negative("granularity", self.granularity)?;

        Ok(())
    }
}

fn check_calculation(calculation: &Calculation) -> Result<(), ValidationError> {
    check_op_column(calculation.op.requires_column(), calculation.column.as_deref(), calculation.op)
}

fn check_filter(filter: &Filter) -> Result<(), ValidationError> {
    if filter.column.is_empty() {
        return Err(ValidationError::new("column", "must not be empty"));
    }

    // The API echoes existence filters back with `"value": ""`.
    let value = match filter.value.as_ref() {
        Some(v) if !filter.op.takes_value() && v.is_empty_string() => None,
        other => other,
    };

    match (filter.op.takes_value(), value) {
        (false, Some(_)) => Err(ValidationError::new(
            "value",
            format!("must not be set for op `{}`", filter.op),
        )),
        (true, None) => Err(ValidationError::new(
            "value",
            format!("is required for op `{}`", filter.op),
        )),
        (true, Some(v)) if v.is_list() && !filter.op.accepts_list() => Err(ValidationError::new(
            "value",
            format!("a list is only allowed for `in`/`not-in`, not `{}`", filter.op),
        )),
        (true, Some(v)) if !v.is_finite() => Err(ValidationError::new("value", "must be a finite number")),
        _ => Ok(()),
    }
}

fn check_order(order: &Order) -> Result<(), ValidationError> {
    match order.op {
        Some(op) => check_op_column(op.requires_column(), order.column.as_deref(), op),
        None if order.column.is_none() => Err(ValidationError::new("column", "either column or op must be set")),
        None => Ok(()),
    }
}

fn check_op_column(
    requires_column: bool,
    column: Option<&str>,
    op: impl std::fmt::Display,
) -> Result<(), ValidationError> {
    match (requires_column, column) {
        (true, None) | (true, Some("")) => Err(ValidationError::new(
            "column",
            format!("is required for op `{op}`"),
        )),
        (false, Some(_)) => Err(ValidationError::new(
            "column",
            format!("must not be set for op `{op}`"),
        )),
        _ => Ok(()),
    }
}

fn non_negative(field: &str, value: Option<i64>) -> Result<(), ValidationError> {
    match value {
        Some(v) if v < 0 => Err(ValidationError::new(field, format!("must not be negative (got {v})"))),
        _ => Ok(()),
    }
}
