pub mod ops;
pub mod spec;
pub mod validate;

pub use ops::{CalculationOp, FilterCombination, FilterOp, SortOrder, UnknownToken};
pub use spec::{Calculation, Filter, FilterValue, Order, QuerySpec};
pub use validate::{Validate, ValidationError};
