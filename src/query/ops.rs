//! Closed operator vocabularies and their wire tokens.
//!
//! Every enum maps exhaustively to the exact string the API uses. Decoding a
//! token outside the vocabulary is an error, so an operator added server-side
//! later is never mistaken for a known one.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{token}`")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub token: String,
}

/// Declares a fieldless enum with an exhaustive `as_str` mapping and matching
/// `Display`, `FromStr`, `Serialize` and `Deserialize` impls.
///
/// `exact` enums only accept their token verbatim; `any_case` enums also
/// accept an ASCII case variant of it on decode and always emit the canonical
/// spelling.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $case:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::query::ops::UnknownToken;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $( $token => return Ok($name::$variant), )+
                    _ => {}
                }
                if $crate::query::ops::wire_enum!(@any_case $case) {
                    if let Some(v) = Self::ALL.iter().find(|v| v.as_str().eq_ignore_ascii_case(s)) {
                        return Ok(*v);
                    }
                }
                Err($crate::query::ops::UnknownToken {
                    kind: stringify!($name),
                    token: s.to_string(),
                })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let token = <String as serde::Deserialize>::deserialize(deserializer)?;
                token.parse().map_err(serde::de::Error::custom)
            }
        }
    };
    (@any_case exact) => { false };
    (@any_case any_case) => { true };
}

pub(crate) use wire_enum;

wire_enum! {
    /// Aggregation applied by a calculation. The API spells these in upper case.
    pub enum CalculationOp : any_case {
        Count => "COUNT",
        Concurrency => "CONCURRENCY",
        Sum => "SUM",
        Avg => "AVG",
        CountDistinct => "COUNT_DISTINCT",
        Heatmap => "HEATMAP",
        Max => "MAX",
        Min => "MIN",
        P001 => "P001",
        P01 => "P01",
        P05 => "P05",
        P10 => "P10",
        P25 => "P25",
        P50 => "P50",
        P75 => "P75",
        P90 => "P90",
        P95 => "P95",
        P99 => "P99",
        P999 => "P999",
        RateAvg => "RATE_AVG",
        RateSum => "RATE_SUM",
        RateMax => "RATE_MAX",
    }
}

impl CalculationOp {
    /// COUNT and CONCURRENCY run over the whole event stream; every other op
    /// aggregates one column.
    pub fn requires_column(&self) -> bool {
        !matches!(self, CalculationOp::Count | CalculationOp::Concurrency)
    }
}

wire_enum! {
    pub enum FilterOp : exact {
        Equals => "=",
        NotEquals => "!=",
        GreaterThan => ">",
        GreaterThanOrEqual => ">=",
        SmallerThan => "<",
        SmallerThanOrEqual => "<=",
        StartsWith => "starts-with",
        DoesNotStartWith => "does-not-start-with",
        Exists => "exists",
        DoesNotExist => "does-not-exist",
        Contains => "contains",
        DoesNotContain => "does-not-contain",
        In => "in",
        NotIn => "not-in",
    }
}

impl FilterOp {
    /// Only the two existence checks stand without a value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOp::Exists | FilterOp::DoesNotExist)
    }

    pub fn accepts_list(&self) -> bool {
        matches!(self, FilterOp::In | FilterOp::NotIn)
    }
}

wire_enum! {
    /// How the filters of a query are joined. The API treats an unset value as AND.
    pub enum FilterCombination : exact {
        And => "AND",
        Or => "OR",
    }
}

impl Default for FilterCombination {
    fn default() -> Self {
        FilterCombination::And
    }
}

wire_enum! {
    pub enum SortOrder : exact {
        Ascending => "ascending",
        Descending => "descending",
    }
}
