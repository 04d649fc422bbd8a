//! Expression types rendered by the builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate function keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunc {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl AggregateFunc {
    /// All supported functions, in declaration order.
    pub const ALL: [AggregateFunc; 5] = [
        AggregateFunc::Sum,
        AggregateFunc::Avg,
        AggregateFunc::Count,
        AggregateFunc::Min,
        AggregateFunc::Max,
    ];

    /// The SQL keyword for this function.
    pub fn keyword(self) -> &'static str {
        match self {
            AggregateFunc::Sum => "SUM",
            AggregateFunc::Avg => "AVG",
            AggregateFunc::Count => "COUNT",
            AggregateFunc::Min => "MIN",
            AggregateFunc::Max => "MAX",
        }
    }
}

impl fmt::Display for AggregateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// An aggregated field, aliased back to its source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    pub func: AggregateFunc,
    pub field: String,
}

impl Aggregate {
    pub fn new(func: AggregateFunc, field: impl Into<String>) -> Self {
        Self {
            func,
            field: field.into(),
        }
    }
}

/// A standalone `CAST` expression, aliased back to its source name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cast {
    pub field: String,
    pub target_type: String,
}

/// Cast a field to the given type.
///
/// Independent of any builder state.
///
/// # Example
/// ```
/// use aggq::ast::cast;
/// use aggq::transpiler::ToSql;
///
/// assert_eq!(cast("price", "numeric").to_sql(), "CAST( price as numeric ) as price");
/// ```
pub fn cast(field: impl Into<String>, target_type: impl Into<String>) -> Cast {
    Cast {
        field: field.into(),
        target_type: target_type.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        let keywords: Vec<&str> = AggregateFunc::ALL.iter().map(|f| f.keyword()).collect();
        assert_eq!(keywords, ["SUM", "AVG", "COUNT", "MIN", "MAX"]);
        assert_eq!(AggregateFunc::Count.to_string(), "COUNT");
    }
}
