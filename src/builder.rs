//! Fluent builder for aggregation `SELECT` statements.
//!
//! Each chain method consumes the builder and hands it back, so a query reads
//! left to right:
//!
//! ```
//! use aggq::QueryBuilder;
//!
//! let sql = QueryBuilder::new()
//!     .select()?
//!     .fields(["A", "B", "C"])
//!     .sum(["D", "E"])?
//!     .from("T")
//!     .build();
//! assert_eq!(sql, "SELECT A,B,C,SUM(D) as D,SUM(E) as E FROM T GROUP BY A,B,C");
//! # Ok::<(), aggq::QueryError>(())
//! ```
//!
//! A builder is a plain owned value. It is not meant to be shared between
//! threads while under construction; wrap it in a lock if you must.

use serde::Serialize;
use std::fmt;

use crate::ast::{Aggregate, AggregateFunc};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::ToSql;

/// Accumulates clause state across chained calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryBuilder {
    pub(crate) select: bool,
    pub(crate) fields: Vec<String>,
    pub(crate) table: String,
    pub(crate) aggregates: Vec<Aggregate>,
}

impl QueryBuilder {
    /// Start a new, empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the `SELECT` clause.
    ///
    /// Fails with [`QueryError::DuplicateSelect`] if it is already set.
    pub fn select(mut self) -> QueryResult<Self> {
        if self.select {
            return Err(QueryError::DuplicateSelect);
        }
        self.select = true;
        Ok(self)
    }

    /// Append plain fields. Aliases such as `"tb.col as name"` are kept verbatim.
    ///
    /// Plain fields double as the implicit `GROUP BY` list once an aggregate is added.
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fields
            .extend(names.into_iter().map(|n| n.as_ref().to_string()));
        self
    }

    /// Set the table, replacing any previous one.
    pub fn from(mut self, table: impl AsRef<str>) -> Self {
        self.table = table.as_ref().to_string();
        self
    }

    /// Append `SUM(field) as field` for each field.
    pub fn sum<I, S>(self, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aggregate(AggregateFunc::Sum, names)
    }

    /// Append `AVG(field) as field` for each field.
    pub fn avg<I, S>(self, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aggregate(AggregateFunc::Avg, names)
    }

    /// Append `COUNT(field) as field` for each field.
    pub fn count<I, S>(self, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aggregate(AggregateFunc::Count, names)
    }

    /// Append `MIN(field) as field` for each field.
    pub fn min<I, S>(self, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aggregate(AggregateFunc::Min, names)
    }

    /// Append `MAX(field) as field` for each field.
    pub fn max<I, S>(self, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.aggregate(AggregateFunc::Max, names)
    }

    /// Append one aggregate per field using `func`.
    ///
    /// Fails with [`QueryError::EmptyAggregationField`] when `names` is empty.
    pub fn aggregate<I, S>(mut self, func: AggregateFunc, names: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = self.aggregates.len();
        self.aggregates.extend(
            names
                .into_iter()
                .map(|n| Aggregate::new(func, n.as_ref())),
        );
        if self.aggregates.len() == start {
            return Err(QueryError::EmptyAggregationField);
        }
        tracing::trace!(
            func = %func,
            added = self.aggregates.len() - start,
            "aggregate fields appended"
        );
        Ok(self)
    }

    /// Reserved for subquery support. Currently a passthrough.
    pub fn subquery(self) -> Self {
        self
    }

    /// Reserved for optional parameters. Currently a passthrough.
    pub fn optional_param(self) -> Self {
        self
    }

    /// Drop all accumulated state, as if freshly created.
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Render the accumulated state as SQL. Does not mutate the builder.
    pub fn build(&self) -> String {
        let sql = self.to_sql();
        tracing::debug!(%sql, "query built");
        sql
    }

    pub fn has_select(&self) -> bool {
        self.select
    }

    pub fn plain_fields(&self) -> &[String] {
        &self.fields
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn aggregates(&self) -> &[Aggregate] {
        &self.aggregates
    }

    /// Fields that end up in `GROUP BY`: the plain fields, once any aggregate exists.
    pub fn group_by(&self) -> &[String] {
        if self.aggregates.is_empty() {
            &[]
        } else {
            &self.fields
        }
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_is_empty() {
        let q = QueryBuilder::new();
        assert!(!q.has_select());
        assert!(q.plain_fields().is_empty());
        assert_eq!(q.table(), "");
        assert!(q.aggregates().is_empty());
    }

    #[test]
    fn test_select_twice_fails() {
        let err = QueryBuilder::new().select().unwrap().select().unwrap_err();
        assert!(matches!(err, QueryError::DuplicateSelect));
    }

    #[test]
    fn test_fields_append_in_order() {
        let q = QueryBuilder::new().fields(["a", "b"]).fields(["a", "t.c as d"]);
        assert_eq!(q.plain_fields(), ["a", "b", "a", "t.c as d"]);
    }

    #[test]
    fn test_fields_accepts_owned_strings() {
        let names = vec!["x".to_string(), "y".to_string()];
        let q = QueryBuilder::new().fields(&names);
        assert_eq!(q.plain_fields(), ["x", "y"]);
    }

    #[test]
    fn test_from_last_write_wins() {
        let q = QueryBuilder::new().from("first").from("second");
        assert_eq!(q.table(), "second");
    }

    #[test]
    fn test_empty_aggregate_fails() {
        for func in AggregateFunc::ALL {
            let err = QueryBuilder::new()
                .aggregate(func, Vec::<&str>::new())
                .unwrap_err();
            assert!(matches!(err, QueryError::EmptyAggregationField));
        }
        assert!(QueryBuilder::new().sum([""; 0]).is_err());
        assert!(QueryBuilder::new().max(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_aggregates_keep_call_order() {
        let q = QueryBuilder::new()
            .max(["m"])
            .unwrap()
            .count(["c1", "c2"])
            .unwrap();
        assert_eq!(
            q.aggregates(),
            [
                Aggregate::new(AggregateFunc::Max, "m"),
                Aggregate::new(AggregateFunc::Count, "c1"),
                Aggregate::new(AggregateFunc::Count, "c2"),
            ]
        );
    }

    #[test]
    fn test_group_by_follows_plain_fields() {
        let q = QueryBuilder::new().fields(["a"]);
        assert!(q.group_by().is_empty());
        let q = q.avg(["b"]).unwrap().fields(["c"]);
        assert_eq!(q.group_by(), ["a", "c"]);
    }

    #[test]
    fn test_reset_allows_second_select() {
        let q = QueryBuilder::new()
            .select()
            .unwrap()
            .fields(["a"])
            .from("t")
            .reset();
        assert_eq!(q, QueryBuilder::new());
        assert!(q.select().is_ok());
    }

    #[test]
    fn test_stubs_are_passthrough() {
        let q = QueryBuilder::new().select().unwrap().from("t");
        assert_eq!(q.clone().subquery().optional_param(), q);
    }

    #[test]
    fn test_display_matches_build() {
        let q = QueryBuilder::new().select().unwrap().from("t");
        assert_eq!(q.to_string(), q.build());
    }
}
