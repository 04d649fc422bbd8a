//! SQL rendering for builder state.
//!
//! Converts accumulated builder state into a SQL string.

use crate::ast::{Aggregate, Cast};
use crate::builder::QueryBuilder;

/// Trait for converting nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Aggregate {
    fn to_sql(&self) -> String {
        format!("{}({}) as {}", self.func, self.field, self.field)
    }
}

impl ToSql for Cast {
    fn to_sql(&self) -> String {
        format!(
            "CAST( {} as {} ) as {}",
            self.field, self.target_type, self.field
        )
    }
}

impl ToSql for QueryBuilder {
    fn to_sql(&self) -> String {
        let plain = self.fields.join(",");

        let mut fields = if self.fields.is_empty() {
            "*".to_string()
        } else {
            plain.clone()
        };

        // Plain fields become the GROUP BY key as soon as anything is aggregated,
        // even when there are none
        let mut group_by = String::new();
        if !self.aggregates.is_empty() {
            let aggregates: Vec<String> = self.aggregates.iter().map(|a| a.to_sql()).collect();
            let aggregates = aggregates.join(",");

            group_by = format!("GROUP BY {}", plain);
            fields = format!("{},{}", fields, aggregates);
        }

        let select = if self.select { "SELECT" } else { "" };

        let segments = [select, fields.as_str(), "FROM", self.table.as_str(), group_by.as_str()];
        segments
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<&str>>()
            .join(" ")
            .trim()
            .to_string()
    }
}
