//! # aggq — Aggregation Query Builder
//!
//! > **Chain the clauses. Get the GROUP BY for free.**
//!
//! aggq assembles `SELECT` statements with SUM, AVG, COUNT, MIN and MAX
//! aggregates. Plain fields selected alongside aggregates become the
//! `GROUP BY` key automatically.
//!
//! ## Quick Example
//!
//! ```
//! use aggq::prelude::*;
//!
//! let sql = QueryBuilder::new()
//!     .select()?
//!     .fields(["region", "product"])
//!     .sum(["amount"])?
//!     .count(["id"])?
//!     .from("sales")
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT region,product,SUM(amount) as amount,COUNT(id) as id FROM sales GROUP BY region,product"
//! );
//! # Ok::<(), QueryError>(())
//! ```
//!
//! No escaping or validation happens: names are rendered verbatim.

pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod parser;
pub mod repl;
pub mod session;
pub mod transpiler;

pub use builder::QueryBuilder;
pub use error::{QueryError, QueryResult};

pub mod prelude {
    pub use crate::ast::{Aggregate, AggregateFunc, Cast, cast};
    pub use crate::builder::QueryBuilder;
    pub use crate::error::*;
    pub use crate::parser::parse_command;
    pub use crate::session::{Command, Session};
    pub use crate::transpiler::ToSql;
}
