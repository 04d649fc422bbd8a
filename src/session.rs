//! Command-driven builder session.
//!
//! A [`Session`] owns at most one [`QueryBuilder`] and replays parsed commands
//! against it. This is what the CLI and the REPL run on.

use crate::ast::{self, AggregateFunc};
use crate::builder::QueryBuilder;
use crate::error::{QueryError, QueryResult};
use crate::parser::{is_blank_or_comment, parse_command};
use crate::transpiler::ToSql;

/// One builder step, as parsed from a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a fresh builder.
    New,
    Reset,
    Select,
    Fields(Vec<String>),
    Aggregate(AggregateFunc, Vec<String>),
    From(String),
    SubQuery,
    OptionalParam,
    /// Render a standalone CAST expression.
    Cast { field: String, target_type: String },
    /// Render the current query.
    Build,
    /// Dump the builder state as JSON.
    Show,
}

impl Command {
    /// Apply a chain step to `builder`.
    ///
    /// Commands that do not mutate the builder return it untouched.
    pub fn apply(self, builder: QueryBuilder) -> QueryResult<QueryBuilder> {
        match self {
            Command::Reset => Ok(builder.reset()),
            Command::Select => builder.select(),
            Command::Fields(names) => Ok(builder.fields(names)),
            Command::Aggregate(func, names) => builder.aggregate(func, names),
            Command::From(table) => Ok(builder.from(table)),
            Command::SubQuery => Ok(builder.subquery()),
            Command::OptionalParam => Ok(builder.optional_param()),
            Command::New | Command::Cast { .. } | Command::Build | Command::Show => Ok(builder),
        }
    }
}

/// Holds the builder currently under construction, if any.
#[derive(Debug, Default)]
pub struct Session {
    builder: Option<QueryBuilder>,
}

impl Session {
    /// Start a session with a fresh builder.
    pub fn new() -> Self {
        Self {
            builder: Some(QueryBuilder::new()),
        }
    }

    /// Start a session with no builder; every command but `new` and `cast` fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder(&self) -> Option<&QueryBuilder> {
        self.builder.as_ref()
    }

    /// Execute one command and return its printable output, if any.
    ///
    /// A failing step aborts the current construction: the builder is dropped
    /// and later commands fail with [`QueryError::InvalidBuilder`] until `new`.
    pub fn execute(&mut self, cmd: Command) -> QueryResult<Option<String>> {
        tracing::debug!(?cmd, "executing command");

        match cmd {
            Command::New => {
                self.builder = Some(QueryBuilder::new());
                Ok(None)
            }
            Command::Cast { field, target_type } => Ok(Some(ast::cast(field, target_type).to_sql())),
            Command::Build => self.current().map(|b| Some(b.build())),
            Command::Show => {
                let builder = self.current()?;
                Ok(Some(serde_json::to_string_pretty(builder)?))
            }
            step => {
                let builder = self.builder.take().ok_or(QueryError::InvalidBuilder)?;
                self.builder = Some(step.apply(builder)?);
                Ok(None)
            }
        }
    }

    /// Parse and execute one line. Blank and comment lines are skipped.
    pub fn execute_line(&mut self, line: &str) -> QueryResult<Option<String>> {
        if is_blank_or_comment(line) {
            return Ok(None);
        }
        self.execute(parse_command(line)?)
    }

    /// Execute every line of a script, collecting outputs in order.
    ///
    /// Stops at the first error, wrapped with its 1-based line.
    pub fn run_script(&mut self, script: &str) -> QueryResult<Vec<String>> {
        let mut outputs = Vec::new();
        for (i, line) in script.lines().enumerate() {
            let output = self.execute_line(line).map_err(|e| e.at_line(i + 1))?;
            outputs.extend(output);
        }
        Ok(outputs)
    }

    fn current(&self) -> QueryResult<&QueryBuilder> {
        self.builder.as_ref().ok_or(QueryError::InvalidBuilder)
    }
}
