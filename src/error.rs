//! Error types for aggq.

use thiserror::Error;

/// The main error type for query construction.
#[derive(Debug, Error)]
pub enum QueryError {
    /// `select()` was called while the SELECT clause was already set.
    #[error("cannot call select clause twice in a row")]
    DuplicateSelect,

    /// An aggregate method was called without any field.
    #[error("cannot make an aggregate operation with empty fields")]
    EmptyAggregationField,

    /// A command was applied while no builder was active.
    #[error("invalid aggregator query builder")]
    InvalidBuilder,

    /// Failed to parse a builder command line.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// A script line failed.
    #[error("line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: Box<QueryError>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Attach the 1-based script line to an error.
    pub fn at_line(self, line: usize) -> Self {
        Self::Script {
            line,
            source: Box::new(self),
        }
    }

    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for query construction.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "Parse error at position 5: unexpected character"
        );
    }

    #[test]
    fn test_script_error_display() {
        let err = QueryError::parse(0, "unknown command").at_line(2);
        assert_eq!(
            err.to_string(),
            "line 2: Parse error at position 0: unknown command"
        );
    }

    #[test]
    fn test_usage_error_messages() {
        assert_eq!(
            QueryError::DuplicateSelect.to_string(),
            "cannot call select clause twice in a row"
        );
        assert_eq!(
            QueryError::EmptyAggregationField.to_string(),
            "cannot make an aggregate operation with empty fields"
        );
        assert_eq!(
            QueryError::InvalidBuilder.to_string(),
            "invalid aggregator query builder"
        );
    }
}
