pub use masterror::{AppError, AppResult};
use thiserror::Error;

/// Result of query shape extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Failure of a single extraction. Extraction is all-or-nothing: any of these
/// aborts the whole statement, nested subqueries included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The SQL front-end rejected the text; message is passed through as-is
    #[error("{0}")]
    Syntax(String),

    #[error("unsupported {kind} in {position}")]
    UnsupportedExpression {
        position: &'static str,
        kind:     String
    },

    #[error("expected a column reference in {position}, found {kind}")]
    MalformedOperand {
        position: &'static str,
        kind:     String
    },

    #[error("query nesting exceeds the limit of {limit}")]
    TooDeeplyNested { limit: usize },

    #[error("expected exactly one statement, found {0}")]
    StatementCount(usize)
}

impl ExtractError {
    pub(crate) fn unsupported(position: &'static str, kind: impl Into<String>) -> Self {
        Self::UnsupportedExpression {
            position,
            kind: kind.into()
        }
    }

    pub(crate) fn malformed(position: &'static str, kind: impl Into<String>) -> Self {
        Self::MalformedOperand {
            position,
            kind: kind.into()
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Syntax(message) => query_parse_error(message),
            other => AppError::bad_request(format!("Extraction error: {}", other))
        }
    }
}

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create query parse error with optional position info
pub fn query_parse_error(message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_sql_error("Query parse error", &msg))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Format SQL error with position highlighting
fn format_sql_error(prefix: &str, message: &str) -> String {
    // sqlparser format: "... at Line: X, Column Y"
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let col_marker = ", Column ";

    let line_start = message.find(line_marker)? + line_marker.len();
    let col_offset = message[line_start..].find(col_marker)?;
    let line_str = &message[line_start..line_start + col_offset];

    let col_start = line_start + col_offset + col_marker.len();
    let col_len = message[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(message.len() - col_start);
    let col_str = &message[col_start..col_start + col_len];

    match (line_str.parse(), col_str.parse()) {
        (Ok(line), Ok(column)) => Some(SqlPosition { line, column }),
        _ => None
    }
}
