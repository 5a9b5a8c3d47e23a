//! SQL parsing and query shape extraction.
//!
//! Text is handed to [`sqlparser`] and every resulting statement is walked by
//! [`extract_statement`], which records the tables, aliases, projection, join
//! comparisons, filter predicates and derived tables of a SELECT into a
//! [`Query`].
//!
//! # Example
//!
//! ```
//! use sql_query_shape::{
//!     config::ExtractConfig,
//!     query::{SqlDialect, extract_query}
//! };
//!
//! let sql = "SELECT id, name AS n FROM users u WHERE u.id = 1";
//! let query = extract_query(sql, SqlDialect::Generic, &ExtractConfig::default()).unwrap();
//!
//! assert_eq!(query.table.name, "users");
//! assert_eq!(query.table.single_alias, "u");
//! assert_eq!(query.table.columns_of("users"), ["id", "n"]);
//! assert_eq!(query.wheres[0].table, "u");
//! ```

mod extract;
mod types;

use std::str::FromStr;

pub use extract::extract_statement;
use rayon::prelude::*;
use serde::Deserialize;
use sqlparser::{
    ast::Statement,
    dialect::{
        ClickHouseDialect, Dialect, GenericDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect
    },
    parser::Parser
};
use tracing::debug;
pub use types::{
    ColumnVec, Comparison, FUNCTION_COLUMNS, Join, Query, StatementKind, Table, WILDCARD, Where
};

use crate::{
    config::ExtractConfig,
    error::{ExtractError, ExtractResult}
};

/// SQL dialect for parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum SqlDialect {
    #[default]
    Generic,
    MySQL,
    PostgreSQL,
    SQLite,
    ClickHouse
}

impl SqlDialect {
    /// Convert to sqlparser dialect for parsing
    pub fn into_parser_dialect(self) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect {}),
            Self::MySQL => Box::new(MySqlDialect {}),
            Self::PostgreSQL => Box::new(PostgreSqlDialect {}),
            Self::SQLite => Box::new(SQLiteDialect {}),
            Self::ClickHouse => Box::new(ClickHouseDialect {})
        }
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "mysql" => Ok(Self::MySQL),
            "postgresql" | "postgres" => Ok(Self::PostgreSQL),
            "sqlite" => Ok(Self::SQLite),
            "clickhouse" => Ok(Self::ClickHouse),
            other => Err(format!("Unknown SQL dialect '{}'", other))
        }
    }
}

/// Run the SQL front-end over `sql`
///
/// # Errors
///
/// [`ExtractError::Syntax`] with the parser message when the text is not
/// valid SQL for `dialect`.
pub fn parse_statements(sql: &str, dialect: SqlDialect) -> ExtractResult<Vec<Statement>> {
    let parser_dialect = dialect.into_parser_dialect();
    let statements = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|e| ExtractError::Syntax(e.to_string()))?;
    debug!(count = statements.len(), ?dialect, "parsed SQL script");
    Ok(statements)
}

/// Extract every statement of a script (parallel)
///
/// # Notes
///
/// - Statements are independent and extracted in parallel; the result keeps
///   script order
/// - The first failing statement fails the whole batch
pub fn extract_queries(
    sql: &str,
    dialect: SqlDialect,
    config: &ExtractConfig
) -> ExtractResult<Vec<Query>> {
    let statements = parse_statements(sql, dialect)?;
    statements
        .par_iter()
        .map(|stmt| extract_statement(stmt, config))
        .collect()
}

/// Extract a script that must hold exactly one statement
pub fn extract_query(sql: &str, dialect: SqlDialect, config: &ExtractConfig) -> ExtractResult<Query> {
    let statements = parse_statements(sql, dialect)?;
    match statements.as_slice() {
        [stmt] => extract_statement(stmt, config),
        other => Err(ExtractError::StatementCount(other.len()))
    }
}
