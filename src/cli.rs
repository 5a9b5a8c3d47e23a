use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Query Shape - extract tables, columns, joins and filters from SQL
#[derive(Parser, Debug)]
#[command(name = "sql-query-shape")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the shape of every statement in a SQL file
    Extract {
        /// Path to SQL queries file (use - for stdin)
        #[arg(short, long)]
        queries: PathBuf,

        /// SQL dialect for parsing
        #[arg(long, value_enum)]
        dialect: Option<Dialect>,

        /// Output format
        #[arg(short = 'f', long, value_enum)]
        output_format: Option<Format>,

        /// Maximum nesting of joins, boolean trees and subqueries
        #[arg(long)]
        max_depth: Option<usize>,

        /// Resolve tables inside parenthesized FROM items
        #[arg(long)]
        resolve_parenthesized_from: bool,

        /// Enable debug logging on stderr
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Dialect {
    Generic,
    Mysql,
    Postgresql,
    Sqlite,
    Clickhouse
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}
