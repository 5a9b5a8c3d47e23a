//! # SQL Query Shape
//!
//! Command-line driver over the `sql_query_shape` extraction library.
//!
//! Reads a SQL script, extracts the shape of every statement (tables,
//! aliases, projected columns, join comparisons, filter predicates and
//! derived tables) and prints it as text, JSON or YAML.
//!
//! # Quick Start
//!
//! ```bash
//! # Human-readable summary
//! sql-query-shape extract -q queries.sql
//!
//! # Machine-readable output for further tooling
//! sql-query-shape extract -q queries.sql -f json > shape.json
//!
//! # Stream queries from stdin
//! echo "SELECT * FROM users" | sql-query-shape extract -q -
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded from (in order of precedence):
//!
//! 1. Command-line arguments
//! 2. Environment variables (`SQL_SHAPE_DIALECT`, `SQL_SHAPE_MAX_DEPTH`,
//!    `SQL_SHAPE_FORMAT`)
//! 3. `.sql-query-shape.toml` in current directory
//! 4. `~/.config/sql-query-shape/config.toml`
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` selects the filter
//! (default `warn`); `--verbose` switches to `debug`.
//!
//! # Exit Codes
//!
//! - `0` - Every statement was extracted
//! - `1` - Input could not be read, parsed or extracted

use std::process;

use clap::Parser;
use sql_query_shape::{
    app::{ExtractParams, run_extract},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            queries,
            dialect,
            output_format,
            max_depth,
            resolve_parenthesized_from,
            verbose,
            no_color
        } => {
            init_tracing(verbose);
            let config = Config::load()?;

            let params = ExtractParams {
                queries_path: queries.display().to_string(),
                dialect,
                output_format,
                max_depth,
                resolve_parenthesized_from,
                no_color
            };
            let output = run_extract(params, config)?;
            println!("{}", output);
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
