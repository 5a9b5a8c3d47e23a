//! Application logic for the SQL Query Shape CLI.
//!
//! This module contains the driver logic separated from the main entry point
//! to enable testing. The extraction core lives in [`crate::query`]; this layer
//! only resolves settings, reads input and formats output.

use std::{
    fs::read_to_string,
    io::{self, Read}
};

use tracing::debug;

use crate::{
    cache::{cache_queries, get_cached},
    cli::{Dialect, Format},
    config::{Config, ExtractConfig},
    error::{AppResult, file_read_error},
    output::{OutputFormat, OutputOptions, format_queries},
    query::{Query, SqlDialect, extract_queries}
};

/// Parameters for the extract command
#[derive(Debug, Clone)]
pub struct ExtractParams {
    /// Path to queries file or "-" for stdin input
    pub queries_path:               String,
    pub dialect:                    Option<Dialect>,
    pub output_format:              Option<Format>,
    pub max_depth:                  Option<usize>,
    pub resolve_parenthesized_from: bool,
    pub no_color:                   bool
}

/// Settings after merging command-line flags over the loaded config
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    pub dialect: SqlDialect,
    pub extract: ExtractConfig,
    pub output:  OutputOptions
}

/// Convert CLI dialect to internal SqlDialect
pub fn convert_dialect(dialect: Dialect) -> SqlDialect {
    match dialect {
        Dialect::Generic => SqlDialect::Generic,
        Dialect::Mysql => SqlDialect::MySQL,
        Dialect::Postgresql => SqlDialect::PostgreSQL,
        Dialect::Sqlite => SqlDialect::SQLite,
        Dialect::Clickhouse => SqlDialect::ClickHouse
    }
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Command-line flags win over config file and environment values
pub fn effective_settings(params: &ExtractParams, config: Config) -> EffectiveSettings {
    let mut extract = config.extract;
    if let Some(depth) = params.max_depth {
        extract.max_depth = depth;
    }
    if params.resolve_parenthesized_from {
        extract.resolve_parenthesized_from = true;
    }

    EffectiveSettings {
        dialect: params
            .dialect
            .clone()
            .map(convert_dialect)
            .unwrap_or(config.dialect),
        extract,
        output: OutputOptions {
            format:  params
                .output_format
                .clone()
                .map(convert_format)
                .unwrap_or(config.output.format),
            colored: config.output.colored && !params.no_color
        }
    }
}

/// Read queries from file or stdin
pub fn read_queries_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Extract queries with caching
pub fn extract_queries_cached(
    sql: &str,
    dialect: SqlDialect,
    config: &ExtractConfig
) -> AppResult<Vec<Query>> {
    if let Some(cached) = get_cached(sql, dialect, config) {
        debug!("extraction cache hit");
        return Ok(cached);
    }
    let queries = extract_queries(sql, dialect, config)?;
    cache_queries(sql, dialect, config, queries.clone());
    Ok(queries)
}

/// Run the extract command and return the formatted output
pub fn run_extract(params: ExtractParams, config: Config) -> AppResult<String> {
    let settings = effective_settings(&params, config);
    debug!(?settings, "effective settings");
    let sql = read_queries_input(&params.queries_path)?;
    let queries = extract_queries_cached(&sql, settings.dialect, &settings.extract)?;
    Ok(format_queries(&queries, &settings.output))
}
