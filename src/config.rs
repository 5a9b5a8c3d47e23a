//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. `.sql-query-shape.toml` in current directory
//! 4. `~/.config/sql-query-shape/config.toml`
//! 5. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! dialect = "postgresql"       # generic, mysql, postgresql, sqlite, clickhouse
//!
//! [extract]
//! max_depth = 64               # join/boolean/subquery nesting limit
//! resolve_parenthesized_from = false
//!
//! [output]
//! format = "json"              # text, json, yaml
//! colored = true
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_SHAPE_DIALECT` | SQL dialect name |
//! | `SQL_SHAPE_MAX_DEPTH` | Maximum nesting depth |
//! | `SQL_SHAPE_FORMAT` | Output format |

use std::{
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{AppResult, config_error},
    output::OutputFormat,
    query::SqlDialect
};

/// Default bound on join, boolean and subquery nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dialect: SqlDialect,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub output:  OutputConfig
}

/// Extraction limits and switches
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Maximum combined nesting of joins, boolean trees and subqueries
    pub max_depth:                  usize,
    /// Resolve the tables inside a parenthesized FROM item instead of
    /// skipping it
    pub resolve_parenthesized_from: bool
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_depth:                  DEFAULT_MAX_DEPTH,
            resolve_parenthesized_from: false
        }
    }
}

/// Output configuration for the command-line driver
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file in current directory (.sql-query-shape.toml)
    /// 3. Config file in home directory
    ///    (~/.config/sql-query-shape/config.toml)
    /// 4. Default values
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-query-shape")
                .join("config.toml");

            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-query-shape.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        config.apply_env()?;
        Ok(config)
    }

    /// Read a single TOML config file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| config_error(format!("Invalid config file: {}", e)))
    }

    /// Override with `SQL_SHAPE_*` environment variables
    pub fn apply_env(&mut self) -> AppResult<()> {
        if let Ok(dialect) = env::var("SQL_SHAPE_DIALECT") {
            self.dialect = dialect.parse().map_err(config_error)?;
        }

        if let Ok(depth) = env::var("SQL_SHAPE_MAX_DEPTH") {
            self.extract.max_depth = depth.parse().map_err(|_| {
                config_error(format!("Invalid SQL_SHAPE_MAX_DEPTH '{}'", depth))
            })?;
        }

        if let Ok(format) = env::var("SQL_SHAPE_FORMAT") {
            self.output.format = format.parse().map_err(config_error)?;
        }

        Ok(())
    }
}
