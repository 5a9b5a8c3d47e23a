//! # SQL Query Shape Library
//!
//! Extracts a queryable description of SQL SELECT statements from the
//! [`sqlparser`] AST: referenced tables and aliases, projected columns, join
//! comparisons, filter predicates and nested derived tables.
//!
//! # Modules
//!
//! - [`query`] - Parsing, the extraction walk and the query model
//! - [`config`] - Extraction limits and driver settings
//! - [`error`] - Extraction and application error types
//! - [`cache`] - Extraction cache keyed by SQL text and settings
//! - [`output`] - Text, JSON and YAML rendering for the CLI
//! - [`app`] / [`cli`] - Command-line driver

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod query;
