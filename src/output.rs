use std::{fmt::Write, str::FromStr};

use colored::Colorize;
use serde::Deserialize;

use crate::query::{Query, StatementKind};

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!("Unknown output format '{}'", other))
        }
    }
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true
        }
    }
}

/// Format extracted queries based on output options
pub fn format_queries(queries: &[Query], opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(queries).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(queries).unwrap_or_default(),
        OutputFormat::Text => format_text(queries, opts)
    }
}

fn format_text(queries: &[Query], opts: &OutputOptions) -> String {
    let mut out = String::new();
    for (i, query) in queries.iter().enumerate() {
        let header = format!("Query #{} ({}):", i + 1, query.kind);
        if opts.colored {
            out.push_str(&header.cyan().bold().to_string());
        } else {
            out.push_str(&header);
        }
        out.push('\n');
        if query.kind == StatementKind::Select {
            write_query_body(&mut out, query, 1, opts);
        }
        out.push('\n');
    }
    out
}

fn write_query_body(out: &mut String, query: &Query, level: usize, opts: &OutputOptions) {
    let pad = "  ".repeat(level);
    let table = &query.table;

    let _ = writeln!(out, "{}Table: {}", pad, table.name);
    if !table.names.is_empty() {
        let names: Vec<&str> = table.names.iter().map(|s| s.as_str()).collect();
        let _ = writeln!(out, "{}Other tables: {}", pad, names.join(", "));
    }
    if !table.aliases.is_empty() {
        let aliases: Vec<String> = table
            .aliases
            .iter()
            .map(|(alias, name)| format!("{} -> {}", alias, name))
            .collect();
        let _ = writeln!(out, "{}Aliases: {}", pad, aliases.join(", "));
    }
    if !table.single_alias.is_empty() {
        let _ = writeln!(out, "{}Alias: {}", pad, table.single_alias);
    }
    if !table.columns.is_empty() {
        let _ = writeln!(out, "{}Columns:", pad);
        for (bucket, columns) in &table.columns {
            let cols: Vec<&str> = columns.iter().map(|s| s.as_str()).collect();
            let _ = writeln!(out, "{}  {}: {}", pad, bucket, cols.join(", "));
        }
    }
    for cmp in &table.join.comparisons {
        let _ = writeln!(out, "{}Join: {} {} {}", pad, cmp.left, cmp.operator, cmp.right);
    }
    for pred in &query.wheres {
        let column = if pred.table.is_empty() {
            pred.column.to_string()
        } else {
            format!("{}.{}", pred.table, pred.column)
        };
        let _ = writeln!(out, "{}Where: {} {}", pad, column, pred.operator);
    }
    for (i, sub) in query.subqueries.iter().enumerate() {
        let header = format!("{}Subquery #{}:", pad, i + 1);
        if opts.colored {
            out.push_str(&header.yellow().to_string());
        } else {
            out.push_str(&header);
        }
        out.push('\n');
        write_query_body(out, sub, level + 1, opts);
    }
}
