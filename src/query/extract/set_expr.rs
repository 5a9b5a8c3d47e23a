use sqlparser::ast::{Select, SetExpr, Statement};
use tracing::debug;

use super::{
    ExtractionContext, expr::node_kind, predicate::extract_predicates,
    projection::collect_select_item, table::resolve_from_item
};
use crate::{
    config::ExtractConfig,
    error::{ExtractError, ExtractResult},
    query::types::{Query, StatementKind}
};

const QUERY_BODY: &str = "query body";

/// Extract the shape of one parsed statement.
///
/// SELECT queries are walked in full. INSERT, UPDATE and DELETE succeed with
/// an empty model of their kind, as does any other statement (kind
/// [`StatementKind::Other`]).
///
/// # Errors
///
/// Fails when the SELECT, or any derived table below it, holds a construct
/// that is not modeled in its position, or nests deeper than
/// [`ExtractConfig::max_depth`].
pub fn extract_statement(stmt: &Statement, config: &ExtractConfig) -> ExtractResult<Query> {
    match stmt {
        Statement::Query(query) => {
            let mut q = Query::new(StatementKind::Select);
            let mut ctx = ExtractionContext::new(&mut q, config);
            extract_from_query(query, &mut ctx)?;
            Ok(q)
        }
        Statement::Insert(_) => Ok(Query::new(StatementKind::Insert)),
        Statement::Update {
            ..
        } => Ok(Query::new(StatementKind::Update)),
        Statement::Delete(_) => Ok(Query::new(StatementKind::Delete)),
        other => {
            debug!(kind = %node_kind(other), "statement kind is not modeled");
            Ok(Query::new(StatementKind::Other))
        }
    }
}

pub fn extract_from_query(
    query: &sqlparser::ast::Query,
    ctx: &mut ExtractionContext<'_>
) -> ExtractResult<()> {
    extract_from_set_expr(&query.body, ctx)
}

fn extract_from_set_expr(set_expr: &SetExpr, ctx: &mut ExtractionContext<'_>) -> ExtractResult<()> {
    match set_expr {
        SetExpr::Select(select) => extract_from_select(select, ctx),
        SetExpr::Query(query) => ctx.nest(|ctx| extract_from_query(query, ctx)),
        other => Err(ExtractError::unsupported(QUERY_BODY, node_kind(other)))
    }
}

/// FROM first, so the projection and filters see every table and alias
fn extract_from_select(select: &Select, ctx: &mut ExtractionContext<'_>) -> ExtractResult<()> {
    for item in &select.from {
        resolve_from_item(item, ctx)?;
    }
    for item in &select.projection {
        collect_select_item(item, &mut ctx.query.table);
    }
    if let Some(selection) = &select.selection {
        extract_predicates(selection, ctx)?;
    }
    Ok(())
}
