use sqlparser::ast::{ObjectName, TableAlias, TableFactor, TableWithJoins};
use tracing::{debug, trace};

use super::{
    ExtractionContext,
    expr::{node_kind, object_name_tail},
    join::analyze_join,
    set_expr::extract_from_query
};
use crate::{
    error::{ExtractError, ExtractResult},
    query::types::{Query, StatementKind}
};

/// Where a table factor sits in the FROM clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePosition {
    FromItem,
    JoinSide
}

impl TablePosition {
    fn as_str(self) -> &'static str {
        match self {
            Self::FromItem => "FROM item",
            Self::JoinSide => "join side"
        }
    }
}

/// Resolve one comma-separated FROM item
pub fn resolve_from_item(item: &TableWithJoins, ctx: &mut ExtractionContext<'_>) -> ExtractResult<()> {
    if item.joins.is_empty() {
        resolve_table_factor(&item.relation, TablePosition::FromItem, ctx)
    } else {
        analyze_join(item, ctx)
    }
}

pub fn resolve_table_factor(
    table_factor: &TableFactor,
    position: TablePosition,
    ctx: &mut ExtractionContext<'_>
) -> ExtractResult<()> {
    match table_factor {
        TableFactor::Table {
            name,
            alias,
            ..
        } => {
            register_table(name, alias.as_ref(), ctx.query);
            Ok(())
        }
        TableFactor::Derived {
            subquery,
            alias,
            ..
        } => extract_derived_table(subquery, alias.as_ref(), ctx),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            if position == TablePosition::JoinSide || ctx.config.resolve_parenthesized_from {
                ctx.nest(|ctx| analyze_join(table_with_joins, ctx))
            } else {
                debug!("parenthesized FROM item left unresolved");
                Ok(())
            }
        }
        other => Err(ExtractError::unsupported(position.as_str(), node_kind(other)))
    }
}

fn register_table(name: &ObjectName, alias: Option<&TableAlias>, query: &mut Query) {
    let table_name = object_name_tail(name);
    trace!(table = %table_name, "table reference");
    query.table.add_table(&table_name);
    if let Some(alias) = alias {
        trace!(alias = %alias.name.value, table = %table_name, "table alias");
        query.table.add_alias(&alias.name.value, &table_name);
    }
}

/// Extract a derived table into its own [`Query`] and attach it to the parent.
/// The alias names the nested query; the parent's alias map is untouched.
fn extract_derived_table(
    subquery: &sqlparser::ast::Query,
    alias: Option<&TableAlias>,
    ctx: &mut ExtractionContext<'_>
) -> ExtractResult<()> {
    let mut nested = ctx.nest(|ctx| {
        let mut nested = Query::new(StatementKind::Select);
        extract_from_query(subquery, &mut ctx.nested(&mut nested))?;
        Ok(nested)
    })?;
    if let Some(alias) = alias {
        nested.table.single_alias = alias.name.value.as_str().into();
    }
    ctx.query.subqueries.push(nested);
    Ok(())
}
