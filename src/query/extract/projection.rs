use compact_str::CompactString;
use sqlparser::ast::{Expr, SelectItem, SelectItemQualifiedWildcardKind};
use tracing::debug;

use super::expr::{ColumnRef, node_kind, object_name_tail};
use crate::query::types::{FUNCTION_COLUMNS, Table, WILDCARD};

const SELECT_LIST: &str = "SELECT list";

/// Record one SELECT-list item in `table.columns`.
///
/// Shapes other than wildcards, plain columns and function calls are skipped.
pub fn collect_select_item(item: &SelectItem, table: &mut Table) {
    match item {
        SelectItem::Wildcard(_) => {
            let bucket = table.name.clone();
            table.add_column(&bucket, WILDCARD);
        }
        SelectItem::QualifiedWildcard(SelectItemQualifiedWildcardKind::ObjectName(name), _) => {
            let bucket = table.resolve(&object_name_tail(name));
            table.add_column(&bucket, WILDCARD);
        }
        SelectItem::QualifiedWildcard(SelectItemQualifiedWildcardKind::Expr(expr), _) => {
            debug!(kind = %node_kind(expr), "wildcard over expression not modeled");
        }
        SelectItem::UnnamedExpr(expr) => collect_expr(expr, None, table),
        SelectItem::ExprWithAlias {
            expr,
            alias
        } => collect_expr(expr, Some(alias.value.as_str()), table)
    }
}

fn collect_expr(expr: &Expr, alias: Option<&str>, table: &mut Table) {
    match expr {
        Expr::Identifier(_) | Expr::CompoundIdentifier(_) => {
            let Ok(column) = ColumnRef::from_expr(expr, SELECT_LIST) else {
                return;
            };
            let bucket = match &column.qualifier {
                Some(qualifier) => table.resolve(qualifier),
                None => table.name.clone()
            };
            table.add_column(&bucket, alias.unwrap_or(column.column.as_str()));
        }
        Expr::Function(func) => {
            let name: CompactString = match alias {
                Some(alias) => alias.into(),
                None => func.name.to_string().into()
            };
            table.add_column(FUNCTION_COLUMNS, &name);
        }
        other => debug!(kind = %node_kind(other), "projection item not modeled")
    }
}
