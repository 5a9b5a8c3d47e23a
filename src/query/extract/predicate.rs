use sqlparser::ast::{BinaryOperator, Expr};
use tracing::trace;

use super::{
    ExtractionContext,
    expr::{ColumnRef, chain_operands, comparison_operator, node_kind}
};
use crate::{
    error::{ExtractError, ExtractResult},
    query::types::Where
};

const WHERE_CLAUSE: &str = "WHERE clause";

/// Flatten a WHERE expression into [`Where`] predicates.
///
/// AND and OR both contribute their operands to the same list; grouping and
/// literal operands are dropped. A flat chain is walked at one depth level,
/// only parentheses and right-nested chains go deeper.
pub fn extract_predicates(expr: &Expr, ctx: &mut ExtractionContext<'_>) -> ExtractResult<()> {
    match expr {
        Expr::Value(_) => Ok(()),
        Expr::BinaryOp {
            op: BinaryOperator::And | BinaryOperator::Or,
            ..
        } => {
            for operand in chain_operands(expr, is_junction) {
                if is_junction_expr(operand) {
                    ctx.nest(|ctx| extract_predicates(operand, ctx))?;
                } else {
                    extract_predicates(operand, ctx)?;
                }
            }
            Ok(())
        }
        Expr::Nested(inner) => ctx.nest(|ctx| extract_predicates(inner, ctx)),
        Expr::BinaryOp {
            left, op, ..
        } => match comparison_operator(op) {
            Some(operator) => push_predicate(left, operator, ctx),
            None => Err(ExtractError::unsupported(WHERE_CLAUSE, op.to_string()))
        },
        Expr::Between {
            expr, negated, ..
        } => push_predicate(expr, negate(*negated, "between"), ctx),
        Expr::Like {
            expr, negated, ..
        } => push_predicate(expr, negate(*negated, "like"), ctx),
        Expr::ILike {
            expr, negated, ..
        } => push_predicate(expr, negate(*negated, "ilike"), ctx),
        Expr::RLike {
            expr, negated, ..
        } => push_predicate(expr, negate(*negated, "regexp"), ctx),
        Expr::InList {
            expr, negated, ..
        }
        | Expr::InSubquery {
            expr, negated, ..
        } => push_predicate(expr, negate(*negated, "in"), ctx),
        other => Err(ExtractError::unsupported(WHERE_CLAUSE, node_kind(other)))
    }
}

fn is_junction(op: &BinaryOperator) -> bool {
    matches!(op, BinaryOperator::And | BinaryOperator::Or)
}

fn is_junction_expr(expr: &Expr) -> bool {
    matches!(expr, Expr::BinaryOp { op, .. } if is_junction(op))
}

fn negate(negated: bool, operator: &'static str) -> &'static str {
    if !negated {
        return operator;
    }
    match operator {
        "between" => "not between",
        "like" => "not like",
        "ilike" => "not ilike",
        "regexp" => "not regexp",
        "in" => "not in",
        other => other
    }
}

fn push_predicate(
    operand: &Expr,
    operator: &str,
    ctx: &mut ExtractionContext<'_>
) -> ExtractResult<()> {
    let column = ColumnRef::from_expr(operand, WHERE_CLAUSE)?;
    trace!(%column, operator, "filter predicate");
    ctx.query.wheres.push(Where::new(
        column.qualifier.unwrap_or_default(),
        column.column,
        operator
    ));
    Ok(())
}
