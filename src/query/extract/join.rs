use sqlparser::ast::{BinaryOperator, Expr, JoinConstraint, JoinOperator, TableWithJoins};
use tracing::{debug, trace};

use super::{
    ExtractionContext,
    expr::{ColumnRef, chain_operands, comparison_operator, node_kind},
    table::{TablePosition, resolve_table_factor}
};
use crate::{
    error::{ExtractError, ExtractResult},
    query::types::Comparison
};

const ON_CONDITION: &str = "join condition";
const JOIN_SIDE: &str = "join side";

/// Resolve a join tree.
///
/// sqlparser keeps `a JOIN b ON .. JOIN c ON ..` as a leftmost relation plus a
/// list of joins, which is the left-deep tree flattened: the left side is
/// resolved first, then each right side followed by its ON condition.
pub fn analyze_join(item: &TableWithJoins, ctx: &mut ExtractionContext<'_>) -> ExtractResult<()> {
    resolve_table_factor(&item.relation, TablePosition::JoinSide, ctx)?;
    for join in &item.joins {
        resolve_table_factor(&join.relation, TablePosition::JoinSide, ctx)?;
        match join_constraint(&join.join_operator)? {
            JoinConstraint::On(expr) => resolve_on_condition(expr, ctx)?,
            JoinConstraint::Using(_) | JoinConstraint::Natural | JoinConstraint::None => {
                debug!("join without ON condition contributes no comparisons")
            }
        }
    }
    Ok(())
}

fn join_constraint(op: &JoinOperator) -> ExtractResult<&JoinConstraint> {
    use JoinOperator::*;
    match op {
        Join(c) | Inner(c) | Left(c) | LeftOuter(c) | Right(c) | RightOuter(c) | FullOuter(c)
        | CrossJoin(c) | Semi(c) | LeftSemi(c) | RightSemi(c) | Anti(c) | LeftAnti(c)
        | RightAnti(c) | StraightJoin(c) => Ok(c),
        AsOf {
            constraint, ..
        } => Ok(constraint),
        other => Err(ExtractError::unsupported(JOIN_SIDE, node_kind(other)))
    }
}

/// Flatten an ON condition made of column comparisons joined by AND
fn resolve_on_condition(expr: &Expr, ctx: &mut ExtractionContext<'_>) -> ExtractResult<()> {
    match expr {
        Expr::BinaryOp {
            op: BinaryOperator::And,
            ..
        } => {
            for operand in chain_operands(expr, |op| *op == BinaryOperator::And) {
                if matches!(
                    operand,
                    Expr::BinaryOp {
                        op: BinaryOperator::And,
                        ..
                    }
                ) {
                    ctx.nest(|ctx| resolve_on_condition(operand, ctx))?;
                } else {
                    resolve_on_condition(operand, ctx)?;
                }
            }
            Ok(())
        }
        Expr::Nested(inner) => ctx.nest(|ctx| resolve_on_condition(inner, ctx)),
        Expr::BinaryOp {
            left,
            op,
            right
        } => match comparison_operator(op) {
            Some(operator) => {
                let left = ColumnRef::qualified(left, ON_CONDITION)?;
                let right = ColumnRef::qualified(right, ON_CONDITION)?;
                trace!(%left, %right, operator, "join comparison");
                ctx.query
                    .table
                    .join
                    .comparisons
                    .push(Comparison::new(left.to_string(), right.to_string(), operator));
                Ok(())
            }
            None => Err(ExtractError::unsupported(ON_CONDITION, op.to_string()))
        },
        other => Err(ExtractError::unsupported(ON_CONDITION, node_kind(other)))
    }
}
