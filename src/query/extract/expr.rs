use std::fmt::{self, Write};

use compact_str::CompactString;
use sqlparser::ast::{BinaryOperator, Expr, ObjectName, ObjectNamePart};

use crate::error::{ExtractError, ExtractResult};

/// Column operand of a comparison or projection item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub qualifier: Option<CompactString>,
    pub column:    CompactString
}

impl ColumnRef {
    /// Read `expr` as a column, qualified or not
    pub fn from_expr(expr: &Expr, position: &'static str) -> ExtractResult<Self> {
        match expr {
            Expr::Identifier(ident) => Ok(Self {
                qualifier: None,
                column:    ident.value.as_str().into()
            }),
            Expr::CompoundIdentifier(idents) => match idents.as_slice() {
                [.., table, column] => Ok(Self {
                    qualifier: Some(table.value.as_str().into()),
                    column:    column.value.as_str().into()
                }),
                [column] => Ok(Self {
                    qualifier: None,
                    column:    column.value.as_str().into()
                }),
                [] => Err(ExtractError::malformed(position, "empty identifier"))
            },
            other => Err(ExtractError::malformed(position, node_kind(other)))
        }
    }

    /// Read `expr` as a `table.column` reference
    pub fn qualified(expr: &Expr, position: &'static str) -> ExtractResult<Self> {
        let column = Self::from_expr(expr, position)?;
        if column.qualifier.is_none() {
            return Err(ExtractError::malformed(
                position,
                format!("unqualified column '{}'", column.column)
            ));
        }
        Ok(column)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}.{}", qualifier, self.column),
            None => write!(f, "{}", self.column)
        }
    }
}

/// Operator text for comparison-class binary operators
pub fn comparison_operator(op: &BinaryOperator) -> Option<&'static str> {
    match op {
        BinaryOperator::Eq => Some("="),
        BinaryOperator::NotEq => Some("!="),
        BinaryOperator::Lt => Some("<"),
        BinaryOperator::LtEq => Some("<="),
        BinaryOperator::Gt => Some(">"),
        BinaryOperator::GtEq => Some(">="),
        BinaryOperator::Spaceship => Some("<=>"),
        _ => None
    }
}

/// Last identifier of a possibly schema-qualified name, unquoted
pub fn object_name_tail(name: &ObjectName) -> CompactString {
    match name.0.last().and_then(ObjectNamePart::as_ident) {
        Some(ident) => ident.value.as_str().into(),
        None => name.to_string().into()
    }
}

/// Operands of a left-deep chain of `is_link` operators, left to right.
///
/// Only the left spine is unrolled; a right operand that is itself a chain is
/// returned whole and counts as one nesting level for the caller.
pub fn chain_operands<'e>(
    expr: &'e Expr,
    is_link: impl Fn(&BinaryOperator) -> bool
) -> Vec<&'e Expr> {
    let mut operands = Vec::new();
    let mut current = expr;
    while let Expr::BinaryOp {
        left,
        op,
        right
    } = current
        && is_link(op)
    {
        operands.push(right.as_ref());
        current = left.as_ref();
    }
    operands.push(current);
    operands.reverse();
    operands
}

/// Variant name of an AST node, for diagnostics
pub fn node_kind(node: &impl fmt::Debug) -> String {
    let mut name = VariantName::default();
    // Formatting is cut short once the name is complete
    let _ = write!(name, "{:?}", node);
    name.0
}

/// Keeps the leading identifier of `Debug` output and aborts the rest
#[derive(Default)]
struct VariantName(String);

impl fmt::Write for VariantName {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match s.find(|c: char| !(c.is_alphanumeric() || c == '_')) {
            Some(end) => {
                self.0.push_str(&s[..end]);
                Err(fmt::Error)
            }
            None => {
                self.0.push_str(s);
                Ok(())
            }
        }
    }
}
