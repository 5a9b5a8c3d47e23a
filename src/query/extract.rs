mod expr;
mod join;
mod predicate;
mod projection;
mod set_expr;
mod table;

pub use set_expr::extract_statement;

use super::types::Query;
use crate::{
    config::ExtractConfig,
    error::{ExtractError, ExtractResult}
};

/// Accumulator threaded through one extraction.
///
/// Each derived table gets its own context over a fresh [`Query`]; only the
/// current nesting depth carries over so the limit spans subqueries too.
pub struct ExtractionContext<'a> {
    pub query:  &'a mut Query,
    pub config: &'a ExtractConfig,
    depth:      usize
}

impl<'a> ExtractionContext<'a> {
    pub fn new(query: &'a mut Query, config: &'a ExtractConfig) -> Self {
        Self {
            query,
            config,
            depth: 0
        }
    }

    /// Context for a nested query at the current depth
    pub fn nested<'b>(&self, query: &'b mut Query) -> ExtractionContext<'b>
    where
        'a: 'b
    {
        ExtractionContext {
            query,
            config: self.config,
            depth: self.depth
        }
    }

    /// Run `f` one nesting level deeper
    pub fn nest<T>(&mut self, f: impl FnOnce(&mut Self) -> ExtractResult<T>) -> ExtractResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(ExtractError::TooDeeplyNested {
                limit: self.config.max_depth
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}
