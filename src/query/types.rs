use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Column specifier recorded for `SELECT *` and `SELECT t.*`
pub const WILDCARD: &str = "*";

/// Reserved bucket for function-call results in the projection
pub const FUNCTION_COLUMNS: &str = "*aliases_functions*";

/// Type alias for small column vectors (typically < 8 elements)
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// Extracted shape of one statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    pub kind:       StatementKind,
    pub table:      Table,
    pub wheres:     Vec<Where>,
    pub subqueries: Vec<Query>
}

impl Query {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Number of derived tables below this query, counted recursively
    pub fn subquery_count(&self) -> usize {
        self.subqueries
            .iter()
            .map(|sub| 1 + sub.subquery_count())
            .sum()
    }

    /// Depth of the deepest derived table chain (0 when there is none)
    pub fn nesting_depth(&self) -> usize {
        self.subqueries
            .iter()
            .map(|sub| 1 + sub.nesting_depth())
            .max()
            .unwrap_or(0)
    }
}

/// Tables, aliases, projection and joins of a SELECT
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    /// First plain table reference in FROM, empty until one is seen
    pub name:         CompactString,
    /// Every further plain table reference, in FROM order
    pub names:        Vec<CompactString>,
    pub aliases:      IndexMap<CompactString, CompactString>,
    pub alias_order:  Vec<CompactString>,
    /// Set only while exactly one alias has been recorded
    pub single_alias: CompactString,
    /// Projection keyed by resolved table name, literal qualifier or
    /// [`FUNCTION_COLUMNS`]
    pub columns:      IndexMap<CompactString, ColumnVec>,
    pub join:         Join
}

impl Table {
    /// Primary table name followed by the additional names
    pub fn names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.names.iter().map(|n| n.as_str()))
            .collect()
    }

    /// Record a plain table reference from FROM
    pub fn add_table(&mut self, name: &str) {
        if self.name.is_empty() {
            self.name = name.into();
        } else {
            self.names.push(name.into());
        }
    }

    /// Record `alias` for `table`. A second alias clears `single_alias`.
    pub fn add_alias(&mut self, alias: &str, table: &str) {
        self.aliases.insert(alias.into(), table.into());
        self.alias_order.push(alias.into());
        self.single_alias = if self.alias_order.len() == 1 {
            alias.into()
        } else {
            CompactString::default()
        };
    }

    /// Real table name behind `qualifier`, or the qualifier itself
    pub fn resolve(&self, qualifier: &str) -> CompactString {
        self.aliases
            .get(qualifier)
            .cloned()
            .unwrap_or_else(|| qualifier.into())
    }

    pub fn add_column(&mut self, bucket: &str, column: &str) {
        self.columns
            .entry(bucket.into())
            .or_default()
            .push(column.into());
    }

    /// Projection recorded under `bucket`, empty when there is none
    pub fn columns_of(&self, bucket: &str) -> &[CompactString] {
        self.columns
            .get(bucket)
            .map(|cols| cols.as_slice())
            .unwrap_or_default()
    }
}

/// Flattened ON-clause comparisons in traversal order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Join {
    pub comparisons: Vec<Comparison>
}

/// One `table.column <op> table.column` join predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub left:     CompactString,
    pub right:    CompactString,
    pub operator: CompactString
}

impl Comparison {
    pub fn new(
        left: impl Into<CompactString>,
        right: impl Into<CompactString>,
        operator: impl Into<CompactString>
    ) -> Self {
        Self {
            left:     left.into(),
            right:    right.into(),
            operator: operator.into()
        }
    }
}

/// Filter predicate shape; the compared value is never kept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Where {
    /// Qualifier exactly as written, not alias-resolved
    pub table:    CompactString,
    pub column:   CompactString,
    pub operator: CompactString
}

impl Where {
    pub fn new(
        table: impl Into<CompactString>,
        column: impl Into<CompactString>,
        operator: impl Into<CompactString>
    ) -> Self {
        Self {
            table:    table.into(),
            column:   column.into(),
            operator: operator.into()
        }
    }
}

/// Kind of the top-level statement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    #[default]
    Other
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Other => write!(f, "OTHER")
        }
    }
}
