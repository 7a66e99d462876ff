//! Leaf nodes: raw text, bound values, tables and columns.

use crate::clause::expr::{BinaryExpressionClause, ListClause};
use crate::clause::Clause;
use crate::param::Param;
use crate::stmt::{DeleteStmt, InsertStmt, SelectStmt, UpdateStmt, UpsertStmt};
use tokio_postgres::types::ToSql;

/// Raw SQL passed through as is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextClause {
    pub text: String,
}

/// A value rendered as a placeholder and appended to the bind list.
#[derive(Clone, Debug)]
pub struct BindClause {
    pub value: Param,
}

/// A table reference.
///
/// The table a statement reads from or writes to is also its default table:
/// columns of the default table render without the `table.` prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableElem {
    pub name: String,
}

impl TableElem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Column `name` of this table.
    pub fn c(&self, name: impl Into<String>) -> ColumnElem {
        ColumnElem::new(self.name.clone(), name)
    }

    /// `SELECT <columns> FROM <this table>`.
    pub fn select<I, C>(&self, columns: I) -> SelectStmt
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        SelectStmt::new(columns).from(self.clone())
    }

    pub fn insert(&self) -> InsertStmt {
        InsertStmt::new(self.clone())
    }

    pub fn update(&self) -> UpdateStmt {
        UpdateStmt::new(self.clone())
    }

    pub fn delete(&self) -> DeleteStmt {
        DeleteStmt::new(self.clone())
    }

    pub fn upsert(&self) -> UpsertStmt {
        UpsertStmt::new(self.clone())
    }
}

/// A column reference; identity is `(table, name)`.
///
/// Comparison helpers (`eq`, `gt`, ...) build clauses, so the type does not
/// implement `PartialEq`; compare `table` and `name` directly.
#[derive(Clone, Debug)]
pub struct ColumnElem {
    pub table: String,
    pub name: String,
}

impl ColumnElem {
    pub fn new(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
        }
    }

    /// `self <op> right`
    pub fn compare(&self, op: impl Into<String>, right: impl Into<Clause>) -> Clause {
        Clause::Binary(BinaryExpressionClause::new(self.clone(), op, right))
    }

    fn compare_value<T: ToSql + Send + Sync + 'static>(&self, op: &str, value: T) -> Clause {
        self.compare(op, BindClause::new(value))
    }

    /// `self = value`
    pub fn eq<T: ToSql + Send + Sync + 'static>(&self, value: T) -> Clause {
        self.compare_value("=", value)
    }

    /// `self != value`
    pub fn not_eq<T: ToSql + Send + Sync + 'static>(&self, value: T) -> Clause {
        self.compare_value("!=", value)
    }

    /// `self > value`
    pub fn gt<T: ToSql + Send + Sync + 'static>(&self, value: T) -> Clause {
        self.compare_value(">", value)
    }

    /// `self >= value`
    pub fn gte<T: ToSql + Send + Sync + 'static>(&self, value: T) -> Clause {
        self.compare_value(">=", value)
    }

    /// `self < value`
    pub fn lt<T: ToSql + Send + Sync + 'static>(&self, value: T) -> Clause {
        self.compare_value("<", value)
    }

    /// `self <= value`
    pub fn lte<T: ToSql + Send + Sync + 'static>(&self, value: T) -> Clause {
        self.compare_value("<=", value)
    }

    /// `self LIKE pattern`
    pub fn like<T: ToSql + Send + Sync + 'static>(&self, pattern: T) -> Clause {
        self.compare_value("LIKE", pattern)
    }

    /// `self NOT LIKE pattern`
    pub fn not_like<T: ToSql + Send + Sync + 'static>(&self, pattern: T) -> Clause {
        self.compare_value("NOT LIKE", pattern)
    }

    /// `self = other`, comparing two columns (join conditions, correlated sub-queries).
    pub fn eq_column(&self, other: &ColumnElem) -> Clause {
        self.compare("=", other.clone())
    }

    pub fn is_null(&self) -> Clause {
        self.compare("IS", TextClause::new("NULL"))
    }

    pub fn is_not_null(&self) -> Clause {
        self.compare("IS NOT", TextClause::new("NULL"))
    }

    /// `self IN (values...)`. An empty list is always false (`1=0`).
    pub fn in_<T: ToSql + Send + Sync + 'static>(&self, values: Vec<T>) -> Clause {
        if values.is_empty() {
            return Clause::Text(TextClause::new("1=0"));
        }
        self.compare("IN", bind_list(values))
    }

    /// `self NOT IN (values...)`. An empty list is always true (`1=1`).
    pub fn not_in<T: ToSql + Send + Sync + 'static>(&self, values: Vec<T>) -> Clause {
        if values.is_empty() {
            return Clause::Text(TextClause::new("1=1"));
        }
        self.compare("NOT IN", bind_list(values))
    }
}

fn bind_list<T: ToSql + Send + Sync + 'static>(values: Vec<T>) -> ListClause {
    ListClause::new(values.into_iter().map(BindClause::new))
}

impl TextClause {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl BindClause {
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Self {
            value: Param::new(value),
        }
    }

    pub fn from_param(value: Param) -> Self {
        Self { value }
    }
}
