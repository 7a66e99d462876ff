//! UPSERT (insert-or-update) statement builder.
//!
//! There is no portable SQL for this statement: the ANSI compiler rejects it
//! and each dialect's compiler renders its own syntax.

use crate::clause::{ColumnElem, TableElem};
use crate::compiler::CompilerContext;
use crate::error::CompileResult;
use crate::param::Param;
use crate::stmt::Statement;
use std::collections::BTreeMap;
use tokio_postgres::types::ToSql;

/// Insert a row, or update it when it collides on `keys`.
#[derive(Clone, Debug)]
pub struct UpsertStmt {
    pub table: TableElem,
    pub values: BTreeMap<String, Param>,
    /// Columns of the unique constraint the insert may conflict on
    pub keys: Vec<ColumnElem>,
    pub returning: Vec<ColumnElem>,
}

impl UpsertStmt {
    pub fn new(table: TableElem) -> Self {
        Self {
            table,
            values: BTreeMap::new(),
            keys: Vec::new(),
            returning: Vec::new(),
        }
    }

    /// Set the value for one column.
    pub fn value<T: ToSql + Send + Sync + 'static>(
        mut self,
        column: impl Into<String>,
        value: T,
    ) -> Self {
        self.values.insert(column.into(), Param::new(value));
        self
    }

    /// Set several pre-wrapped values.
    pub fn values<K: Into<String>>(mut self, values: impl IntoIterator<Item = (K, Param)>) -> Self {
        self.values
            .extend(values.into_iter().map(|(column, value)| (column.into(), value)));
        self
    }

    /// Set the conflict target.
    pub fn on_conflict(mut self, keys: impl IntoIterator<Item = ColumnElem>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }

    /// Add RETURNING columns.
    pub fn returning(mut self, columns: impl IntoIterator<Item = ColumnElem>) -> Self {
        self.returning.extend(columns);
        self
    }
}

impl Statement for UpsertStmt {
    fn compile_root(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String> {
        ctx.compiler().visit_upsert(ctx, self)
    }
}
