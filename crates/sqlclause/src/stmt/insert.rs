//! INSERT statement builder.

use crate::clause::{ColumnElem, TableElem};
use crate::compiler::CompilerContext;
use crate::error::CompileResult;
use crate::param::Param;
use crate::stmt::Statement;
use std::collections::BTreeMap;
use tokio_postgres::types::ToSql;

/// INSERT statement.
///
/// Values are keyed by column name and rendered sorted by name, so the SQL
/// text is stable for a given set of columns.
#[derive(Clone, Debug)]
pub struct InsertStmt {
    pub table: TableElem,
    pub values: BTreeMap<String, Param>,
    pub returning: Vec<ColumnElem>,
}

impl InsertStmt {
    pub fn new(table: TableElem) -> Self {
        Self {
            table,
            values: BTreeMap::new(),
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

    /// Add RETURNING columns.
    pub fn returning(mut self, columns: impl IntoIterator<Item = ColumnElem>) -> Self {
        self.returning.extend(columns);
        self
    }
}

impl Statement for InsertStmt {
    fn compile_root(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String> {
        ctx.compiler().visit_insert(ctx, self)
    }
}
