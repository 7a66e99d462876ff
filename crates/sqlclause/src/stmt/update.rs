//! UPDATE statement builder.

use crate::clause::{Clause, ColumnElem, TableElem, WhereClause};
use crate::compiler::CompilerContext;
use crate::error::CompileResult;
use crate::param::Param;
use crate::stmt::Statement;
use std::collections::BTreeMap;
use tokio_postgres::types::ToSql;

/// UPDATE statement. SET assignments are rendered sorted by column name.
#[derive(Clone, Debug)]
pub struct UpdateStmt {
    pub table: TableElem,
    pub values: BTreeMap<String, Param>,
    pub where_clause: Option<WhereClause>,
    pub returning: Vec<ColumnElem>,
}

impl UpdateStmt {
    pub fn new(table: TableElem) -> Self {
        Self {
            table,
            values: BTreeMap::new(),
            where_clause: None,
            returning: Vec::new(),
        }
    }

    /// Add SET: column = value
    pub fn set<T: ToSql + Send + Sync + 'static>(
        mut self,
        column: impl Into<String>,
        value: T,
    ) -> Self {
        self.values.insert(column.into(), Param::new(value));
        self
    }

    /// Add several pre-wrapped SET values.
    pub fn values<K: Into<String>>(mut self, values: impl IntoIterator<Item = (K, Param)>) -> Self {
        self.values
            .extend(values.into_iter().map(|(column, value)| (column.into(), value)));
        self
    }

    /// Set the WHERE condition, replacing any previous one.
    pub fn where_(mut self, clause: impl Into<Clause>) -> Self {
        self.where_clause = Some(WhereClause::new(clause));
        self
    }

    /// Add RETURNING columns.
    pub fn returning(mut self, columns: impl IntoIterator<Item = ColumnElem>) -> Self {
        self.returning.extend(columns);
        self
    }
}

impl Statement for UpdateStmt {
    fn compile_root(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String> {
        ctx.compiler().visit_update(ctx, self)
    }
}
