//! DELETE statement builder.

use crate::clause::{Clause, ColumnElem, TableElem, WhereClause};
use crate::compiler::CompilerContext;
use crate::error::CompileResult;
use crate::stmt::Statement;

/// DELETE statement.
#[derive(Clone, Debug)]
pub struct DeleteStmt {
    pub table: TableElem,
    pub where_clause: Option<WhereClause>,
    pub returning: Vec<ColumnElem>,
}

impl DeleteStmt {
    pub fn new(table: TableElem) -> Self {
        Self {
            table,
            where_clause: None,
            returning: Vec::new(),
        }
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

impl Statement for DeleteStmt {
    fn compile_root(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String> {
        ctx.compiler().visit_delete(ctx, self)
    }
}
