//! SQLite: `REPLACE INTO` upserts.

use crate::compiler::{Compiler, CompilerContext};
use crate::dialect::{Dialect, quote_ident};
use crate::error::{CompileError, CompileResult};
use crate::stmt::UpsertStmt;

/// SQLite dialect.
#[derive(Debug, Clone, Default)]
pub struct SqliteDialect {
    escaping: bool,
}

impl SqliteDialect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable identifier quoting.
    pub fn with_escaping(mut self, escaping: bool) -> Self {
        self.escaping = escaping;
        self
    }

    pub fn escaping(&self) -> bool {
        self.escaping
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn escape(&self, ident: &str) -> String {
        if self.escaping {
            quote_ident(ident, '"')
        } else {
            ident.to_string()
        }
    }

    fn placeholder(&mut self) -> String {
        "?".to_string()
    }

    fn compiler(&self) -> &'static dyn Compiler {
        &SqliteCompiler
    }
}

/// ANSI rules plus `REPLACE INTO` upserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteCompiler;

impl Compiler for SqliteCompiler {
    /// `REPLACE INTO t(a, b)\nVALUES(?, ?)[\nRETURNING ...]`
    ///
    /// REPLACE deletes the conflicting row and inserts the new one, so the
    /// conflict keys are implied by the table's unique constraints.
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &UpsertStmt) -> CompileResult<String> {
        if upsert.values.is_empty() {
            return Err(CompileError::validation(format!(
                "upsert into {} has no values",
                upsert.table.name
            )));
        }

        ctx.with_statement(&upsert.table.name, |ctx| {
            let table = self.visit_table(ctx, &upsert.table)?;
            let (columns, placeholders) = self.value_lists(ctx, &upsert.values)?;
            let mut sql = format!(
                "REPLACE INTO {}({})\nVALUES({})",
                table,
                columns.join(", "),
                placeholders.join(", ")
            );
            sql.push_str(&self.returning(ctx, &upsert.returning)?);
            Ok(sql)
        })
    }
}
