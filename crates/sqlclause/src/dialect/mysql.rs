//! MySQL: backtick quoting and `ON DUPLICATE KEY UPDATE` upserts.

use crate::compiler::{Compiler, CompilerContext};
use crate::dialect::{Dialect, quote_ident};
use crate::error::{CompileError, CompileResult};
use crate::stmt::UpsertStmt;

/// MySQL dialect.
#[derive(Debug, Clone, Default)]
pub struct MysqlDialect {
    escaping: bool,
}

impl MysqlDialect {
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

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn escape(&self, ident: &str) -> String {
        if self.escaping {
            quote_ident(ident, '`')
        } else {
            ident.to_string()
        }
    }

    fn placeholder(&mut self) -> String {
        "?".to_string()
    }

    fn compiler(&self) -> &'static dyn Compiler {
        &MysqlCompiler
    }
}

/// ANSI rules plus `ON DUPLICATE KEY UPDATE` upserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlCompiler;

impl Compiler for MysqlCompiler {
    /// ```text
    /// INSERT INTO t(a, b, id)
    /// VALUES(?, ?, ?)
    /// ON DUPLICATE KEY UPDATE a = VALUES(a), b = VALUES(b)
    /// ```
    ///
    /// MySQL resolves the conflict from the table's unique indexes; `keys`
    /// only removes columns from the update list. With nothing left to update
    /// the statement becomes `INSERT IGNORE`.
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &UpsertStmt) -> CompileResult<String> {
        if upsert.values.is_empty() {
            return Err(CompileError::validation(format!(
                "upsert into {} has no values",
                upsert.table.name
            )));
        }
        if !upsert.returning.is_empty() {
            return Err(CompileError::unsupported("UPSERT ... RETURNING", ctx.dialect_name()));
        }

        ctx.with_statement(&upsert.table.name, |ctx| {
            let table = self.visit_table(ctx, &upsert.table)?;
            let (columns, placeholders) = self.value_lists(ctx, &upsert.values)?;

            let mut updates = Vec::new();
            for name in upsert.values.keys() {
                if upsert.keys.iter().any(|key| &key.name == name) {
                    continue;
                }
                let label = self.visit_label(ctx, name)?;
                updates.push(format!("{label} = VALUES({label})"));
            }

            if updates.is_empty() {
                return Ok(format!(
                    "INSERT IGNORE INTO {}({})\nVALUES({})",
                    table,
                    columns.join(", "),
                    placeholders.join(", ")
                ));
            }
            Ok(format!(
                "INSERT INTO {}({})\nVALUES({})\nON DUPLICATE KEY UPDATE {}",
                table,
                columns.join(", "),
                placeholders.join(", "),
                updates.join(", ")
            ))
        })
    }
}
