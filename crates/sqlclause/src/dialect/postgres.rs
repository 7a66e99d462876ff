//! PostgreSQL: numbered `$n` placeholders and `ON CONFLICT` upserts.

use crate::compiler::{Compiler, CompilerContext};
use crate::dialect::{Dialect, quote_ident};
use crate::error::{CompileError, CompileResult};
use crate::stmt::UpsertStmt;

/// PostgreSQL dialect.
///
/// Placeholders are numbered from `$1` within one compilation; the counter
/// is cleared by [`reset`](Dialect::reset).
#[derive(Debug, Clone, Default)]
pub struct PostgresDialect {
    escaping: bool,
    bindings: usize,
}

impl PostgresDialect {
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

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn escape(&self, ident: &str) -> String {
        if self.escaping {
            quote_ident(ident, '"')
        } else {
            ident.to_string()
        }
    }

    fn placeholder(&mut self) -> String {
        self.bindings += 1;
        format!("${}", self.bindings)
    }

    fn reset(&mut self) {
        self.bindings = 0;
    }

    fn compiler(&self) -> &'static dyn Compiler {
        &PostgresCompiler
    }
}

/// ANSI rules plus `INSERT ... ON CONFLICT` upserts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresCompiler;

impl Compiler for PostgresCompiler {
    /// ```text
    /// INSERT INTO t(a, b, id)
    /// VALUES($1, $2, $3)
    /// ON CONFLICT (id) DO UPDATE SET a = EXCLUDED.a, b = EXCLUDED.b
    /// ```
    ///
    /// When every value is a conflict key there is nothing to update and the
    /// conflict action is `DO NOTHING`.
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, upsert: &UpsertStmt) -> CompileResult<String> {
        if upsert.values.is_empty() {
            return Err(CompileError::validation(format!(
                "upsert into {} has no values",
                upsert.table.name
            )));
        }
        if upsert.keys.is_empty() {
            return Err(CompileError::validation(format!(
                "postgres upsert into {} needs conflict keys",
                upsert.table.name
            )));
        }

        ctx.with_statement(&upsert.table.name, |ctx| {
            let table = self.visit_table(ctx, &upsert.table)?;
            let (columns, placeholders) = self.value_lists(ctx, &upsert.values)?;

            let mut keys = Vec::with_capacity(upsert.keys.len());
            for key in &upsert.keys {
                keys.push(self.visit_label(ctx, &key.name)?);
            }

            let mut updates = Vec::new();
            for name in upsert.values.keys() {
                if upsert.keys.iter().any(|key| &key.name == name) {
                    continue;
                }
                let label = self.visit_label(ctx, name)?;
                updates.push(format!("{label} = EXCLUDED.{label}"));
            }
            let action = if updates.is_empty() {
                "DO NOTHING".to_string()
            } else {
                format!("DO UPDATE SET {}", updates.join(", "))
            };

            let mut sql = format!(
                "INSERT INTO {}({})\nVALUES({})\nON CONFLICT ({}) {}",
                table,
                columns.join(", "),
                placeholders.join(", "),
                keys.join(", "),
                action
            );
            sql.push_str(&self.returning(ctx, &upsert.returning)?);
            Ok(sql)
        })
    }
}
