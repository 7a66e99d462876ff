//! Clause tree compiler.
//!
//! [`compile`] is the entry point turning a [`Clause`] tree into SQL text and
//! an ordered bind list:
//!
//! ```ignore
//! use sqlclause::{PostgresDialect, TableElem, WhereClause, compile};
//!
//! let users = TableElem::new("users");
//! let clause = WhereClause::new(users.c("id").eq(5)).and([users.c("active").eq(true)]);
//!
//! let mut dialect = PostgresDialect::new();
//! let compiled = compile(&clause.into(), &mut dialect)?;
//! assert_eq!(compiled.sql, "WHERE (users.id = $1 AND users.active = $2)");
//! assert_eq!(compiled.params.len(), 2);
//! ```
//!
//! Rendering is a single depth-first walk: bound values are appended in the
//! order their placeholders appear in the text. The dialect is reset after
//! every compilation, failed ones included, so one dialect value can be
//! reused for the next statement.

mod context;
mod visitor;

pub use context::CompilerContext;
pub use visitor::{AnsiCompiler, Compiler, compile_all};

use crate::clause::Clause;
use crate::dialect::Dialect;
use crate::error::CompileResult;
use crate::param::ParamList;
use tokio_postgres::types::ToSql;

/// The result of compiling a clause tree.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub sql: String,
    /// One value per placeholder in `sql`, in order of appearance
    pub params: ParamList,
}

impl Compiled {
    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }
}

/// Compile `clause` with `dialect`.
pub fn compile(clause: &Clause, dialect: &mut dyn Dialect) -> CompileResult<Compiled> {
    compile_with(dialect, |ctx| clause.compile(ctx))
}

/// Resets the dialect when dropped, so the reset also runs on error and
/// unwind paths.
struct ResetOnDrop<'a>(&'a mut dyn Dialect);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.0.reset();
    }
}

/// Run `render` against a fresh context for `dialect`.
pub(crate) fn compile_with<F>(dialect: &mut dyn Dialect, render: F) -> CompileResult<Compiled>
where
    F: FnOnce(&mut CompilerContext<'_>) -> CompileResult<String>,
{
    let guard = ResetOnDrop(dialect);
    let mut ctx = CompilerContext::new(&mut *guard.0);
    let result = render(&mut ctx).map(|sql| Compiled {
        sql,
        params: ctx.into_binds(),
    });

    #[cfg(feature = "tracing")]
    trace_outcome(guard.0.name(), &result);

    result
}

#[cfg(feature = "tracing")]
const MAX_LOGGED_SQL_BYTES: usize = 200;

#[cfg(feature = "tracing")]
fn trace_outcome(dialect: &str, result: &CompileResult<Compiled>) {
    match result {
        Ok(compiled) => {
            let sql = truncate_sql_bytes(&compiled.sql, MAX_LOGGED_SQL_BYTES);
            tracing::debug!(
                target: "sqlclause.compile",
                dialect,
                param_count = compiled.params.len(),
                sql = %sql,
                "compiled clause tree"
            );
        }
        Err(err) => {
            tracing::warn!(
                target: "sqlclause.compile",
                dialect,
                error = %err,
                "clause tree compilation failed"
            );
        }
    }
}

/// Cut `sql` to at most `max_bytes`, on a char boundary.
#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
