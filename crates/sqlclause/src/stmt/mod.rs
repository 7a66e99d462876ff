//! Statement builders.
//!
//! Builders are consuming (`self -> Self`) and only assemble clause values;
//! rendering is left to the [`Compiler`](crate::Compiler).
//!
//! # Usage
//!
//! ```ignore
//! use sqlclause::{PostgresDialect, Statement, TableElem};
//!
//! let users = TableElem::new("users");
//! let compiled = users
//!     .select([users.c("id"), users.c("email")])
//!     .where_(users.c("status").eq("active"))
//!     .order_by([users.c("id")])
//!     .desc()
//!     .limit(0, 20)
//!     .build(&mut PostgresDialect::new())?;
//!
//! // SELECT id, email
//! // FROM users
//! // WHERE status = $1
//! // ORDER BY id DESC
//! // LIMIT 20 OFFSET 0
//! ```

mod delete;
mod insert;
mod select;
mod update;
mod upsert;

pub use delete::DeleteStmt;
pub use insert::InsertStmt;
pub use select::{Direction, HavingClause, JoinClause, JoinType, OrderByClause, SelectStmt};
pub use update::UpdateStmt;
pub use upsert::UpsertStmt;

use crate::clause::{Clause, TableElem};
use crate::compiler::{Compiled, CompilerContext, compile_with};
use crate::dialect::{DefaultDialect, Dialect};
use crate::error::CompileResult;

/// A statement that can be compiled as the root of a clause tree.
pub trait Statement {
    /// Render the statement through the context's compiler.
    fn compile_root(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String>;

    /// Compile with `dialect`; the dialect is reset afterwards.
    fn build(&self, dialect: &mut dyn Dialect) -> CompileResult<Compiled> {
        compile_with(dialect, |ctx| self.compile_root(ctx))
    }

    /// Debug helper: the SQL string for the default dialect.
    fn to_sql(&self) -> CompileResult<String> {
        self.build(&mut DefaultDialect::new())
            .map(|compiled| compiled.sql)
    }
}

/// SELECT `columns` (from nowhere until [`SelectStmt::from`] is called).
pub fn select<I, C>(columns: I) -> SelectStmt
where
    I: IntoIterator<Item = C>,
    C: Into<Clause>,
{
    SelectStmt::new(columns)
}

/// INSERT INTO `table`.
pub fn insert(table: impl Into<String>) -> InsertStmt {
    InsertStmt::new(TableElem::new(table))
}

/// UPDATE `table`.
pub fn update(table: impl Into<String>) -> UpdateStmt {
    UpdateStmt::new(TableElem::new(table))
}

/// DELETE FROM `table`.
pub fn delete(table: impl Into<String>) -> DeleteStmt {
    DeleteStmt::new(TableElem::new(table))
}

/// Insert-or-update into `table`; needs a dialect compiler that supports it.
pub fn upsert(table: impl Into<String>) -> UpsertStmt {
    UpsertStmt::new(TableElem::new(table))
}
