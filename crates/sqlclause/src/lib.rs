//! # sqlclause
//!
//! Build SQL as a tree of clauses and compile it into dialect-specific SQL
//! plus an ordered list of bound values. No string concatenation, no inlined
//! values, no database connection.
//!
//! ## Features
//!
//! - **Clause tree**: columns, tables, expressions, AND/OR groups, joins and
//!   the SELECT/INSERT/UPDATE/DELETE/UPSERT statements are plain values
//! - **Ordered binds**: the `i`-th bound value always belongs to the `i`-th
//!   placeholder of the output
//! - **Dialects**: `default`, `postgres`, `mysql` and `sqlite`, selectable by
//!   name or from configuration; a dialect overrides only the rendering rules
//!   that differ from ANSI
//! - **Tracing**: each compilation emits a `debug` event on the
//!   `sqlclause.compile` target (crate feature `tracing`, on by default)
//!
//! ## Example
//!
//! ```ignore
//! use sqlclause::{PostgresDialect, Statement, TableElem, exists};
//!
//! let users = TableElem::new("users");
//! let sessions = TableElem::new("sessions");
//!
//! let active = sessions
//!     .select([sessions.c("id")])
//!     .where_(sessions.c("user_id").eq_column(&users.c("id")));
//!
//! let compiled = users
//!     .select([users.c("id"), users.c("email")])
//!     .where_(exists(active))
//!     .and_where(users.c("status").eq("active"))
//!     .build(&mut PostgresDialect::new())?;
//!
//! // SELECT id, email
//! // FROM users
//! // WHERE (EXISTS(SELECT sessions.id
//! // FROM sessions
//! // WHERE sessions.user_id = users.id) AND status = $1)
//! let rows = client.query(&compiled.sql, &compiled.params_ref()).await?;
//! ```

pub mod clause;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod param;
pub mod stmt;

pub use clause::{
    AggregateClause, AliasClause, BinaryExpressionClause, BindClause, Clause, ColumnElem,
    Combinator, CombinerClause, ExistsClause, ListClause, TableElem, TextClause, WhereClause,
    alias, and, avg, bind, binary, count, exists, list, max, min, not_exists, or, sum, text,
};
pub use compiler::{AnsiCompiler, Compiled, Compiler, CompilerContext, compile, compile_all};
pub use dialect::{
    DefaultDialect, Dialect, DialectConfig, DialectKind, MysqlCompiler, MysqlDialect,
    PostgresCompiler, PostgresDialect, SqliteCompiler, SqliteDialect, new_dialect,
};
pub use error::{CompileError, CompileResult};
pub use param::{Param, ParamList};
pub use stmt::{
    DeleteStmt, Direction, HavingClause, InsertStmt, JoinClause, JoinType, OrderByClause,
    SelectStmt, Statement, UpdateStmt, UpsertStmt, delete, insert, select, update, upsert,
};
