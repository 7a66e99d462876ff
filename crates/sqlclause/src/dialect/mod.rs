//! SQL dialects.
//!
//! A [`Dialect`] supplies the database-specific pieces of rendering:
//! identifier escaping, placeholder syntax, and the [`Compiler`] rule set to
//! use. Placeholders may be numbered (`$1, $2, ...`), so a dialect carries a
//! counter; the compile entry point resets it after every compilation.
//!
//! A dialect must not be shared by two compilations at once. `placeholder`
//! and `reset` take `&mut self`, so this holds by construction; give each
//! thread its own dialect value.
//!
//! Dialects are picked by name or from configuration:
//!
//! ```ignore
//! use sqlclause::{DialectConfig, DialectKind, new_dialect};
//!
//! let mut pg = new_dialect("postgres")?;
//! let mut mysql = DialectConfig::new(DialectKind::Mysql).with_escaping(true).build();
//! ```

mod default;
mod mysql;
mod postgres;
mod sqlite;

pub use default::DefaultDialect;
pub use mysql::{MysqlCompiler, MysqlDialect};
pub use postgres::{PostgresCompiler, PostgresDialect};
pub use sqlite::{SqliteCompiler, SqliteDialect};

use crate::compiler::{AnsiCompiler, Compiler};
use crate::error::{CompileError, CompileResult};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Database-specific rendering rules.
pub trait Dialect {
    /// Short name, used in logs and errors.
    fn name(&self) -> &'static str;

    /// Escape an identifier (table, column or alias name).
    fn escape(&self, ident: &str) -> String;

    /// Next placeholder token. May advance an internal counter.
    fn placeholder(&mut self) -> String;

    /// Clear placeholder state. Called once at the end of every compilation.
    fn reset(&mut self) {}

    /// Rule set for this dialect.
    fn compiler(&self) -> &'static dyn Compiler {
        &AnsiCompiler
    }
}

/// Supported dialects.
///
/// Names are matched case-insensitively, with the aliases `postgresql`/`pg`
/// and `sqlite3`. Deserialization goes through the same [`FromStr`] parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum DialectKind {
    #[default]
    Default,
    Postgres,
    Mysql,
    Sqlite,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::Default => "default",
            DialectKind::Postgres => "postgres",
            DialectKind::Mysql => "mysql",
            DialectKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(DialectKind::Default),
            "postgres" | "postgresql" | "pg" => Ok(DialectKind::Postgres),
            "mysql" => Ok(DialectKind::Mysql),
            "sqlite" | "sqlite3" => Ok(DialectKind::Sqlite),
            _ => Err(CompileError::UnknownDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for DialectKind {
    type Error = CompileError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Dialect configuration.
///
/// Deserializable so it can sit in an application's config file:
///
/// ```toml
/// [sql]
/// kind = "postgres"
/// escaping = true
/// ```
///
/// By default the `default` dialect is used and identifiers are not escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Which dialect to build.
    pub kind: DialectKind,
    /// Whether identifiers are quoted.
    pub escaping: bool,
}

impl DialectConfig {
    /// Create a configuration for `kind` with escaping disabled.
    pub fn new(kind: DialectKind) -> Self {
        Self {
            kind,
            escaping: false,
        }
    }

    /// Enable or disable identifier quoting.
    pub fn with_escaping(mut self, escaping: bool) -> Self {
        self.escaping = escaping;
        self
    }

    /// Build the configured dialect.
    pub fn build(&self) -> Box<dyn Dialect> {
        match self.kind {
            DialectKind::Default => Box::new(DefaultDialect::new().with_escaping(self.escaping)),
            DialectKind::Postgres => Box::new(PostgresDialect::new().with_escaping(self.escaping)),
            DialectKind::Mysql => Box::new(MysqlDialect::new().with_escaping(self.escaping)),
            DialectKind::Sqlite => Box::new(SqliteDialect::new().with_escaping(self.escaping)),
        }
    }
}

/// Build a dialect by name (`default`, `postgres`, `mysql`, `sqlite`), with
/// escaping disabled.
pub fn new_dialect(name: &str) -> CompileResult<Box<dyn Dialect>> {
    let kind: DialectKind = name.parse()?;
    Ok(DialectConfig::new(kind).build())
}

/// Wrap `ident` in `quote`, doubling embedded quote characters.
pub(crate) fn quote_ident(ident: &str, quote: char) -> String {
    let mut out = String::with_capacity(ident.len() + 2);
    out.push(quote);
    for c in ident.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests;
