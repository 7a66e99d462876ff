use crate::compiler::Compiler;
use crate::dialect::Dialect;
use crate::param::{Param, ParamList};
use serde_json::Value;
use std::collections::HashMap;

/// Mutable state of one compilation, passed to every `visit_*` function.
///
/// A context is created by the compile entry point, used for exactly one
/// clause tree and then dropped. It holds the bound values, the dialect (for
/// escaping and placeholders), the compiler in use, and the scoped flags
/// visitors use to communicate:
///
/// - `in_sub_query`: set while a nested SELECT is rendered; forces column
///   qualification.
/// - `default_table_name`: the primary table of the enclosing statement;
///   its columns render unqualified.
/// - statement depth: how many statements are being rendered around the
///   current node. A SELECT reached at depth > 0 is a nested sub-select.
/// - clause depth: how many [`Clause`](crate::Clause) nodes enclose the
///   current one, counting itself. A SELECT below the root node is nested too.
///
/// All of them follow stack discipline: use [`with_sub_query`](Self::with_sub_query),
/// [`with_default_table`](Self::with_default_table) and
/// [`with_statement`](Self::with_statement), which restore the previous value
/// whether the inner rendering succeeds or fails.
pub struct CompilerContext<'a> {
    binds: ParamList,
    default_table_name: String,
    in_sub_query: bool,
    statement_depth: usize,
    clause_depth: usize,
    vars: HashMap<String, Value>,
    dialect: &'a mut dyn Dialect,
    compiler: &'static dyn Compiler,
}

impl<'a> CompilerContext<'a> {
    /// Create a context using `dialect` and the compiler it selects.
    pub fn new(dialect: &'a mut dyn Dialect) -> Self {
        let compiler = dialect.compiler();
        Self {
            binds: ParamList::new(),
            default_table_name: String::new(),
            in_sub_query: false,
            statement_depth: 0,
            clause_depth: 0,
            vars: HashMap::new(),
            dialect,
            compiler,
        }
    }

    /// The compiler rendering this tree.
    pub fn compiler(&self) -> &'static dyn Compiler {
        self.compiler
    }

    /// Name of the dialect, for error messages.
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    /// Escape an identifier with the dialect's rules.
    pub fn escape(&self, ident: &str) -> String {
        self.dialect.escape(ident)
    }

    /// Append `value` to the binds and return its placeholder.
    ///
    /// This is the only way to add a bind, which keeps bind `i` paired with
    /// the `i`-th placeholder of the output.
    pub fn bind(&mut self, value: Param) -> String {
        self.binds.push(value);
        self.dialect.placeholder()
    }

    /// Values bound so far, in placeholder order.
    pub fn binds(&self) -> &ParamList {
        &self.binds
    }

    pub(crate) fn into_binds(self) -> ParamList {
        self.binds
    }

    pub fn in_sub_query(&self) -> bool {
        self.in_sub_query
    }

    pub fn default_table_name(&self) -> &str {
        &self.default_table_name
    }

    /// Run `f` in sub-query scope, restoring the previous scope afterwards.
    pub fn with_sub_query<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.in_sub_query, true);
        let out = f(self);
        self.in_sub_query = previous;
        out
    }

    /// Run `f` with `name` as the default table, restoring the previous one
    /// afterwards.
    pub fn with_default_table<T>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = std::mem::replace(&mut self.default_table_name, name.to_string());
        let out = f(self);
        self.default_table_name = previous;
        out
    }

    /// Whether a statement is being rendered around the current node.
    pub fn in_statement(&self) -> bool {
        self.statement_depth > 0
    }

    /// Render the body of a statement whose default table is `name`.
    ///
    /// Like [`with_default_table`](Self::with_default_table), and also marks
    /// everything rendered inside `f` as nested in a statement.
    pub fn with_statement<T>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.statement_depth += 1;
        let out = self.with_default_table(name, f);
        self.statement_depth -= 1;
        out
    }

    /// Number of clause nodes being rendered, the current one included.
    pub fn clause_depth(&self) -> usize {
        self.clause_depth
    }

    /// Render one clause node one level deeper than the current one.
    pub(crate) fn with_clause<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.clause_depth += 1;
        let out = f(self);
        self.clause_depth -= 1;
        out
    }

    /// Read a compiler-specific variable.
    pub fn var(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    /// Set a compiler-specific variable, returning the previous value.
    ///
    /// Variables live as long as the context; custom compilers use them to
    /// pass information between visits of one tree.
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(key.into(), value.into())
    }
}
