//! The SQL clause tree.
//!
//! [`Clause`] is a closed set of node kinds. Every node knows a single
//! operation, [`Clause::compile`], which hands the node to the matching
//! `visit_*` function of the context's [`Compiler`](crate::Compiler).
//!
//! Nodes are plain values: builders assemble them, the compiler only reads
//! them.

mod elements;
mod expr;
mod where_clause;

pub use elements::{BindClause, ColumnElem, TableElem, TextClause};
pub use expr::{
    AggregateClause, AliasClause, BinaryExpressionClause, Combinator, CombinerClause,
    ExistsClause, ListClause, alias, and, avg, bind, binary, count, exists, list, max, min,
    not_exists, or, sum, text,
};
pub use where_clause::WhereClause;

use crate::compiler::CompilerContext;
use crate::error::CompileResult;
use crate::stmt::{
    DeleteStmt, HavingClause, InsertStmt, JoinClause, OrderByClause, SelectStmt, UpdateStmt,
    UpsertStmt,
};

/// A node of the SQL clause tree.
#[derive(Clone, Debug)]
pub enum Clause {
    Text(TextClause),
    Bind(BindClause),
    Column(ColumnElem),
    Table(TableElem),
    Binary(BinaryExpressionClause),
    Combiner(CombinerClause),
    List(ListClause),
    Alias(AliasClause),
    Exists(ExistsClause),
    Aggregate(AggregateClause),
    Join(JoinClause),
    OrderBy(OrderByClause),
    Having(HavingClause),
    Where(WhereClause),
    Select(Box<SelectStmt>),
    Insert(Box<InsertStmt>),
    Update(Box<UpdateStmt>),
    Delete(Box<DeleteStmt>),
    Upsert(Box<UpsertStmt>),
}

impl Clause {
    /// Render this node, appending its bound values to `ctx`.
    pub fn compile(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String> {
        let compiler = ctx.compiler();
        ctx.with_clause(|ctx| match self {
            Clause::Text(text) => compiler.visit_text(ctx, text),
            Clause::Bind(bind) => compiler.visit_bind(ctx, bind),
            Clause::Column(column) => compiler.visit_column(ctx, column),
            Clause::Table(table) => compiler.visit_table(ctx, table),
            Clause::Binary(binary) => compiler.visit_binary(ctx, binary),
            Clause::Combiner(combiner) => compiler.visit_combiner(ctx, combiner),
            Clause::List(list) => compiler.visit_list(ctx, list),
            Clause::Alias(alias) => compiler.visit_alias(ctx, alias),
            Clause::Exists(exists) => compiler.visit_exists(ctx, exists),
            Clause::Aggregate(aggregate) => compiler.visit_aggregate(ctx, aggregate),
            Clause::Join(join) => compiler.visit_join(ctx, join),
            Clause::OrderBy(order_by) => compiler.visit_order_by(ctx, order_by),
            Clause::Having(having) => compiler.visit_having(ctx, having),
            Clause::Where(where_clause) => compiler.visit_where(ctx, where_clause),
            Clause::Select(select) => compiler.visit_select(ctx, select),
            Clause::Insert(insert) => compiler.visit_insert(ctx, insert),
            Clause::Update(update) => compiler.visit_update(ctx, update),
            Clause::Delete(delete) => compiler.visit_delete(ctx, delete),
            Clause::Upsert(upsert) => compiler.visit_upsert(ctx, upsert),
        })
    }

    /// Name of the table columns are implicitly relative to when this node is
    /// used as a FROM source: the table itself, or the leftmost table of a join
    /// chain.
    pub fn default_name(&self) -> Option<&str> {
        match self {
            Clause::Table(table) => Some(&table.name),
            Clause::Join(join) => join.left.default_name(),
            _ => None,
        }
    }
}

macro_rules! impl_from_node {
    ($($node:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Clause {
                fn from(node: $node) -> Self {
                    Clause::$variant(node)
                }
            }
        )*
    };
}

macro_rules! impl_from_stmt {
    ($($stmt:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$stmt> for Clause {
                fn from(stmt: $stmt) -> Self {
                    Clause::$variant(Box::new(stmt))
                }
            }
        )*
    };
}

impl_from_node! {
    TextClause => Text,
    BindClause => Bind,
    ColumnElem => Column,
    TableElem => Table,
    BinaryExpressionClause => Binary,
    CombinerClause => Combiner,
    ListClause => List,
    AliasClause => Alias,
    ExistsClause => Exists,
    AggregateClause => Aggregate,
    JoinClause => Join,
    OrderByClause => OrderBy,
    HavingClause => Having,
    WhereClause => Where,
}

impl_from_stmt! {
    SelectStmt => Select,
    InsertStmt => Insert,
    UpdateStmt => Update,
    DeleteStmt => Delete,
    UpsertStmt => Upsert,
}

#[cfg(test)]
mod tests;
