//! Composite expression nodes and the free-function constructors for them.

use crate::clause::elements::{BindClause, TextClause};
use crate::clause::Clause;
use tokio_postgres::types::ToSql;

/// `left <op> right`
#[derive(Clone, Debug)]
pub struct BinaryExpressionClause {
    pub left: Box<Clause>,
    pub op: String,
    pub right: Box<Clause>,
}

impl BinaryExpressionClause {
    pub fn new(left: impl Into<Clause>, op: impl Into<String>, right: impl Into<Clause>) -> Self {
        Self {
            left: Box::new(left.into()),
            op: op.into(),
            right: Box::new(right.into()),
        }
    }
}

/// Boolean operator joining the members of a [`CombinerClause`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn as_str(self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

/// AND/OR group, rendered as one parenthesized group: `(a AND b AND c)`.
///
/// A group with no members renders as `()`.
#[derive(Clone, Debug)]
pub struct CombinerClause {
    pub operator: Combinator,
    pub clauses: Vec<Clause>,
}

/// Parenthesized comma list: `(a, b, c)`.
#[derive(Clone, Debug)]
pub struct ListClause {
    pub clauses: Vec<Clause>,
}

impl ListClause {
    pub fn new<I, C>(clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        Self {
            clauses: clauses.into_iter().map(Into::into).collect(),
        }
    }
}

/// `<selectable> AS <name>`
#[derive(Clone, Debug)]
pub struct AliasClause {
    pub selectable: Box<Clause>,
    pub name: String,
}

/// `EXISTS(<select>)` or `NOT EXISTS(<select>)`.
///
/// The inner select is compiled in sub-query scope, where every column is
/// table-qualified.
#[derive(Clone, Debug)]
pub struct ExistsClause {
    pub select: Box<Clause>,
    pub not: bool,
}

/// Aggregate function call such as `COUNT(users.id)`.
#[derive(Clone, Debug)]
pub struct AggregateClause {
    pub func: String,
    pub clause: Box<Clause>,
}

impl AggregateClause {
    pub fn new(func: impl Into<String>, clause: impl Into<Clause>) -> Self {
        Self {
            func: func.into(),
            clause: Box::new(clause.into()),
        }
    }
}

/// Raw SQL text.
pub fn text(sql: impl Into<String>) -> Clause {
    Clause::Text(TextClause::new(sql))
}

/// A bound value.
pub fn bind<T: ToSql + Send + Sync + 'static>(value: T) -> Clause {
    Clause::Bind(BindClause::new(value))
}

/// `left <op> right`
pub fn binary(left: impl Into<Clause>, op: impl Into<String>, right: impl Into<Clause>) -> Clause {
    Clause::Binary(BinaryExpressionClause::new(left, op, right))
}

fn combine<I, C>(operator: Combinator, clauses: I) -> Clause
where
    I: IntoIterator<Item = C>,
    C: Into<Clause>,
{
    Clause::Combiner(CombinerClause {
        operator,
        clauses: clauses.into_iter().map(Into::into).collect(),
    })
}

/// `(a AND b AND ...)`
pub fn and<I, C>(clauses: I) -> Clause
where
    I: IntoIterator<Item = C>,
    C: Into<Clause>,
{
    combine(Combinator::And, clauses)
}

/// `(a OR b OR ...)`
pub fn or<I, C>(clauses: I) -> Clause
where
    I: IntoIterator<Item = C>,
    C: Into<Clause>,
{
    combine(Combinator::Or, clauses)
}

/// `(a, b, ...)`
pub fn list<I, C>(clauses: I) -> Clause
where
    I: IntoIterator<Item = C>,
    C: Into<Clause>,
{
    Clause::List(ListClause::new(clauses))
}

/// `<selectable> AS <name>`
pub fn alias(name: impl Into<String>, selectable: impl Into<Clause>) -> Clause {
    Clause::Alias(AliasClause {
        selectable: Box::new(selectable.into()),
        name: name.into(),
    })
}

/// `EXISTS(<select>)`
pub fn exists(select: impl Into<Clause>) -> Clause {
    Clause::Exists(ExistsClause {
        select: Box::new(select.into()),
        not: false,
    })
}

/// `NOT EXISTS(<select>)`
pub fn not_exists(select: impl Into<Clause>) -> Clause {
    Clause::Exists(ExistsClause {
        select: Box::new(select.into()),
        not: true,
    })
}

pub fn count(clause: impl Into<Clause>) -> AggregateClause {
    AggregateClause::new("COUNT", clause)
}

pub fn sum(clause: impl Into<Clause>) -> AggregateClause {
    AggregateClause::new("SUM", clause)
}

pub fn avg(clause: impl Into<Clause>) -> AggregateClause {
    AggregateClause::new("AVG", clause)
}

pub fn min(clause: impl Into<Clause>) -> AggregateClause {
    AggregateClause::new("MIN", clause)
}

pub fn max(clause: impl Into<Clause>) -> AggregateClause {
    AggregateClause::new("MAX", clause)
}
