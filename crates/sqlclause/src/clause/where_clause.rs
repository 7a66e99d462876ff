//! WHERE clause with AND/OR folding.

use crate::clause::Clause;
use crate::clause::expr::{Combinator, CombinerClause};

/// `WHERE <clause>`
///
/// [`and`](WhereClause::and) and [`or`](WhereClause::or) fold the current
/// condition together with new ones into a single group, so chained calls
/// nest instead of flattening:
///
/// ```ignore
/// // WHERE ((X AND Y) OR Z)
/// WhereClause::new(text("X")).and([text("Y")]).or([text("Z")]);
/// ```
#[derive(Clone, Debug)]
pub struct WhereClause {
    pub clause: Box<Clause>,
}

impl WhereClause {
    pub fn new(clause: impl Into<Clause>) -> Self {
        Self {
            clause: Box::new(clause.into()),
        }
    }

    /// Replace the condition by `(<current> AND <clauses>...)`.
    pub fn and<I, C>(self, clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        self.fold(Combinator::And, clauses)
    }

    /// Replace the condition by `(<current> OR <clauses>...)`.
    pub fn or<I, C>(self, clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        self.fold(Combinator::Or, clauses)
    }

    fn fold<I, C>(self, operator: Combinator, clauses: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        let mut members = vec![*self.clause];
        members.extend(clauses.into_iter().map(Into::into));
        Self {
            clause: Box::new(Clause::Combiner(CombinerClause {
                operator,
                clauses: members,
            })),
        }
    }
}
