//! SELECT statement builder and the clauses only a SELECT uses.

use crate::clause::{AggregateClause, Clause, ColumnElem, TableElem, WhereClause};
use crate::compiler::CompilerContext;
use crate::error::CompileResult;
use crate::param::Param;
use crate::stmt::Statement;
use std::fmt;
use tokio_postgres::types::ToSql;

/// SELECT statement.
///
/// Renders one line per clause in a fixed order: SELECT, FROM (with its join
/// chain), WHERE, GROUP BY, HAVING, ORDER BY, LIMIT/OFFSET.
#[derive(Clone, Debug, Default)]
pub struct SelectStmt {
    /// Selected expressions (`*` when empty)
    pub columns: Vec<Clause>,
    /// A table or a join chain
    pub from: Option<Box<Clause>>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Vec<ColumnElem>,
    pub having: Vec<HavingClause>,
    pub order_by: Option<OrderByClause>,
    pub offset: Option<u64>,
    pub count: Option<u64>,
    /// Build error (reported at compile time)
    pub build_error: Option<String>,
}

impl SelectStmt {
    pub fn new<I, C>(columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace the selected expressions.
    pub fn select<I, C>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Clause>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the FROM source. Joins added afterwards hang off this source.
    pub fn from(mut self, source: impl Into<Clause>) -> Self {
        self.from = Some(Box::new(source.into()));
        self
    }

    /// Name of the table unqualified columns belong to.
    pub fn default_table_name(&self) -> Option<&str> {
        self.from.as_deref().and_then(Clause::default_name)
    }

    // ==================== WHERE ====================

    /// Set the WHERE condition, replacing any previous one.
    pub fn where_(mut self, clause: impl Into<Clause>) -> Self {
        self.where_clause = Some(WhereClause::new(clause));
        self
    }

    /// Fold `clause` into the WHERE condition with AND (or set it if absent).
    pub fn and_where(mut self, clause: impl Into<Clause>) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.and([clause]),
            None => WhereClause::new(clause),
        });
        self
    }

    /// Fold `clause` into the WHERE condition with OR (or set it if absent).
    pub fn or_where(mut self, clause: impl Into<Clause>) -> Self {
        self.where_clause = Some(match self.where_clause.take() {
            Some(existing) => existing.or([clause]),
            None => WhereClause::new(clause),
        });
        self
    }

    // ==================== JOIN ====================

    /// Add INNER JOIN.
    pub fn inner_join(self, table: TableElem, on: impl Into<Clause>) -> Self {
        self.join(JoinType::Inner, table, Some(on.into()))
    }

    /// Add LEFT OUTER JOIN.
    pub fn left_join(self, table: TableElem, on: impl Into<Clause>) -> Self {
        self.join(JoinType::Left, table, Some(on.into()))
    }

    /// Add RIGHT OUTER JOIN.
    pub fn right_join(self, table: TableElem, on: impl Into<Clause>) -> Self {
        self.join(JoinType::Right, table, Some(on.into()))
    }

    /// Add CROSS JOIN.
    pub fn cross_join(self, table: TableElem) -> Self {
        self.join(JoinType::Cross, table, None)
    }

    fn join(mut self, join_type: JoinType, table: TableElem, on: Option<Clause>) -> Self {
        match self.from.take() {
            Some(left) => {
                self.from = Some(Box::new(Clause::Join(JoinClause {
                    join_type,
                    left,
                    right: table,
                    on: on.map(Box::new),
                })));
            }
            None => {
                self.build_error = Some(format!("{join_type} {} requires a FROM table", table.name));
            }
        }
        self
    }

    // ==================== GROUP BY / HAVING ====================

    /// Append GROUP BY columns.
    pub fn group_by(mut self, columns: impl IntoIterator<Item = ColumnElem>) -> Self {
        self.group_by.extend(columns);
        self
    }

    /// Append `HAVING <aggregate> <op> <value>`.
    pub fn having<T: ToSql + Send + Sync + 'static>(
        mut self,
        aggregate: AggregateClause,
        op: impl Into<String>,
        value: T,
    ) -> Self {
        self.having.push(HavingClause {
            aggregate,
            op: op.into(),
            value: Param::new(value),
        });
        self
    }

    // ==================== ORDER BY ====================

    /// Set ORDER BY columns, ascending.
    pub fn order_by(mut self, columns: impl IntoIterator<Item = ColumnElem>) -> Self {
        self.order_by = Some(OrderByClause {
            columns: columns.into_iter().collect(),
            direction: Direction::Asc,
        });
        self
    }

    /// Sort the current ORDER BY ascending. No effect without `order_by`.
    pub fn asc(mut self) -> Self {
        if let Some(order_by) = self.order_by.as_mut() {
            order_by.direction = Direction::Asc;
        }
        self
    }

    /// Sort the current ORDER BY descending. No effect without `order_by`.
    pub fn desc(mut self) -> Self {
        if let Some(order_by) = self.order_by.as_mut() {
            order_by.direction = Direction::Desc;
        }
        self
    }

    // ==================== LIMIT / OFFSET ====================

    /// Set both offset and row count: `LIMIT <count> OFFSET <offset>`.
    pub fn limit(mut self, offset: u64, count: u64) -> Self {
        self.offset = Some(offset);
        self.count = Some(count);
        self
    }

    /// Set the offset. LIMIT/OFFSET is rendered only once `count` is set too.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the row count. LIMIT/OFFSET is rendered only once `offset` is set too.
    pub fn count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }
}

impl Statement for SelectStmt {
    fn compile_root(&self, ctx: &mut CompilerContext<'_>) -> CompileResult<String> {
        ctx.compiler().visit_select(ctx, self)
    }
}

/// Kind of JOIN.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Cross,
}

impl JoinType {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT OUTER JOIN",
            JoinType::Right => "RIGHT OUTER JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `<left>\n<JOIN TYPE> <right>[ ON <on>]`
///
/// `left` is a table or another join, so successive joins form a chain.
#[derive(Clone, Debug)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub left: Box<Clause>,
    pub right: TableElem,
    pub on: Option<Box<Clause>>,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// `ORDER BY <columns> ASC|DESC`
#[derive(Clone, Debug)]
pub struct OrderByClause {
    pub columns: Vec<ColumnElem>,
    pub direction: Direction,
}

/// `HAVING <aggregate> <op> <placeholder>`
#[derive(Clone, Debug)]
pub struct HavingClause {
    pub aggregate: AggregateClause,
    pub op: String,
    pub value: Param,
}
