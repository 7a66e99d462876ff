use crate::clause::{
    AggregateClause, AliasClause, BinaryExpressionClause, BindClause, Clause, ColumnElem,
    CombinerClause, ExistsClause, ListClause, TableElem, TextClause, WhereClause,
};
use crate::compiler::CompilerContext;
use crate::error::{CompileError, CompileResult};
use crate::param::Param;
use crate::stmt::{
    DeleteStmt, HavingClause, InsertStmt, JoinClause, OrderByClause, SelectStmt, UpdateStmt,
    UpsertStmt,
};
use std::collections::BTreeMap;

/// Visitor rendering each kind of [`Clause`] to SQL.
///
/// Every method has a default body implementing ANSI SQL. A dialect provides
/// its own rule set by implementing this trait on a unit struct and
/// overriding only what differs, typically [`visit_upsert`](Self::visit_upsert).
/// Defaults recurse through `self`, so overrides also apply to nested nodes
/// reached from a default method.
pub trait Compiler: Sync {
    /// `FUNC(<clause>)`
    fn visit_aggregate(
        &self,
        ctx: &mut CompilerContext<'_>,
        aggregate: &AggregateClause,
    ) -> CompileResult<String> {
        Ok(format!("{}({})", aggregate.func, aggregate.clause.compile(ctx)?))
    }

    /// `<selectable> AS <name>`
    fn visit_alias(&self, ctx: &mut CompilerContext<'_>, alias: &AliasClause) -> CompileResult<String> {
        let selectable = alias.selectable.compile(ctx)?;
        Ok(format!("{} AS {}", selectable, ctx.escape(&alias.name)))
    }

    /// `<left> <op> <right>`
    fn visit_binary(
        &self,
        ctx: &mut CompilerContext<'_>,
        binary: &BinaryExpressionClause,
    ) -> CompileResult<String> {
        let left = binary.left.compile(ctx)?;
        let right = binary.right.compile(ctx)?;
        Ok(format!("{} {} {}", left, binary.op, right))
    }

    /// Placeholder for a bound value; the value goes to the bind list, never
    /// into the SQL text.
    fn visit_bind(&self, ctx: &mut CompilerContext<'_>, bind: &BindClause) -> CompileResult<String> {
        Ok(ctx.bind(bind.value.clone()))
    }

    /// Column name, prefixed with its table unless it belongs to the default
    /// table outside of a sub-query.
    fn visit_column(&self, ctx: &mut CompilerContext<'_>, column: &ColumnElem) -> CompileResult<String> {
        let mut sql = String::new();
        let qualify = ctx.in_sub_query() || ctx.default_table_name() != column.table;
        if qualify && !column.table.is_empty() {
            sql.push_str(&ctx.escape(&column.table));
            sql.push('.');
        }
        sql.push_str(&ctx.escape(&column.name));
        Ok(sql)
    }

    /// `(a AND b AND ...)` / `(a OR b OR ...)`
    fn visit_combiner(
        &self,
        ctx: &mut CompilerContext<'_>,
        combiner: &CombinerClause,
    ) -> CompileResult<String> {
        let parts = compile_all(ctx, &combiner.clauses)?;
        let separator = format!(" {} ", combiner.operator.as_str());
        Ok(format!("({})", parts.join(&separator)))
    }

    /// `DELETE FROM <table>[\n<where>][\nRETURNING <columns>]`
    fn visit_delete(&self, ctx: &mut CompilerContext<'_>, delete: &DeleteStmt) -> CompileResult<String> {
        ctx.with_statement(&delete.table.name, |ctx| {
            let mut sql = format!("DELETE FROM {}", self.visit_table(ctx, &delete.table)?);
            if let Some(where_clause) = &delete.where_clause {
                sql.push('\n');
                sql.push_str(&self.visit_where(ctx, where_clause)?);
            }
            sql.push_str(&self.returning(ctx, &delete.returning)?);
            Ok(sql)
        })
    }

    /// `[NOT ]EXISTS(<select>)`, rendered in sub-query scope.
    fn visit_exists(&self, ctx: &mut CompilerContext<'_>, exists: &ExistsClause) -> CompileResult<String> {
        let inner = ctx.with_sub_query(|ctx| exists.select.compile(ctx))?;
        let not = if exists.not { "NOT " } else { "" };
        // a nested SELECT brings its own parentheses
        if matches!(*exists.select, Clause::Select(_)) {
            Ok(format!("{not}EXISTS{inner}"))
        } else {
            Ok(format!("{not}EXISTS({inner})"))
        }
    }

    /// `HAVING <aggregate> <op> <placeholder>`
    fn visit_having(&self, ctx: &mut CompilerContext<'_>, having: &HavingClause) -> CompileResult<String> {
        let aggregate = self.visit_aggregate(ctx, &having.aggregate)?;
        let placeholder = ctx.bind(having.value.clone());
        Ok(format!("HAVING {} {} {}", aggregate, having.op, placeholder))
    }

    /// `INSERT INTO <table>(<columns>)\nVALUES(<placeholders>)[\nRETURNING ...]`
    fn visit_insert(&self, ctx: &mut CompilerContext<'_>, insert: &InsertStmt) -> CompileResult<String> {
        ctx.with_statement(&insert.table.name, |ctx| {
            let table = self.visit_table(ctx, &insert.table)?;
            let (columns, placeholders) = self.value_lists(ctx, &insert.values)?;
            let mut sql = format!(
                "INSERT INTO {}({})\nVALUES({})",
                table,
                columns.join(", "),
                placeholders.join(", ")
            );
            sql.push_str(&self.returning(ctx, &insert.returning)?);
            Ok(sql)
        })
    }

    /// `<left>\n<JOIN TYPE> <right>[ ON <on>]`
    fn visit_join(&self, ctx: &mut CompilerContext<'_>, join: &JoinClause) -> CompileResult<String> {
        let left = join.left.compile(ctx)?;
        let right = self.visit_table(ctx, &join.right)?;
        let mut sql = format!("{}\n{} {}", left, join.join_type.as_str(), right);
        if let Some(on) = &join.on {
            sql.push_str(" ON ");
            sql.push_str(&on.compile(ctx)?);
        }
        Ok(sql)
    }

    /// A single label (column or table name), escaped.
    fn visit_label(&self, ctx: &mut CompilerContext<'_>, label: &str) -> CompileResult<String> {
        Ok(ctx.escape(label))
    }

    /// `(a, b, ...)`
    fn visit_list(&self, ctx: &mut CompilerContext<'_>, list: &ListClause) -> CompileResult<String> {
        let parts = compile_all(ctx, &list.clauses)?;
        Ok(format!("({})", parts.join(", ")))
    }

    /// `ORDER BY <columns> ASC|DESC`
    fn visit_order_by(
        &self,
        ctx: &mut CompilerContext<'_>,
        order_by: &OrderByClause,
    ) -> CompileResult<String> {
        let columns = order_by
            .columns
            .iter()
            .map(|column| self.visit_column(ctx, column))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(format!(
            "ORDER BY {} {}",
            columns.join(", "),
            order_by.direction.as_str()
        ))
    }

    /// SELECT statement, one line per clause in fixed order. Clauses that are
    /// not set are left out; LIMIT/OFFSET needs both count and offset.
    ///
    /// A SELECT nested in another statement, in EXISTS or below any other
    /// clause node is a sub-select: it renders in sub-query scope, wrapped in
    /// parentheses.
    fn visit_select(&self, ctx: &mut CompilerContext<'_>, select: &SelectStmt) -> CompileResult<String> {
        if let Some(err) = &select.build_error {
            return Err(CompileError::validation(err.clone()));
        }

        if ctx.in_statement() || ctx.in_sub_query() || ctx.clause_depth() > 1 {
            // keeps the outer default table; every column is qualified anyway
            let outer = ctx.default_table_name().to_string();
            let body = ctx.with_sub_query(|ctx| {
                ctx.with_statement(&outer, |ctx| self.select_lines(ctx, select))
            })?;
            return Ok(format!("({body})"));
        }

        let default_table = select.default_table_name().unwrap_or_default().to_string();
        ctx.with_statement(&default_table, |ctx| self.select_lines(ctx, select))
    }

    /// The lines of a SELECT, joined by newlines, in the current scope.
    fn select_lines(&self, ctx: &mut CompilerContext<'_>, select: &SelectStmt) -> CompileResult<String> {
        let mut lines = Vec::new();

        let columns = compile_all(ctx, &select.columns)?;
        if columns.is_empty() {
            lines.push("SELECT *".to_string());
        } else {
            lines.push(format!("SELECT {}", columns.join(", ")));
        }

        if let Some(from) = &select.from {
            lines.push(format!("FROM {}", from.compile(ctx)?));
        }

        if let Some(where_clause) = &select.where_clause {
            lines.push(self.visit_where(ctx, where_clause)?);
        }

        if !select.group_by.is_empty() {
            let columns = select
                .group_by
                .iter()
                .map(|column| self.visit_column(ctx, column))
                .collect::<CompileResult<Vec<_>>>()?;
            lines.push(format!("GROUP BY {}", columns.join(", ")));
        }

        for having in &select.having {
            lines.push(self.visit_having(ctx, having)?);
        }

        if let Some(order_by) = &select.order_by {
            lines.push(self.visit_order_by(ctx, order_by)?);
        }

        if let (Some(offset), Some(count)) = (select.offset, select.count) {
            lines.push(format!("LIMIT {count} OFFSET {offset}"));
        }

        Ok(lines.join("\n"))
    }

    /// Table name, escaped.
    fn visit_table(&self, ctx: &mut CompilerContext<'_>, table: &TableElem) -> CompileResult<String> {
        self.visit_label(ctx, &table.name)
    }

    /// Raw SQL, as is.
    fn visit_text(&self, _ctx: &mut CompilerContext<'_>, text: &TextClause) -> CompileResult<String> {
        Ok(text.text.clone())
    }

    /// `UPDATE <table>[\nSET a = ?, ...][\n<where>][\nRETURNING ...]`
    fn visit_update(&self, ctx: &mut CompilerContext<'_>, update: &UpdateStmt) -> CompileResult<String> {
        ctx.with_statement(&update.table.name, |ctx| {
            let mut sql = format!("UPDATE {}", self.visit_table(ctx, &update.table)?);

            let mut sets = Vec::with_capacity(update.values.len());
            for (column, value) in &update.values {
                let label = self.visit_label(ctx, column)?;
                let placeholder = ctx.bind(value.clone());
                sets.push(format!("{label} = {placeholder}"));
            }
            if !sets.is_empty() {
                sql.push_str("\nSET ");
                sql.push_str(&sets.join(", "));
            }

            if let Some(where_clause) = &update.where_clause {
                sql.push('\n');
                sql.push_str(&self.visit_where(ctx, where_clause)?);
            }
            sql.push_str(&self.returning(ctx, &update.returning)?);
            Ok(sql)
        })
    }

    /// There is no ANSI upsert; dialect compilers override this.
    fn visit_upsert(&self, ctx: &mut CompilerContext<'_>, _upsert: &UpsertStmt) -> CompileResult<String> {
        Err(CompileError::unsupported("UPSERT", ctx.dialect_name()))
    }

    /// `WHERE <clause>`
    fn visit_where(&self, ctx: &mut CompilerContext<'_>, where_clause: &WhereClause) -> CompileResult<String> {
        Ok(format!("WHERE {}", where_clause.clause.compile(ctx)?))
    }

    /// Escaped column labels and their placeholders, in column-name order.
    /// Binds the values as a side effect.
    fn value_lists(
        &self,
        ctx: &mut CompilerContext<'_>,
        values: &BTreeMap<String, Param>,
    ) -> CompileResult<(Vec<String>, Vec<String>)> {
        let mut columns = Vec::with_capacity(values.len());
        let mut placeholders = Vec::with_capacity(values.len());
        for (column, value) in values {
            columns.push(self.visit_label(ctx, column)?);
            placeholders.push(ctx.bind(value.clone()));
        }
        Ok((columns, placeholders))
    }

    /// `\nRETURNING <columns>`, or nothing for an empty list.
    fn returning(&self, ctx: &mut CompilerContext<'_>, columns: &[ColumnElem]) -> CompileResult<String> {
        if columns.is_empty() {
            return Ok(String::new());
        }
        let columns = columns
            .iter()
            .map(|column| self.visit_column(ctx, column))
            .collect::<CompileResult<Vec<_>>>()?;
        Ok(format!("\nRETURNING {}", columns.join(", ")))
    }
}

/// ANSI SQL rule set: every [`Compiler`] default, no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiCompiler;

impl Compiler for AnsiCompiler {}

/// Compile `clauses` left to right.
pub fn compile_all(ctx: &mut CompilerContext<'_>, clauses: &[Clause]) -> CompileResult<Vec<String>> {
    clauses.iter().map(|clause| clause.compile(ctx)).collect()
}
