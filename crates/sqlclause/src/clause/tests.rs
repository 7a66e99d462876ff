use super::*;
use crate::compiler::compile;
use crate::dialect::{DefaultDialect, PostgresDialect};

fn as_default_sql(clause: impl Into<Clause>) -> String {
    compile(&clause.into(), &mut DefaultDialect::new())
        .unwrap()
        .sql
}

fn param_strings(clause: impl Into<Clause>) -> Vec<String> {
    let compiled = compile(&clause.into(), &mut DefaultDialect::new()).unwrap();
    compiled.params.iter().map(|p| format!("{p:?}")).collect()
}

#[test]
fn where_and() {
    assert_eq!(
        as_default_sql(WhereClause::new(text("X")).and([text("Y")])),
        "WHERE (X AND Y)"
    );
    assert_eq!(
        as_default_sql(WhereClause::new(text("X")).and([text("Y"), text("Z")])),
        "WHERE (X AND Y AND Z)"
    );
}

#[test]
fn where_or() {
    assert_eq!(
        as_default_sql(WhereClause::new(text("X")).or([text("Y")])),
        "WHERE (X OR Y)"
    );
    assert_eq!(
        as_default_sql(WhereClause::new(text("X")).or([text("Y"), text("Z")])),
        "WHERE (X OR Y OR Z)"
    );
}

#[test]
fn where_chaining_nests_instead_of_flattening() {
    let where_clause = WhereClause::new(text("X")).and([text("A")]).or([text("B")]);
    assert_eq!(as_default_sql(where_clause), "WHERE ((X AND A) OR B)");

    let where_clause = WhereClause::new(text("X")).or([text("A")]).and([text("B")]);
    assert_eq!(as_default_sql(where_clause), "WHERE ((X OR A) AND B)");
}

#[test]
fn where_without_folding() {
    assert_eq!(as_default_sql(WhereClause::new(text("X"))), "WHERE X");
}

#[test]
fn combiner_wraps_group_once() {
    let clause = and([text("a = 1"), or([text("b = 2"), text("c = 3")])]);
    assert_eq!(as_default_sql(clause), "(a = 1 AND (b = 2 OR c = 3))");
}

#[test]
fn empty_combiner_renders_empty_parens() {
    assert_eq!(as_default_sql(and(Vec::<Clause>::new())), "()");
    assert_eq!(as_default_sql(or(Vec::<Clause>::new())), "()");
}

#[test]
fn text_passes_through() {
    assert_eq!(as_default_sql(text("NOW()")), "NOW()");
}

#[test]
fn bind_renders_placeholder_and_keeps_value() {
    assert_eq!(as_default_sql(bind(5)), "?");
    assert_eq!(param_strings(bind(5)), vec!["5"]);
    assert_eq!(param_strings(bind("alice")), vec!["\"alice\""]);
}

#[test]
fn column_outside_statement_is_qualified() {
    let users = TableElem::new("users");
    assert_eq!(as_default_sql(users.c("id")), "users.id");
}

#[test]
fn column_without_table_is_bare() {
    assert_eq!(as_default_sql(ColumnElem::new("", "id")), "id");
}

#[test]
fn table_renders_name() {
    assert_eq!(as_default_sql(TableElem::new("users")), "users");
}

#[test]
fn comparisons() {
    let users = TableElem::new("users");
    assert_eq!(as_default_sql(users.c("age").eq(18)), "users.age = ?");
    assert_eq!(as_default_sql(users.c("age").not_eq(18)), "users.age != ?");
    assert_eq!(as_default_sql(users.c("age").gt(18)), "users.age > ?");
    assert_eq!(as_default_sql(users.c("age").gte(18)), "users.age >= ?");
    assert_eq!(as_default_sql(users.c("age").lt(18)), "users.age < ?");
    assert_eq!(as_default_sql(users.c("age").lte(18)), "users.age <= ?");
    assert_eq!(as_default_sql(users.c("name").like("a%")), "users.name LIKE ?");
    assert_eq!(
        as_default_sql(users.c("name").not_like("a%")),
        "users.name NOT LIKE ?"
    );
    assert_eq!(
        as_default_sql(users.c("deleted_at").is_null()),
        "users.deleted_at IS NULL"
    );
    assert_eq!(
        as_default_sql(users.c("deleted_at").is_not_null()),
        "users.deleted_at IS NOT NULL"
    );
}

#[test]
fn in_list_binds_every_value() {
    let users = TableElem::new("users");
    let clause = users.c("id").in_(vec![1, 2, 3]);
    assert_eq!(as_default_sql(clause.clone()), "users.id IN (?, ?, ?)");
    assert_eq!(param_strings(clause.clone()), vec!["1", "2", "3"]);

    let compiled = compile(&clause, &mut PostgresDialect::new()).unwrap();
    assert_eq!(compiled.sql, "users.id IN ($1, $2, $3)");
}

#[test]
fn empty_in_list_semantics() {
    let users = TableElem::new("users");
    assert_eq!(as_default_sql(users.c("id").in_(Vec::<i32>::new())), "1=0");
    assert_eq!(as_default_sql(users.c("id").not_in(Vec::<i32>::new())), "1=1");
    assert_eq!(
        as_default_sql(users.c("id").not_in(vec![4])),
        "users.id NOT IN (?)"
    );
}

#[test]
fn list_alias_and_aggregates() {
    let users = TableElem::new("users");
    assert_eq!(as_default_sql(list([text("1"), text("2")])), "(1, 2)");
    assert_eq!(
        as_default_sql(alias("total", count(users.c("id")))),
        "COUNT(users.id) AS total"
    );
    assert_eq!(as_default_sql(sum(users.c("score"))), "SUM(users.score)");
    assert_eq!(as_default_sql(avg(users.c("score"))), "AVG(users.score)");
    assert_eq!(as_default_sql(min(users.c("score"))), "MIN(users.score)");
    assert_eq!(as_default_sql(max(users.c("score"))), "MAX(users.score)");
}

#[test]
fn binary_with_arbitrary_operands() {
    assert_eq!(
        as_default_sql(binary(text("a"), "||", bind("b"))),
        "a || ?"
    );
}

#[test]
fn binds_follow_placeholder_order_in_nested_groups() {
    let users = TableElem::new("users");
    let clause = or([
        and([users.c("a").eq(1), users.c("b").eq(2)]),
        users.c("c").in_(vec![3, 4]),
        users.c("d").eq(5),
    ]);

    let compiled = compile(&clause, &mut PostgresDialect::new()).unwrap();
    assert_eq!(
        compiled.sql,
        "((users.a = $1 AND users.b = $2) OR users.c IN ($3, $4) OR users.d = $5)"
    );
    let params: Vec<String> = compiled.params.iter().map(|p| format!("{p:?}")).collect();
    assert_eq!(params, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn default_name_of_sources() {
    let users = TableElem::new("users");
    let orders = TableElem::new("orders");
    assert_eq!(Clause::from(users.clone()).default_name(), Some("users"));

    let select = users
        .select([users.c("id")])
        .inner_join(orders.clone(), users.c("id").eq_column(&orders.c("user_id")));
    assert_eq!(select.default_table_name(), Some("users"));
    assert_eq!(text("users").default_name(), None);
}
