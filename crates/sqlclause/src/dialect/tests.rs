use super::*;
use crate::clause::TableElem;
use crate::stmt::Statement;

#[test]
fn escaping_is_off_by_default() {
    assert_eq!(DefaultDialect::new().escape("users"), "users");
    assert_eq!(PostgresDialect::new().escape("users"), "users");
    assert_eq!(MysqlDialect::new().escape("users"), "users");
    assert_eq!(SqliteDialect::new().escape("users"), "users");
}

#[test]
fn escaping_quotes_per_dialect() {
    assert_eq!(DefaultDialect::new().with_escaping(true).escape("id"), "\"id\"");
    assert_eq!(PostgresDialect::new().with_escaping(true).escape("id"), "\"id\"");
    assert_eq!(SqliteDialect::new().with_escaping(true).escape("id"), "\"id\"");
    assert_eq!(MysqlDialect::new().with_escaping(true).escape("id"), "`id`");
}

#[test]
fn escaping_doubles_embedded_quotes() {
    assert_eq!(
        PostgresDialect::new().with_escaping(true).escape("we\"ird"),
        "\"we\"\"ird\""
    );
    assert_eq!(
        MysqlDialect::new().with_escaping(true).escape("we`ird"),
        "`we``ird`"
    );
}

#[test]
fn escaped_columns_in_statement() {
    let users = TableElem::new("users");
    let orders = TableElem::new("orders");
    let stmt = users
        .select([users.c("id"), orders.c("total")])
        .inner_join(orders.clone(), users.c("id").eq_column(&orders.c("user_id")));

    let compiled = stmt
        .build(&mut PostgresDialect::new().with_escaping(true))
        .unwrap();
    assert_eq!(
        compiled.sql,
        "SELECT \"id\", \"orders\".\"total\"\n\
         FROM \"users\"\n\
         INNER JOIN \"orders\" ON \"id\" = \"orders\".\"user_id\""
    );
}

#[test]
fn placeholders_per_dialect() {
    let mut pg = PostgresDialect::new();
    assert_eq!(pg.placeholder(), "$1");
    assert_eq!(pg.placeholder(), "$2");
    pg.reset();
    assert_eq!(pg.placeholder(), "$1");

    let mut mysql = MysqlDialect::new();
    assert_eq!(mysql.placeholder(), "?");
    assert_eq!(mysql.placeholder(), "?");

    assert_eq!(DefaultDialect::new().placeholder(), "?");
    assert_eq!(SqliteDialect::new().placeholder(), "?");
}

#[test]
fn dialect_kind_from_str() {
    assert_eq!("postgres".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
    assert_eq!("PostgreSQL".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
    assert_eq!("pg".parse::<DialectKind>().unwrap(), DialectKind::Postgres);
    assert_eq!("mysql".parse::<DialectKind>().unwrap(), DialectKind::Mysql);
    assert_eq!("sqlite3".parse::<DialectKind>().unwrap(), DialectKind::Sqlite);
    assert_eq!("default".parse::<DialectKind>().unwrap(), DialectKind::Default);

    let err = "oracle".parse::<DialectKind>().unwrap_err();
    assert!(matches!(err, CompileError::UnknownDialect(ref name) if name == "oracle"));
    assert_eq!(err.to_string(), "Unknown dialect: oracle");
}

#[test]
fn dialect_kind_display_round_trips_names() {
    for kind in [
        DialectKind::Default,
        DialectKind::Postgres,
        DialectKind::Mysql,
        DialectKind::Sqlite,
    ] {
        assert_eq!(kind.to_string().parse::<DialectKind>().unwrap(), kind);
    }
}

#[test]
fn new_dialect_by_name() {
    assert_eq!(new_dialect("postgres").unwrap().name(), "postgres");
    assert_eq!(new_dialect("mysql").unwrap().name(), "mysql");
    assert_eq!(new_dialect("sqlite").unwrap().name(), "sqlite");
    assert_eq!(new_dialect("default").unwrap().name(), "default");
    assert!(new_dialect("").is_err());
}

#[test]
fn config_from_json() {
    let config: DialectConfig =
        serde_json::from_str(r#"{"kind": "mysql", "escaping": true}"#).unwrap();
    assert_eq!(config, DialectConfig::new(DialectKind::Mysql).with_escaping(true));

    let dialect = config.build();
    assert_eq!(dialect.name(), "mysql");
    assert_eq!(dialect.escape("id"), "`id`");
}

#[test]
fn config_defaults() {
    let config: DialectConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.kind, DialectKind::Default);
    assert!(!config.escaping);
    assert_eq!(config.build().escape("id"), "id");
}

#[test]
fn config_from_toml_section() {
    #[derive(serde::Deserialize)]
    struct AppConfig {
        sql: DialectConfig,
    }

    let app: AppConfig = toml::from_str(
        r#"
        [sql]
        kind = "postgresql"
        escaping = true
        "#,
    )
    .unwrap();
    assert_eq!(app.sql.kind, DialectKind::Postgres);

    let mut dialect = app.sql.build();
    assert_eq!(dialect.escape("id"), "\"id\"");
    assert_eq!(dialect.placeholder(), "$1");
}

#[test]
fn config_rejects_unknown_kind() {
    let result: Result<DialectConfig, _> = serde_json::from_str(r#"{"kind": "oracle"}"#);
    assert!(result.is_err());
}

#[test]
fn config_kind_matches_from_str_case_insensitively() {
    for name in ["Postgres", "PG", "PostgreSQL", "postgres"] {
        let json: DialectConfig =
            serde_json::from_str(&format!(r#"{{"kind": "{name}"}}"#)).unwrap();
        assert_eq!(json.kind, DialectKind::Postgres);
        assert_eq!(name.parse::<DialectKind>().unwrap(), json.kind);

        let toml: DialectConfig = toml::from_str(&format!("kind = \"{name}\"")).unwrap();
        assert_eq!(toml.kind, DialectKind::Postgres);
    }

    let sqlite: DialectConfig = toml::from_str("kind = \"SQLite3\"").unwrap();
    assert_eq!(sqlite.kind, DialectKind::Sqlite);

    let err = toml::from_str::<DialectConfig>("kind = \"Oracle\"").unwrap_err();
    assert!(err.to_string().contains("Unknown dialect: Oracle"));
}

// ==================== Upsert ====================

fn upsert_users() -> crate::stmt::UpsertStmt {
    let users = TableElem::new("users");
    users
        .upsert()
        .value("id", 1i64)
        .value("name", "alice")
        .value("email", "a@example.com")
}

#[test]
fn postgres_upsert() {
    let users = TableElem::new("users");
    let stmt = upsert_users()
        .on_conflict([users.c("id")])
        .returning([users.c("id")]);

    let compiled = stmt.build(&mut PostgresDialect::new()).unwrap();
    assert_eq!(
        compiled.sql,
        "INSERT INTO users(email, id, name)\n\
         VALUES($1, $2, $3)\n\
         ON CONFLICT (id) DO UPDATE SET email = EXCLUDED.email, name = EXCLUDED.name\n\
         RETURNING id"
    );
    assert_eq!(compiled.params.len(), 3);
}

#[test]
fn postgres_upsert_only_keys_does_nothing() {
    let users = TableElem::new("users");
    let stmt = users.upsert().value("id", 1i64).on_conflict([users.c("id")]);
    assert_eq!(
        stmt.build(&mut PostgresDialect::new()).unwrap().sql,
        "INSERT INTO users(id)\nVALUES($1)\nON CONFLICT (id) DO NOTHING"
    );
}

#[test]
fn postgres_upsert_needs_keys() {
    let err = upsert_users().build(&mut PostgresDialect::new()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn mysql_upsert() {
    let users = TableElem::new("users");
    let stmt = upsert_users().on_conflict([users.c("id")]);
    assert_eq!(
        stmt.build(&mut MysqlDialect::new()).unwrap().sql,
        "INSERT INTO users(email, id, name)\n\
         VALUES(?, ?, ?)\n\
         ON DUPLICATE KEY UPDATE email = VALUES(email), name = VALUES(name)"
    );
}

#[test]
fn mysql_upsert_without_updates_ignores() {
    let users = TableElem::new("users");
    let stmt = users.upsert().value("id", 1i64).on_conflict([users.c("id")]);
    assert_eq!(
        stmt.build(&mut MysqlDialect::new()).unwrap().sql,
        "INSERT IGNORE INTO users(id)\nVALUES(?)"
    );
}

#[test]
fn mysql_upsert_rejects_returning() {
    let users = TableElem::new("users");
    let err = upsert_users()
        .returning([users.c("id")])
        .build(&mut MysqlDialect::new())
        .unwrap_err();
    assert!(err.is_unsupported());
    assert_eq!(
        err.to_string(),
        "UPSERT ... RETURNING is not implemented in the mysql compiler"
    );
}

#[test]
fn sqlite_upsert() {
    let users = TableElem::new("users");
    let stmt = upsert_users().returning([users.c("id")]);
    assert_eq!(
        stmt.build(&mut SqliteDialect::new()).unwrap().sql,
        "REPLACE INTO users(email, id, name)\nVALUES(?, ?, ?)\nRETURNING id"
    );
}

#[test]
fn upsert_without_values_is_rejected_everywhere() {
    let users = TableElem::new("users");
    let stmt = users.upsert().on_conflict([users.c("id")]);

    assert!(stmt.build(&mut PostgresDialect::new()).unwrap_err().is_validation());
    assert!(stmt.build(&mut MysqlDialect::new()).unwrap_err().is_validation());
    assert!(stmt.build(&mut SqliteDialect::new()).unwrap_err().is_validation());
    assert!(stmt.build(&mut DefaultDialect::new()).unwrap_err().is_unsupported());
}

#[test]
fn escaped_upsert() {
    let users = TableElem::new("users");
    let stmt = users
        .upsert()
        .value("id", 1i64)
        .value("name", "bob")
        .on_conflict([users.c("id")]);
    assert_eq!(
        stmt.build(&mut MysqlDialect::new().with_escaping(true)).unwrap().sql,
        "INSERT INTO `users`(`id`, `name`)\n\
         VALUES(?, ?)\n\
         ON DUPLICATE KEY UPDATE `name` = VALUES(`name`)"
    );
}

#[test]
fn non_upsert_statements_render_the_same_across_dialects() {
    let users = TableElem::new("users");
    let stmt = users.delete().where_(users.c("id").eq(1));
    for name in ["default", "mysql", "sqlite"] {
        let mut dialect = new_dialect(name).unwrap();
        assert_eq!(
            stmt.build(&mut *dialect).unwrap().sql,
            "DELETE FROM users\nWHERE id = ?"
        );
    }
}
