use diesel::prelude::*;
use diesel::sql_types::Text;

mod common;

#[derive(QueryableByName)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_create_content_tables() {
    let test_db = common::TestDb::new("test_migrations_create_content_tables.db");
    let mut conn = test_db.pool().get().unwrap();

    let mut names: Vec<String> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_\\_%' ESCAPE '\\' AND name <> 'sqlite_sequence'",
    )
    .load::<TableName>(&mut conn)
    .unwrap()
    .into_iter()
    .map(|t| t.name)
    .collect();
    names.sort();

    assert_eq!(
        names,
        vec!["articles", "blog_posts", "events", "leads", "pdf_downloads"]
    );
}

#[test]
fn test_pragmas_are_applied_on_acquire() {
    let test_db = common::TestDb::new("test_pragmas_are_applied_on_acquire.db");
    let mut conn = test_db.pool().get().unwrap();

    #[derive(QueryableByName)]
    struct ForeignKeys {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }

    let fk = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<ForeignKeys>(&mut conn)
        .unwrap();
    assert_eq!(fk.foreign_keys, 1);
}
