#![allow(dead_code)]

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pushkind_site::db::{ConnectionOptions, DbPool, establish_connection_pool_with};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Throwaway SQLite database with every migration applied. The file lives in
/// a temporary directory removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 path").to_string();

        let options = ConnectionOptions {
            enable_wal: false,
            ..ConnectionOptions::default()
        };
        let pool = establish_connection_pool_with(&url, options).expect("build pool");

        let mut conn = pool.get().expect("get connection");
        let conn: &mut SqliteConnection = &mut conn;
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
