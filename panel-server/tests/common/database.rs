use std::path::PathBuf;
use tempfile::TempDir;

/// Schema every test database starts from
pub const BASE_SCHEMA: &str = "
    CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        score INTEGER,
        avatar BLOB
    );
    CREATE TABLE audit_log (message TEXT);
    INSERT INTO audit_log VALUES ('created');
";

/// A SQLite file in its own temporary directory
pub struct TestDatabase {
    _dir: TempDir,
    path: PathBuf,
}

#[allow(dead_code)]
impl TestDatabase {
    /// Base schema plus `user_count` users with descending scores
    pub fn new(user_count: usize) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("panel.db");

        let conn = rusqlite::Connection::open(&path).expect("create database");
        conn.execute_batch(BASE_SCHEMA).expect("apply schema");
        for i in 1..=user_count {
            conn.execute(
                "INSERT INTO users (id, name, score) VALUES (?1, ?2, ?3)",
                rusqlite::params![i as i64, format!("user{:02}", i), (user_count - i) as i64 * 10],
            )
            .expect("insert user");
        }

        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &str {
        self.path.to_str().expect("utf-8 temp path")
    }

    /// Direct connection for arranging and checking state behind the API
    pub fn connect(&self) -> rusqlite::Connection {
        rusqlite::Connection::open(&self.path).expect("open database")
    }

    /// A path in the same directory that does not exist
    pub fn missing_path(&self) -> String {
        self.path
            .with_file_name("missing.db")
            .to_string_lossy()
            .into_owned()
    }
}
