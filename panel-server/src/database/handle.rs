use crate::error::{AppError, AppResult};
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::path::Path;
use std::time::Duration;

const UNAVAILABLE_MESSAGE: &str = "Database file not found or inaccessible.";

/// One open connection to one database file, scoped to a single request.
///
/// The file is never created: a missing path fails instead of leaving an
/// empty database behind.
pub struct DbHandle {
    conn: Connection,
    path: String,
}

impl DbHandle {
    pub fn open(path: &str, busy_timeout: Duration) -> AppResult<Self> {
        if path.trim().is_empty() {
            return Err(AppError::DatabaseUnavailable(
                "Database path is required.".to_string(),
            ));
        }

        match std::fs::metadata(Path::new(path)) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => {
                tracing::warn!("Database path is not a regular file: {}", path);
                return Err(AppError::DatabaseUnavailable(UNAVAILABLE_MESSAGE.to_string()));
            }
            Err(e) => {
                tracing::warn!("Database file {} is not accessible: {}", path, e);
                return Err(AppError::DatabaseUnavailable(UNAVAILABLE_MESSAGE.to_string()));
            }
        }

        // No URI flag: the checked path is the file that gets opened
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(path, flags).map_err(|e| match e {
            rusqlite::Error::SqliteFailure(ref err, _) if err.code == ErrorCode::CannotOpen => {
                tracing::warn!("Cannot open database {}: {}", path, e);
                AppError::DatabaseUnavailable(UNAVAILABLE_MESSAGE.to_string())
            }
            other => AppError::Internal(format!("Failed to open database: {}", other)),
        })?;

        conn.busy_timeout(busy_timeout)?;

        tracing::debug!("Opened database {}", path);

        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Close explicitly so failures are logged rather than silently dropped
    pub fn close(self) {
        let path = self.path;
        if let Err((_conn, e)) = self.conn.close() {
            tracing::warn!("Failed to close database {}: {}", path, e);
        }
    }
}

/// Open `path`, run `f`, and close the handle on every exit path.
///
/// On panic the handle is dropped during unwinding, which also closes it.
pub fn with_handle<T, F>(path: &str, busy_timeout: Duration, f: F) -> AppResult<T>
where
    F: FnOnce(&DbHandle) -> AppResult<T>,
{
    let handle = DbHandle::open(path, busy_timeout)?;
    let result = f(&handle);
    handle.close();
    result
}

/// Check that `path` names a database we can open
pub fn probe(path: &str, busy_timeout: Duration) -> AppResult<()> {
    with_handle(path, busy_timeout, |handle| {
        // Touch the schema so a non-database file is caught here
        handle
            .conn()
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(|e| {
                tracing::warn!("Probe of {} failed: {}", path, e);
                AppError::DatabaseUnavailable(UNAVAILABLE_MESSAGE.to_string())
            })?;
        Ok(())
    })
}
