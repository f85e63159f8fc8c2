// src/db/connection.rs
//
// Database connection management
//
// Connections are drawn from a pool per provider operation and returned
// when the operation ends.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::{Path, PathBuf};

use crate::db::contract::DATABASE_NAME;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// `{data_dir}/popmovies/favorites.db`, creating the directory
pub fn default_database_path() -> AppResult<PathBuf> {
    let data = dirs::data_dir()
        .ok_or_else(|| AppError::Other("No data directory on this platform".to_string()))?;
    let path = database_path_in(&data);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(path)
}

/// Database file location under a data directory
pub fn database_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("popmovies").join(DATABASE_NAME)
}

/// Create a connection pool over a database file
///
/// - WAL journal so readers do not block the single writer
/// - Busy timeout set to avoid immediate SQLITE_BUSY errors
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(8)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Create a single-connection pool over a private in-memory database
///
/// Every in-memory connection is its own database, so the pool is held to
/// one connection that never expires.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory();

    let pool = Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create memory pool: {}", e)))?;

    Ok(pool)
}

/// Check a connection out for the length of one operation
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

#[cfg(test)]
pub(crate) fn scratch_connection() -> rusqlite::Connection {
    rusqlite::Connection::open_in_memory().expect("in-memory sqlite")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_has_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = database_path_in(dir.path());

        assert_eq!(path, dir.path().join("popmovies").join("favorites.db"));
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_file_pool_enables_wal() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("nested").join("favorites.db")).unwrap();
        let conn = get_connection(&pool).unwrap();

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_memory_pool_keeps_state_between_checkouts() {
        let pool = create_memory_pool().unwrap();
        {
            let conn = get_connection(&pool).unwrap();
            conn.execute_batch("CREATE TABLE t (x INTEGER); INSERT INTO t VALUES (1);")
                .unwrap();
        }
        let conn = get_connection(&pool).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

}
