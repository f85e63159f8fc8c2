// src/db/store.rs
//
// The favorites database handle
//
// One instance per process: opened at startup, shared by reference, and
// closed at teardown. Callers never hold a raw connection across
// operations; they check one out of the pool per operation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::db::connection::{
    create_connection_pool, create_memory_pool, get_connection, ConnectionPool, PooledConn,
};
use crate::db::migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};
use crate::error::AppResult;

pub struct FavoritesDatabase {
    pool: Arc<ConnectionPool>,
    path: Option<PathBuf>,
}

impl FavoritesDatabase {
    /// Open (creating or upgrading) the database file at `path`
    pub fn open(path: &Path) -> AppResult<Self> {
        let pool = create_connection_pool(path)?;
        let db = Self {
            pool: Arc::new(pool),
            path: Some(path.to_path_buf()),
        };
        db.initialize()?;
        log::info!("Opened favorites database at {}", path.display());
        Ok(db)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> AppResult<Self> {
        let db = Self {
            pool: Arc::new(create_memory_pool()?),
            path: None,
        };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> AppResult<()> {
        let conn = self.connection()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)
    }

    /// Check a connection out of the pool for one operation
    pub fn connection(&self) -> AppResult<PooledConn> {
        get_connection(&self.pool)
    }

    pub fn pool(&self) -> Arc<ConnectionPool> {
        Arc::clone(&self.pool)
    }

    /// File backing the store, `None` when in memory
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn stats(&self) -> AppResult<DatabaseStats> {
        let conn = self.connection()?;
        get_database_stats(&conn)
    }

    /// Release the pool
    ///
    /// Connections still checked out by other clones of the pool are
    /// closed when those are returned.
    pub fn close(self) {
        match &self.path {
            Some(path) => log::info!("Closing favorites database at {}", path.display()),
            None => log::debug!("Closing in-memory favorites database"),
        }
        drop(self.pool);
    }
}
