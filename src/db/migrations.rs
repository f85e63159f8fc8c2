// src/db/migrations.rs
//
// Schema lifecycle for the favorites store
//
// - Version tracked in `PRAGMA user_version`
// - Fresh database: create the table
// - Older version: drop and recreate (rows are lost, there is no ALTER path)
// - Newer version: refuse to open

use rusqlite::Connection;

use crate::db::contract::{favorites, DATABASE_VERSION};
use crate::error::{AppError, AppResult};

/// Bring the schema to [`DATABASE_VERSION`]
///
/// Safe to call on every open. Any failure here is a startup error.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    initialize_to_version(conn, DATABASE_VERSION)
}

pub(crate) fn initialize_to_version(conn: &Connection, target: i32) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == target {
        // Table may still be missing if the file was touched by something else
        create_schema(conn)?;
        return Ok(());
    }

    if current_version == 0 {
        log::info!("Creating favorites schema v{}", target);
        create_schema(conn)?;
    } else if current_version < target {
        log::warn!(
            "Upgrading favorites schema v{} -> v{}; existing favorites are dropped",
            current_version,
            target
        );
        recreate_schema(conn)?;
    } else {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, target
        )));
    }

    set_schema_version(conn, target)?;
    Ok(())
}

/// Current schema version, 0 for a fresh database
pub fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(AppError::Database)?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.pragma_update(None, "user_version", version)
        .map_err(AppError::Database)?;
    Ok(())
}

fn create_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(&favorites::create_table_sql())
        .map_err(|e| AppError::Other(format!("Failed to create favorites table: {}", e)))?;
    Ok(())
}

fn recreate_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(&favorites::drop_table_sql())
        .map_err(|e| AppError::Other(format!("Failed to drop favorites table: {}", e)))?;
    create_schema(conn)
}

/// Fail the open when `PRAGMA integrity_check` reports damage
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    match result.as_str() {
        "ok" => Ok(()),
        damage => Err(AppError::Other(format!("Favorites store is damaged: {}", damage))),
    }
}

/// Size and row count of the favorites store
pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let pragma = |name: &str| -> AppResult<i64> {
        conn.query_row(&format!("PRAGMA {}", name), [], |row| row.get(0))
            .map_err(AppError::Database)
    };
    let page_count = pragma("page_count")?;
    let page_size = pragma("page_size")?;

    let favorite_count: i64 = conn
        .query_row(
            &format!("SELECT COUNT(*) FROM {}", favorites::TABLE_NAME),
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    Ok(DatabaseStats {
        schema_version: get_schema_version(conn)?,
        size_bytes: page_count * page_size,
        page_count,
        page_size,
        favorite_count,
    })
}

#[derive(Debug)]
pub struct DatabaseStats {
    pub schema_version: i32,
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub favorite_count: i64,
}
