// src/db/mod.rs
//
// Database module
//
// Provides:
// - The favorites contract (table, columns, URI layout)
// - Connection pooling
// - Versioned schema lifecycle
// - The process-wide database handle

pub mod connection;
pub mod contract;
pub mod migrations;
pub mod store;

pub use connection::{
    create_connection_pool, create_memory_pool, database_path_in, default_database_path,
    get_connection, ConnectionPool, PooledConn,
};

pub use migrations::{
    get_database_stats, get_schema_version, initialize_database, verify_database_integrity,
    DatabaseStats,
};

pub use store::FavoritesDatabase;
