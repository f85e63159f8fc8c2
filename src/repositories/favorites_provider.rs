// src/repositories/favorites_provider.rs
//
// Route-addressed CRUD over the favorites table
//
// The provider is the only writer of the table. Every committed write
// that touched at least one row publishes a `FavoritesChanged` on the
// event bus after the connection has been handed back.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::sync::Arc;

use crate::db::contract::favorites as columns;
use crate::db::{get_connection, ConnectionPool, PooledConn};
use crate::domain::ContentValues;
use crate::error::{AppError, AppResult};
use crate::events::{ChangeKind, EventBus, FavoritesChanged};
use crate::repositories::{FavoritesCursor, FavoritesRoute};

pub trait FavoritesProvider: Send + Sync {
    /// Insert one row on the collection route
    ///
    /// Returns the item URI of the new row.
    fn insert(&self, route: &FavoritesRoute, values: &ContentValues) -> AppResult<String>;

    /// Insert many rows in one transaction; nothing is kept if any row fails
    fn bulk_insert(&self, route: &FavoritesRoute, values: &[ContentValues]) -> AppResult<usize>;

    /// Read rows; on the item route the selection is replaced by the row id
    fn query(
        &self,
        route: &FavoritesRoute,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[Value],
        sort_order: Option<&str>,
    ) -> AppResult<FavoritesCursor>;

    /// Returns the number of rows changed
    fn update(
        &self,
        route: &FavoritesRoute,
        values: &ContentValues,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> AppResult<usize>;

    /// Returns the number of rows removed
    fn delete(
        &self,
        route: &FavoritesRoute,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> AppResult<usize>;
}

pub struct SqliteFavoritesProvider {
    pool: Arc<ConnectionPool>,
    event_bus: Arc<EventBus>,
}

impl SqliteFavoritesProvider {
    pub fn new(pool: Arc<ConnectionPool>, event_bus: Arc<EventBus>) -> Self {
        Self { pool, event_bus }
    }

    fn connection(&self) -> AppResult<PooledConn> {
        get_connection(&self.pool)
    }

    fn notify(&self, route: FavoritesRoute, kind: ChangeKind, rows_affected: usize) {
        self.event_bus
            .emit(FavoritesChanged::new(route, kind, rows_affected));
    }

    /// Insert and return the new row id; 0 rows written is a failure
    fn insert_row(conn: &Connection, values: &ContentValues) -> AppResult<i64> {
        if values.is_empty() {
            return Err(AppError::InsertFailed(columns::content_uri()));
        }
        validate_columns(values.columns())?;

        let names: Vec<&str> = values.columns().collect();
        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            columns::TABLE_NAME,
            names.join(", "),
            placeholders
        );

        let written = conn.execute(&sql, params_from_iter(values.iter().map(|(_, v)| v)))?;
        let row_id = conn.last_insert_rowid();

        if written == 0 || row_id <= 0 {
            return Err(AppError::InsertFailed(columns::content_uri()));
        }
        Ok(row_id)
    }
}

impl FavoritesProvider for SqliteFavoritesProvider {
    fn insert(&self, route: &FavoritesRoute, values: &ContentValues) -> AppResult<String> {
        require_collection(route)?;

        let row_id = {
            let conn = self.connection()?;
            Self::insert_row(&conn, values)?
        };

        log::debug!("Inserted favorite row {}", row_id);
        self.notify(FavoritesRoute::Collection, ChangeKind::Insert, 1);

        Ok(columns::item_uri(row_id))
    }

    fn bulk_insert(&self, route: &FavoritesRoute, values: &[ContentValues]) -> AppResult<usize> {
        require_collection(route)?;

        let inserted = {
            let mut conn = self.connection()?;
            let tx = conn.transaction()?;
            let mut inserted = 0;
            for row in values {
                // An error here drops `tx`, which rolls the whole batch back
                Self::insert_row(&tx, row)?;
                inserted += 1;
            }
            tx.commit()?;
            inserted
        };

        log::debug!("Bulk inserted {} favorites", inserted);
        if inserted > 0 {
            self.notify(FavoritesRoute::Collection, ChangeKind::BulkInsert, inserted);
        }

        Ok(inserted)
    }

    fn query(
        &self,
        route: &FavoritesRoute,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[Value],
        sort_order: Option<&str>,
    ) -> AppResult<FavoritesCursor> {
        let column_list = match projection {
            Some(cols) if !cols.is_empty() => {
                validate_columns(cols.iter().copied())?;
                cols.join(", ")
            }
            _ => "*".to_string(),
        };

        let (where_clause, args) = route_filter(route, selection, selection_args);

        let mut sql = format!("SELECT {} FROM {}", column_list, columns::TABLE_NAME);
        if let Some(clause) = where_clause {
            sql.push_str(&format!(" WHERE {}", clause));
        }
        if let Some(order) = sort_order.filter(|o| !o.trim().is_empty()) {
            validate_sort_order(order)?;
            sql.push_str(&format!(" ORDER BY {}", order));
        }

        let (names, rows) = {
            let conn = self.connection()?;
            let mut stmt = conn.prepare(&sql)?;
            let names: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
            let width = names.len();

            let rows = stmt
                .query_map(params_from_iter(args.iter()), |row| {
                    (0..width).map(|i| row.get::<_, Value>(i)).collect()
                })?
                .collect::<Result<Vec<Vec<Value>>, _>>()?;
            (names, rows)
        };

        Ok(FavoritesCursor::registered(
            *route,
            names,
            rows,
            &self.event_bus,
        ))
    }

    fn update(
        &self,
        route: &FavoritesRoute,
        values: &ContentValues,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> AppResult<usize> {
        if values.is_empty() {
            return Err(AppError::Other("Empty values for update".to_string()));
        }
        validate_columns(values.columns())?;

        let assignments: Vec<String> = values.columns().map(|c| format!("{} = ?", c)).collect();
        let (where_clause, args) = route_filter(route, selection, selection_args);

        let mut sql = format!(
            "UPDATE {} SET {}",
            columns::TABLE_NAME,
            assignments.join(", ")
        );
        if let Some(clause) = where_clause {
            sql.push_str(&format!(" WHERE {}", clause));
        }

        let params: Vec<&Value> = values.iter().map(|(_, v)| v).chain(args.iter()).collect();

        let updated = {
            let conn = self.connection()?;
            conn.execute(&sql, params_from_iter(params))?
        };

        if updated > 0 {
            self.notify(*route, ChangeKind::Update, updated);
        }
        Ok(updated)
    }

    fn delete(
        &self,
        route: &FavoritesRoute,
        selection: Option<&str>,
        selection_args: &[Value],
    ) -> AppResult<usize> {
        let (where_clause, args) = route_filter(route, selection, selection_args);

        let mut sql = format!("DELETE FROM {}", columns::TABLE_NAME);
        if let Some(clause) = where_clause {
            sql.push_str(&format!(" WHERE {}", clause));
        }

        let deleted = {
            let conn = self.connection()?;
            conn.execute(&sql, params_from_iter(args.iter()))?
        };

        if deleted > 0 {
            self.notify(*route, ChangeKind::Delete, deleted);
        }
        Ok(deleted)
    }
}

/// Inserts are only defined on the collection
fn require_collection(route: &FavoritesRoute) -> AppResult<()> {
    match route {
        FavoritesRoute::Collection => Ok(()),
        FavoritesRoute::Item(_) => {
            log::warn!("Insert rejected on item route {}", route);
            Err(AppError::UnsupportedRoute(route.uri()))
        }
    }
}

/// WHERE clause and bound arguments for a route
///
/// The item route always filters by the row id column and ignores any
/// caller selection.
fn route_filter(
    route: &FavoritesRoute,
    selection: Option<&str>,
    selection_args: &[Value],
) -> (Option<String>, Vec<Value>) {
    match route {
        FavoritesRoute::Collection => (
            selection
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string),
            selection_args.to_vec(),
        ),
        FavoritesRoute::Item(id) => (
            Some(format!("{} = ?", columns::ID)),
            vec![Value::Integer(*id)],
        ),
    }
}

fn validate_columns<'a>(names: impl IntoIterator<Item = &'a str>) -> AppResult<()> {
    for name in names {
        if !columns::is_known_column(name) {
            return Err(AppError::UnknownColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Accepts `col`, `col ASC`, `col DESC`, comma separated
fn validate_sort_order(order: &str) -> AppResult<()> {
    for term in order.split(',') {
        let mut parts = term.split_whitespace();
        let column = parts
            .next()
            .ok_or_else(|| AppError::UnknownColumn(term.to_string()))?;
        validate_columns([column])?;

        match parts.next() {
            None => {}
            Some(dir) if dir.eq_ignore_ascii_case("asc") || dir.eq_ignore_ascii_case("desc") => {}
            Some(other) => return Err(AppError::UnknownColumn(other.to_string())),
        }
        if parts.next().is_some() {
            return Err(AppError::UnknownColumn(term.trim().to_string()));
        }
    }
    Ok(())
}
