// src/repositories/cursor.rs
//
// Result handle returned by favorites queries
//
// Rows are read eagerly; the cursor stays registered for change
// notification on its route until it is closed or dropped.

use rusqlite::types::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::db::contract::favorites as columns;
use crate::domain::{Favorite, MovieSummary};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FavoritesChanged, SubscriptionId};
use crate::repositories::FavoritesRoute;

pub struct FavoritesCursor {
    route: FavoritesRoute,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    stale: Arc<AtomicBool>,
    registration: Option<(EventBus, SubscriptionId)>,
}

impl FavoritesCursor {
    /// A cursor with no change registration
    pub fn detached(route: FavoritesRoute, columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            route,
            columns,
            rows,
            stale: Arc::new(AtomicBool::new(false)),
            registration: None,
        }
    }

    /// A cursor that turns stale when a change overlapping `route` is published
    pub fn registered(
        route: FavoritesRoute,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        event_bus: &EventBus,
    ) -> Self {
        let mut cursor = Self::detached(route, columns, rows);
        let flag = Arc::clone(&cursor.stale);

        let id = event_bus.subscribe::<FavoritesChanged, _>(move |event| {
            if route.overlaps(&event.route) {
                flag.store(true, Ordering::SeqCst);
            }
        });
        cursor.registration = Some((event_bus.clone(), id));
        cursor
    }

    pub fn route(&self) -> FavoritesRoute {
        self.route
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)
    }

    pub fn get_i64(&self, row: usize, column: &str) -> Option<i64> {
        match self.get(row, column)? {
            Value::Integer(i) => Some(*i),
            Value::Real(f) => Some(*f as i64),
            Value::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_f64(&self, row: usize, column: &str) -> Option<f64> {
        match self.get(row, column)? {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn get_string(&self, row: usize, column: &str) -> Option<String> {
        match self.get(row, column)? {
            Value::Text(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Real(f) => Some(f.to_string()),
            _ => None,
        }
    }

    /// True once a write overlapping this cursor's route has committed
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::SeqCst)
    }

    /// Map every row to a [`Favorite`]
    ///
    /// The projection must include `movie_id` and `original_title`; other
    /// missing or null columns fall back to empty values.
    pub fn to_favorites(&self) -> AppResult<Vec<Favorite>> {
        (0..self.count()).map(|row| self.favorite_at(row)).collect()
    }

    fn favorite_at(&self, row: usize) -> AppResult<Favorite> {
        let movie_id = self.get_i64(row, columns::MOVIE_ID).ok_or_else(|| {
            AppError::Other(format!("Row {} has no {}", row, columns::MOVIE_ID))
        })?;
        let title = self.get_string(row, columns::ORIGINAL_TITLE).ok_or_else(|| {
            AppError::Other(format!("Row {} has no {}", row, columns::ORIGINAL_TITLE))
        })?;

        let movie = MovieSummary {
            id: movie_id,
            title,
            overview: self.get_string(row, columns::OVERVIEW).unwrap_or_default(),
            release_date: self.get_string(row, columns::RELEASE_DATE).unwrap_or_default(),
            poster_path: self.get_string(row, columns::POSTER_PATH),
            backdrop_path: self.get_string(row, columns::BACKDROP_PATH),
            original_language: self
                .get_string(row, columns::ORIGINAL_LANGUAGE)
                .unwrap_or_default(),
            vote_count: self.get_i64(row, columns::VOTE_COUNT).unwrap_or(0),
            vote_average: self.get_f64(row, columns::VOTE_AVERAGE).unwrap_or(0.0),
            is_favorite: true,
        };

        Ok(Favorite {
            row_id: self.get_i64(row, columns::ID),
            movie,
            genre_list: self.get_string(row, columns::GENRE_LIST).unwrap_or_default(),
            created_at: self
                .get_string(row, columns::TIMESTAMP)
                .and_then(|raw| Favorite::parse_timestamp(&raw)),
        })
    }

    /// Release the cursor and its change registration
    pub fn close(self) {}
}

impl Drop for FavoritesCursor {
    fn drop(&mut self) {
        if let Some((bus, id)) = self.registration.take() {
            bus.unsubscribe(id);
        }
    }
}

impl std::fmt::Debug for FavoritesCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesCursor")
            .field("route", &self.route)
            .field("columns", &self.columns)
            .field("count", &self.rows.len())
            .field("stale", &self.is_stale())
            .finish()
    }
}
