// src/services/favorites_service.rs
//
// Favorites use cases on top of the favorites provider
//
// Every write completes (and has published its change notification)
// before the call returns, so a caller can acknowledge the user action
// right after.

use rusqlite::types::Value;
use std::collections::HashSet;
use std::sync::Arc;

use crate::db::contract::favorites as columns;
use crate::domain::{validate_favorite, DomainError, Favorite, MovieDetail, MovieSummary};
use crate::error::{AppError, AppResult};
use crate::repositories::{FavoritesProvider, FavoritesRoute};

/// Oldest first; row id breaks ties within the same second
const FAVORITES_ORDER: &str = "timestamp ASC, _id ASC";

pub struct FavoritesService {
    provider: Arc<dyn FavoritesProvider>,
}

impl FavoritesService {
    pub fn new(provider: Arc<dyn FavoritesProvider>) -> Self {
        Self { provider }
    }

    /// Save `movie` with the genres from its detail
    ///
    /// Saving a movie that is already a favorite replaces the stored row.
    /// Returns the item URI of the stored row.
    pub fn add_favorite(&self, movie: &MovieSummary, detail: &MovieDetail) -> AppResult<String> {
        if detail.movie_id != movie.id {
            return Err(AppError::Domain(DomainError::InvariantViolation(format!(
                "Detail for movie {} does not belong to movie {}",
                detail.movie_id, movie.id
            ))));
        }

        let favorite = Favorite::from_detail(movie.clone(), detail);
        validate_favorite(&favorite).map_err(AppError::Domain)?;

        let uri = self
            .provider
            .insert(&FavoritesRoute::Collection, &favorite.to_content_values())?;

        log::info!("Saved favorite {} ({})", movie.id, movie.title);
        Ok(uri)
    }

    /// Remove every row for `movie_id`; returns how many were removed
    pub fn remove_favorite(&self, movie_id: i64) -> AppResult<usize> {
        let removed = self.provider.delete(
            &FavoritesRoute::Collection,
            Some(&movie_id_selection()),
            &[Value::Integer(movie_id)],
        )?;

        if removed == 0 {
            log::debug!("Movie {} was not a favorite", movie_id);
        } else {
            log::info!("Removed favorite {}", movie_id);
        }
        Ok(removed)
    }

    pub fn is_favorite(&self, movie_id: i64) -> AppResult<bool> {
        let cursor = self.provider.query(
            &FavoritesRoute::Collection,
            Some(&[columns::MOVIE_ID]),
            Some(&movie_id_selection()),
            &[Value::Integer(movie_id)],
            None,
        )?;
        Ok(!cursor.is_empty())
    }

    /// All favorites, oldest first
    pub fn list_favorites(&self) -> AppResult<Vec<Favorite>> {
        let cursor = self.provider.query(
            &FavoritesRoute::Collection,
            None,
            None,
            &[],
            Some(FAVORITES_ORDER),
        )?;
        cursor.to_favorites()
    }

    /// Set `is_favorite` on each movie from the store
    pub fn mark_favorites(&self, movies: &mut [MovieSummary]) -> AppResult<()> {
        let cursor = self.provider.query(
            &FavoritesRoute::Collection,
            Some(&[columns::MOVIE_ID]),
            None,
            &[],
            None,
        )?;

        let saved: HashSet<i64> = (0..cursor.count())
            .filter_map(|row| cursor.get_i64(row, columns::MOVIE_ID))
            .collect();

        for movie in movies.iter_mut() {
            movie.is_favorite = saved.contains(&movie.id);
        }
        Ok(())
    }

    /// Flip the favorite state of `movie`; returns the new state
    pub fn toggle_favorite(&self, movie: &MovieSummary, detail: &MovieDetail) -> AppResult<bool> {
        if self.is_favorite(movie.id)? {
            self.remove_favorite(movie.id)?;
            Ok(false)
        } else {
            self.add_favorite(movie, detail)?;
            Ok(true)
        }
    }
}

fn movie_id_selection() -> String {
    format!("{} = ?", columns::MOVIE_ID)
}
