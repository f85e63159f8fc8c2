// src/services/movie_catalog_service.rs
//
// Movie lists and detail for the screens
//
// The favorites list is read from the local store on the blocking pool;
// every other list comes from the remote catalog and is then marked with
// the local favorite state.

use std::sync::Arc;

use crate::domain::{MovieDetail, MovieSummary, SortOrder};
use crate::error::AppResult;
use crate::integrations::tmdb::MovieCatalog;
use crate::services::FavoritesService;

pub struct MovieCatalogService {
    catalog: Arc<dyn MovieCatalog>,
    favorites: Arc<FavoritesService>,
}

impl MovieCatalogService {
    pub fn new(catalog: Arc<dyn MovieCatalog>, favorites: Arc<FavoritesService>) -> Self {
        Self { catalog, favorites }
    }

    /// Movies for `sort_order`
    ///
    /// A catalog response that carried nothing usable is an empty list.
    pub async fn load_movies(&self, sort_order: SortOrder) -> AppResult<Vec<MovieSummary>> {
        if !sort_order.is_remote() {
            let favorites = Arc::clone(&self.favorites);
            let saved = tokio::task::spawn_blocking(move || favorites.list_favorites()).await??;
            return Ok(saved.into_iter().map(|favorite| favorite.movie).collect());
        }

        let Some(mut movies) = self.catalog.fetch_movies(sort_order).await? else {
            log::info!("Catalog returned no {} movies", sort_order);
            return Ok(Vec::new());
        };

        let favorites = Arc::clone(&self.favorites);
        movies = tokio::task::spawn_blocking(move || {
            favorites.mark_favorites(&mut movies)?;
            AppResult::Ok(movies)
        })
        .await??;

        Ok(movies)
    }

    /// Genres, trailers and reviews for one movie
    pub async fn load_detail(&self, movie_id: i64) -> AppResult<Option<MovieDetail>> {
        self.catalog.fetch_detail(movie_id).await
    }

    /// Whether `movie_id` is saved locally
    pub async fn is_favorite(&self, movie_id: i64) -> AppResult<bool> {
        let favorites = Arc::clone(&self.favorites);
        tokio::task::spawn_blocking(move || favorites.is_favorite(movie_id)).await?
    }
}
