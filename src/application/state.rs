// src/application/state.rs
//
// Process-wide application state
//
// Built once at startup, shared by reference, torn down explicitly.
// All fields are Arc-wrapped so async tasks can hold their own handles.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::FavoritesDatabase;
use crate::error::AppResult;
use crate::events::{create_event_bus, EventBus};
use crate::integrations::tmdb::{MovieCatalog, TmdbClient};
use crate::repositories::{FavoritesProvider, SqliteFavoritesProvider};
use crate::services::{FavoritesService, MovieCatalogService};

pub struct AppState {
    pub config: AppConfig,
    pub database: FavoritesDatabase,
    pub event_bus: Arc<EventBus>,
    pub provider: Arc<dyn FavoritesProvider>,
    pub favorites_service: Arc<FavoritesService>,
    pub catalog_service: Arc<MovieCatalogService>,
}

impl AppState {
    /// Open the favorites store and wire services against the TMDB client
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        let database = FavoritesDatabase::open(&config.resolve_database_path()?)?;
        let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::new(&config)?);
        Ok(Self::with_parts(config, database, catalog))
    }

    /// Wire services over an already open store and any catalog
    pub fn with_parts(
        config: AppConfig,
        database: FavoritesDatabase,
        catalog: Arc<dyn MovieCatalog>,
    ) -> Self {
        let event_bus = Arc::new(create_event_bus());
        let provider: Arc<dyn FavoritesProvider> = Arc::new(SqliteFavoritesProvider::new(
            database.pool(),
            Arc::clone(&event_bus),
        ));
        let favorites_service = Arc::new(FavoritesService::new(Arc::clone(&provider)));
        let catalog_service = Arc::new(MovieCatalogService::new(
            catalog,
            Arc::clone(&favorites_service),
        ));

        Self {
            config,
            database,
            event_bus,
            provider,
            favorites_service,
            catalog_service,
        }
    }

    /// Close the favorites store
    pub fn shutdown(self) {
        let AppState { database, .. } = self;
        database.close();
    }
}
