// src/lib.rs
// PopMovies - movie catalog client with an offline favorites store
//
// Architecture:
// - Local-first favorites: one SQLite table behind a route-addressed provider
// - Event-driven: every committed favorites write publishes a change event
// - Remote catalog: single-attempt HTTP fetches mapped into domain records
// - Application layer: wiring, static user messages, display formatting

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_favorite, ContentValues, DomainError, Favorite, MovieDetail, MovieSummary, Review,
    SortOrder, Video,
};

// ============================================================================
// PUBLIC API - Errors & Config
// ============================================================================

pub use config::AppConfig;
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, ChangeKind, DomainEvent, EventBus, EventLogEntry, FavoritesChanged,
    SubscriptionId,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{contract, initialize_database, ConnectionPool, FavoritesDatabase};

// ============================================================================
// PUBLIC API - Favorites access
// ============================================================================

pub use repositories::{FavoritesCursor, FavoritesProvider, FavoritesRoute, SqliteFavoritesProvider};

// ============================================================================
// PUBLIC API - Services & Integrations
// ============================================================================

pub use integrations::{play_video, CommandUrlHandler, MovieCatalog, PlaybackTarget, TmdbClient, UrlHandler};
pub use services::{FavoritesService, LoadSlot, MovieCatalogService};

pub use application::{format_release_date, AppState, ToUserMessage, UserMessage};
