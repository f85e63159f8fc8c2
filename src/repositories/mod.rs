// src/repositories/mod.rs
//
// Favorites access layer
//
// RULES:
// - All reads and writes of the favorites table go through the provider
// - Resources are addressed by `FavoritesRoute`, parsed once at the edge
// - Only columns named by the table contract reach SQL text
// - Every committed write that changed rows publishes one notification

pub mod cursor;
pub mod favorites_provider;
pub mod route;

pub use cursor::FavoritesCursor;
pub use favorites_provider::{FavoritesProvider, SqliteFavoritesProvider};
pub use route::FavoritesRoute;
