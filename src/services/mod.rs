// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod favorites_service;
pub mod load_slot;
pub mod movie_catalog_service;

pub use favorites_service::FavoritesService;
pub use load_slot::LoadSlot;
pub use movie_catalog_service::MovieCatalogService;
