// src/integrations/mod.rs
//
// External integrations
//
// - tmdb: remote movie catalog
// - player: trailer playback handoff to external programs

pub mod player;
pub mod tmdb;

pub use player::{play_video, CommandUrlHandler, PlaybackTarget, UrlHandler};
pub use tmdb::{MovieCatalog, TmdbClient};
