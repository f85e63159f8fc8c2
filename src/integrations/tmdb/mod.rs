// src/integrations/tmdb/mod.rs
//
// The Movie Database catalog: URL builders, HTTP client, response mapping

pub mod client;
pub mod json;
pub mod urls;

pub use client::{MovieCatalog, TmdbClient};
pub use json::{genres_to_label, parse_movie_detail, parse_movie_list, parse_reviews, parse_videos};

#[cfg(test)]
pub use client::MockMovieCatalog;
