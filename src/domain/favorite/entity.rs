use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::contract::favorites as columns;
use crate::domain::{ContentValues, MovieDetail, MovieSummary};

/// Format SQLite uses for `CURRENT_TIMESTAMP`
pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A movie kept in the local store for offline viewing
///
/// Unique per movie identifier: saving the same movie twice replaces
/// the earlier row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    /// Surrogate row id assigned by the store
    pub row_id: Option<i64>,

    pub movie: MovieSummary,

    /// Genre names joined for display, e.g. `Animation | Comedy`
    pub genre_list: String,

    /// Insertion time assigned by the store
    pub created_at: Option<NaiveDateTime>,
}

impl Favorite {
    pub fn new(movie: MovieSummary, genre_list: impl Into<String>) -> Self {
        Self {
            row_id: None,
            movie,
            genre_list: genre_list.into(),
            created_at: None,
        }
    }

    /// Build a favorite from a listed movie and its fetched detail
    pub fn from_detail(movie: MovieSummary, detail: &MovieDetail) -> Self {
        Self::new(movie, detail.genre_label())
    }

    pub fn movie_id(&self) -> i64 {
        self.movie.id
    }

    /// Column values for a write through the favorites provider
    ///
    /// The row id and timestamp are left to the store.
    pub fn to_content_values(&self) -> ContentValues {
        let movie = &self.movie;
        ContentValues::new()
            .with(columns::MOVIE_ID, movie.id)
            .with(columns::POSTER_PATH, movie.poster_path.clone())
            .with(columns::OVERVIEW, movie.overview.clone())
            .with(columns::RELEASE_DATE, movie.release_date.clone())
            .with(columns::ORIGINAL_TITLE, movie.title.clone())
            .with(columns::ORIGINAL_LANGUAGE, movie.original_language.clone())
            .with(columns::BACKDROP_PATH, movie.backdrop_path.clone())
            .with(columns::VOTE_COUNT, movie.vote_count)
            .with(columns::VOTE_AVERAGE, movie.vote_average)
            .with(columns::GENRE_LIST, self.genre_list.clone())
    }

    /// Parse a timestamp column value written by the store
    pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(raw, STORE_TIMESTAMP_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Review, Video};
    use rusqlite::types::Value;

    #[test]
    fn test_content_values_cover_every_writable_column() {
        let mut movie = MovieSummary::new(12345, "The Secret Life of Pets");
        movie.poster_path = Some("/WLQN5aiQG8wc9SeKwixW7pAR8K.jpg".to_string());
        let favorite = Favorite::new(movie, "Animation | Comedy");

        let values = favorite.to_content_values();
        assert_eq!(values.len(), 10);
        assert_eq!(values.get(columns::MOVIE_ID), Some(&Value::Integer(12345)));
        assert_eq!(
            values.get(columns::ORIGINAL_TITLE),
            Some(&Value::Text("The Secret Life of Pets".to_string()))
        );
        assert_eq!(values.get(columns::BACKDROP_PATH), Some(&Value::Null));
        assert!(values.get(columns::ID).is_none());
        assert!(values.get(columns::TIMESTAMP).is_none());
    }

    #[test]
    fn test_from_detail_uses_genre_label() {
        let detail = MovieDetail {
            movie_id: 12345,
            genres: vec!["Animation".to_string(), "Comedy".to_string()],
            videos: Vec::<Video>::new(),
            reviews: Vec::<Review>::new(),
        };
        let favorite = Favorite::from_detail(MovieSummary::new(12345, "Pets"), &detail);
        assert_eq!(favorite.genre_list, "Animation | Comedy");
        assert_eq!(favorite.movie_id(), 12345);
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = Favorite::parse_timestamp("2017-03-01 10:15:30").unwrap();
        assert_eq!(parsed.to_string(), "2017-03-01 10:15:30");
        assert!(Favorite::parse_timestamp("yesterday").is_none());
    }
}
