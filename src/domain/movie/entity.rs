use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// A movie as listed by the remote catalog
///
/// Built from catalog responses and never stored on its own; it is
/// promoted to a [`Favorite`](crate::domain::Favorite) when the user
/// keeps it for offline viewing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Catalog identifier, unique per catalog
    pub id: i64,

    /// Original title
    pub title: String,

    pub overview: String,

    /// Release date in catalog format (`yyyy-MM-dd`)
    pub release_date: String,

    /// Catalog-relative poster path, e.g. `/WLQN5aiQG8wc9SeKwixW7pAR8K.jpg`
    pub poster_path: Option<String>,

    pub backdrop_path: Option<String>,

    /// ISO 639-1 code of the original language
    pub original_language: String,

    pub vote_count: i64,

    pub vote_average: f64,

    /// Computed locally from the favorites store, never sent by the catalog
    #[serde(default)]
    pub is_favorite: bool,
}

impl MovieSummary {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: String::new(),
            release_date: String::new(),
            poster_path: None,
            backdrop_path: None,
            original_language: String::new(),
            vote_count: 0,
            vote_average: 0.0,
            is_favorite: false,
        }
    }
}

impl fmt::Display for MovieSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Which list the main screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Popular,
    TopRated,
    /// Local favorites; never hits the network
    Favorites,
}

impl SortOrder {
    /// Path segment used by the catalog list endpoint
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::TopRated => "top_rated",
            SortOrder::Favorites => "favorites",
        }
    }

    pub fn is_remote(&self) -> bool {
        !matches!(self, SortOrder::Favorites)
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Popular
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path_segment())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortOrder::Popular),
            "top_rated" => Ok(SortOrder::TopRated),
            "favorites" => Ok(SortOrder::Favorites),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown sort order: {}",
                other
            ))),
        }
    }
}
