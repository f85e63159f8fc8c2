// src/repositories/route.rs
//
// Addressable favorites resources
//
// A URI is resolved into a route once, at the edge; the provider only
// ever sees the resolved variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::db::contract::{base_content_uri, favorites, PATH_FAVORITES};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum FavoritesRoute {
    /// Every favorite: `content://<authority>/favorites`
    Collection,
    /// One favorite by row id: `content://<authority>/favorites/<id>`
    Item(i64),
}

impl FavoritesRoute {
    /// Resolve a content URI
    ///
    /// Query string and fragment are ignored, as are empty path segments.
    /// Anything other than the collection path or the collection path
    /// followed by one numeric segment is rejected.
    pub fn parse(uri: &str) -> AppResult<Self> {
        let unknown = || AppError::UnknownUri(uri.to_string());

        let without_fragment = uri.split('#').next().unwrap_or_default();
        let without_query = without_fragment.split('?').next().unwrap_or_default();

        let base = base_content_uri();
        let path = without_query.strip_prefix(base.as_str()).ok_or_else(unknown)?;
        if !path.is_empty() && !path.starts_with('/') {
            // a longer authority sharing our prefix
            return Err(unknown());
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [collection] if *collection == PATH_FAVORITES => Ok(FavoritesRoute::Collection),
            [collection, id] if *collection == PATH_FAVORITES && is_numeric(id) => id
                .parse::<i64>()
                .map(FavoritesRoute::Item)
                .map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }

    /// Render back to a content URI
    pub fn uri(&self) -> String {
        match self {
            FavoritesRoute::Collection => favorites::content_uri(),
            FavoritesRoute::Item(id) => favorites::item_uri(*id),
        }
    }

    /// Whether a change on `other` can affect data read through `self`
    pub fn overlaps(&self, other: &FavoritesRoute) -> bool {
        match (self, other) {
            (FavoritesRoute::Collection, _) | (_, FavoritesRoute::Collection) => true,
            (FavoritesRoute::Item(a), FavoritesRoute::Item(b)) => a == b,
        }
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for FavoritesRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri())
    }
}

impl FromStr for FavoritesRoute {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "content://com.moemke.android.popmovies";

    #[test]
    fn test_collection_and_item_routes() {
        assert_eq!(
            FavoritesRoute::parse(&format!("{}/favorites", BASE)).unwrap(),
            FavoritesRoute::Collection
        );
        assert_eq!(
            FavoritesRoute::parse(&format!("{}/favorites/1", BASE)).unwrap(),
            FavoritesRoute::Item(1)
        );
    }

    #[test]
    fn test_query_and_trailing_slash_ignored() {
        assert_eq!(
            FavoritesRoute::parse(&format!("{}/favorites/?limit=3", BASE)).unwrap(),
            FavoritesRoute::Collection
        );
        assert_eq!(
            FavoritesRoute::parse(&format!("{}/favorites/42#top", BASE)).unwrap(),
            FavoritesRoute::Item(42)
        );
    }

    #[test]
    fn test_unknown_uris_rejected() {
        let rejected = [
            format!("{}/movies", BASE),
            format!("{}/favorites/abc", BASE),
            format!("{}/favorites/-1", BASE),
            format!("{}/favorites/1/videos", BASE),
            BASE.to_string(),
            format!("{}.other/favorites", BASE),
            "content://other.authority/favorites".to_string(),
            "http://api.themoviedb.org/3/movie/popular".to_string(),
        ];
        for uri in rejected {
            match FavoritesRoute::parse(&uri) {
                Err(AppError::UnknownUri(u)) => assert_eq!(u, uri),
                other => panic!("expected UnknownUri for {}, got {:?}", uri, other),
            }
        }
    }

    #[test]
    fn test_uri_round_trip() {
        for route in [FavoritesRoute::Collection, FavoritesRoute::Item(99)] {
            assert_eq!(route.uri().parse::<FavoritesRoute>().unwrap(), route);
        }
    }

    #[test]
    fn test_overlaps() {
        let all = FavoritesRoute::Collection;
        assert!(all.overlaps(&FavoritesRoute::Item(1)));
        assert!(FavoritesRoute::Item(1).overlaps(&all));
        assert!(FavoritesRoute::Item(1).overlaps(&FavoritesRoute::Item(1)));
        assert!(!FavoritesRoute::Item(1).overlaps(&FavoritesRoute::Item(2)));
    }
}
