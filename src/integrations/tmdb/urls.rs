// src/integrations/tmdb/urls.rs
//
// Catalog, image and video URL builders
//
// Pure functions; nothing here touches the network.

use reqwest::Url;

use crate::domain::SortOrder;
use crate::error::{AppError, AppResult};

pub const TMDB_BASE_URL: &str = "http://api.themoviedb.org/3/movie";
pub const TMDB_IMAGE_BASE_URL: &str = "http://image.tmdb.org/t/p/";

const API_KEY_PARAM: &str = "api_key";
const APPEND_TO_RESPONSE_PARAM: &str = "append_to_response";
const VIDEOS: &str = "videos";
const REVIEWS: &str = "reviews";

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch";
const YOUTUBE_VIDEO_PARAM: &str = "v";
const YOUTUBE_THUMBNAIL_BASE_URL: &str = "http://img.youtube.com/vi";
const YOUTUBE_THUMBNAIL_NAME: &str = "0.jpg";

/// Date format of `release_date` in catalog responses
pub const TMDB_DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_url(raw: &str, params: &[(&str, &str)]) -> AppResult<Url> {
    Url::parse_with_params(raw, params)
        .map_err(|e| AppError::Other(format!("Invalid URL {}: {}", raw, e)))
}

/// `{base}/{sort_order}?api_key=...`
pub fn movie_list_url(sort_order: SortOrder, api_key: &str) -> AppResult<Url> {
    parse_url(
        &format!("{}/{}", TMDB_BASE_URL, sort_order.as_path_segment()),
        &[(API_KEY_PARAM, api_key)],
    )
}

/// `{base}/{id}?api_key=...&append_to_response=videos,reviews`
pub fn movie_detail_url(movie_id: i64, api_key: &str) -> AppResult<Url> {
    let append = format!("{},{}", VIDEOS, REVIEWS);
    parse_url(
        &format!("{}/{}", TMDB_BASE_URL, movie_id),
        &[(API_KEY_PARAM, api_key), (APPEND_TO_RESPONSE_PARAM, &append)],
    )
}

/// `{base}/{id}/videos?api_key=...`
pub fn movie_videos_url(movie_id: i64, api_key: &str) -> AppResult<Url> {
    parse_url(
        &format!("{}/{}/{}", TMDB_BASE_URL, movie_id, VIDEOS),
        &[(API_KEY_PARAM, api_key)],
    )
}

/// `{base}/{id}/reviews?api_key=...`
pub fn movie_reviews_url(movie_id: i64, api_key: &str) -> AppResult<Url> {
    parse_url(
        &format!("{}/{}/{}", TMDB_BASE_URL, movie_id, REVIEWS),
        &[(API_KEY_PARAM, api_key)],
    )
}

/// Image URL for a catalog-relative path such as `/abc.jpg`
///
/// Size tokens are `w92`, `w154`, `w185`, `w342`, `w500`, `w780` or
/// `original`. An empty path gives an empty string.
pub fn image_url(size: &str, image_path: &str) -> String {
    let path = image_path.strip_prefix('/').unwrap_or(image_path);
    if path.is_empty() {
        return String::new();
    }
    format!("{}{}/{}", TMDB_IMAGE_BASE_URL, size, path)
}

/// `https://www.youtube.com/watch?v={key}`
pub fn youtube_watch_url(key: &str) -> AppResult<Url> {
    parse_url(YOUTUBE_WATCH_URL, &[(YOUTUBE_VIDEO_PARAM, key)])
}

/// `http://img.youtube.com/vi/{key}/0.jpg`
pub fn youtube_thumbnail_url(key: &str) -> String {
    format!(
        "{}/{}/{}",
        YOUTUBE_THUMBNAIL_BASE_URL, key, YOUTUBE_THUMBNAIL_NAME
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_list_url() {
        let url = movie_list_url(SortOrder::TopRated, "secret").unwrap();
        assert_eq!(
            url.as_str(),
            "http://api.themoviedb.org/3/movie/top_rated?api_key=secret"
        );
    }

    #[test]
    fn test_detail_url_appends_videos_and_reviews() {
        let url = movie_detail_url(328111, "secret").unwrap();
        assert_eq!(url.path(), "/3/movie/328111");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "secret".to_string()),
                ("append_to_response".to_string(), "videos,reviews".to_string()),
            ]
        );
    }

    #[test]
    fn test_sub_resource_urls() {
        assert_eq!(
            movie_videos_url(328111, "k").unwrap().as_str(),
            "http://api.themoviedb.org/3/movie/328111/videos?api_key=k"
        );
        assert_eq!(
            movie_reviews_url(328111, "k").unwrap().as_str(),
            "http://api.themoviedb.org/3/movie/328111/reviews?api_key=k"
        );
    }

    #[test]
    fn test_api_key_is_encoded() {
        let url = movie_list_url(SortOrder::Popular, "a b&c").unwrap();
        assert_eq!(
            url.query_pairs().next().map(|(_, v)| v.into_owned()),
            Some("a b&c".to_string())
        );
    }

    #[test]
    fn test_image_urls() {
        assert_eq!(
            image_url("w500", "/WLQN5aiQG8wc9SeKwixW7pAR8K.jpg"),
            "http://image.tmdb.org/t/p/w500/WLQN5aiQG8wc9SeKwixW7pAR8K.jpg"
        );
        assert_eq!(image_url("w185", ""), "");
    }

    #[test]
    fn test_youtube_urls() {
        assert_eq!(
            youtube_watch_url("bvu-zlR5A8Q").unwrap().as_str(),
            "https://www.youtube.com/watch?v=bvu-zlR5A8Q"
        );
        assert_eq!(
            youtube_thumbnail_url("bvu-zlR5A8Q"),
            "http://img.youtube.com/vi/bvu-zlR5A8Q/0.jpg"
        );
    }
}
