// src/integrations/tmdb/json.rs
//
// Catalog response mapping
//
// RULES:
// - Pure: one response body in, typed records out
// - A body carrying an error code maps to `Ok(None)`, never an error
// - A missing required field fails the whole body; no partial lists

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{MovieDetail, MovieSummary, Review, Video, GENRE_SEPARATOR};
use crate::error::AppResult;

const ERROR_CODE_FIELD: &str = "cod";
const STATUS_CODE_FIELD: &str = "status_code";
const SUCCESS_FIELD: &str = "success";

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct MovieData {
    id: i64,
    poster_path: Option<String>,
    overview: String,
    release_date: String,
    original_title: String,
    original_language: String,
    backdrop_path: Option<String>,
    vote_count: i64,
    vote_average: f64,
}

#[derive(Debug, Deserialize)]
struct VideoData {
    id: String,
    key: String,
    name: String,
    site: String,
    size: i32,
    #[serde(rename = "type")]
    video_type: String,
}

#[derive(Debug, Deserialize)]
struct ReviewData {
    id: String,
    author: String,
    content: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct GenreData {
    name: String,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    id: i64,
    genres: Vec<GenreData>,
    videos: ResultsPage<VideoData>,
    reviews: ResultsPage<ReviewData>,
}

// ============================================================================
// PARSERS
// ============================================================================

/// Movie list from a `popular` or `top_rated` response
pub fn parse_movie_list(body: &str) -> AppResult<Option<Vec<MovieSummary>>> {
    let Some(root) = parse_checked(body)? else {
        return Ok(None);
    };
    let page: ResultsPage<MovieData> = serde_json::from_value(root)?;
    Ok(Some(page.results.into_iter().map(map_movie).collect()))
}

/// Reviews from a `/{id}/reviews` response
pub fn parse_reviews(body: &str) -> AppResult<Option<Vec<Review>>> {
    let Some(root) = parse_checked(body)? else {
        return Ok(None);
    };
    let page: ResultsPage<ReviewData> = serde_json::from_value(root)?;
    Ok(Some(page.results.into_iter().map(map_review).collect()))
}

/// Videos from a `/{id}/videos` response
pub fn parse_videos(body: &str) -> AppResult<Option<Vec<Video>>> {
    let Some(root) = parse_checked(body)? else {
        return Ok(None);
    };
    let page: ResultsPage<VideoData> = serde_json::from_value(root)?;
    Ok(Some(page.results.into_iter().map(map_video).collect()))
}

/// Detail from a `/{id}?append_to_response=videos,reviews` response
pub fn parse_movie_detail(body: &str) -> AppResult<Option<MovieDetail>> {
    let Some(root) = parse_checked(body)? else {
        return Ok(None);
    };
    let detail: DetailData = serde_json::from_value(root)?;

    Ok(Some(MovieDetail {
        movie_id: detail.id,
        genres: detail.genres.into_iter().map(|g| g.name).collect(),
        videos: detail.videos.results.into_iter().map(map_video).collect(),
        reviews: detail.reviews.results.into_iter().map(map_review).collect(),
    }))
}

/// Genre names as stored with a favorite, e.g. `Animation | Comedy`
pub fn genres_to_label(genres: &[String]) -> String {
    genres.join(GENRE_SEPARATOR)
}

// ============================================================================
// INTERNAL
// ============================================================================

/// Parse the body and drop it if it reports an error
fn parse_checked(body: &str) -> AppResult<Option<Value>> {
    let root: Value = serde_json::from_str(body)?;
    if let Some(reason) = error_signal(&root) {
        log::warn!("Catalog response reported an error: {}", reason);
        return Ok(None);
    }
    Ok(Some(root))
}

fn error_signal(root: &Value) -> Option<String> {
    if let Some(code) = root.get(ERROR_CODE_FIELD) {
        let ok = match code {
            Value::Number(n) => n.as_i64() == Some(200),
            Value::String(s) => s == "200" || s.eq_ignore_ascii_case("ok"),
            _ => false,
        };
        if !ok {
            return Some(format!("{} = {}", ERROR_CODE_FIELD, code));
        }
    }

    if root.get(SUCCESS_FIELD) == Some(&Value::Bool(false)) {
        return Some(format!("{} = false", SUCCESS_FIELD));
    }

    if let Some(status) = root.get(STATUS_CODE_FIELD) {
        if root.get(SUCCESS_FIELD) != Some(&Value::Bool(true)) {
            return Some(format!("{} = {}", STATUS_CODE_FIELD, status));
        }
    }

    None
}

fn map_movie(data: MovieData) -> MovieSummary {
    MovieSummary {
        id: data.id,
        title: data.original_title,
        overview: data.overview,
        release_date: data.release_date,
        poster_path: data.poster_path,
        backdrop_path: data.backdrop_path,
        original_language: data.original_language,
        vote_count: data.vote_count,
        vote_average: data.vote_average,
        is_favorite: false,
    }
}

fn map_video(data: VideoData) -> Video {
    Video {
        id: data.id,
        key: data.key,
        name: data.name,
        site: data.site,
        size: data.size,
        video_type: data.video_type,
    }
}

fn map_review(data: ReviewData) -> Review {
    Review {
        id: data.id,
        author: data.author,
        content: data.content,
        url: data.url,
    }
}
