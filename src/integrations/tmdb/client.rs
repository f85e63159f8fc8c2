// src/integrations/tmdb/client.rs
//
// Catalog HTTP client
//
// ARCHITECTURE:
// - One GET per call: no retry, no backoff, no caching
// - Returns domain records built by the `json` mappers
// - The API key is checked before any request is built
//
// This is infrastructure: it never touches the favorites store.

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use std::time::Duration;

use crate::config::AppConfig;
use crate::domain::{DomainError, MovieDetail, MovieSummary, Review, SortOrder, Video};
use crate::error::{AppError, AppResult};
use crate::integrations::tmdb::{json, urls};

/// Read access to the remote movie catalog
///
/// `Ok(None)` means the catalog answered but had nothing usable (empty
/// body or an error code in the payload).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// List movies for a remote sort order
    async fn fetch_movies(&self, sort_order: SortOrder) -> AppResult<Option<Vec<MovieSummary>>>;

    /// Genres, videos and reviews in one request
    async fn fetch_detail(&self, movie_id: i64) -> AppResult<Option<MovieDetail>>;

    async fn fetch_videos(&self, movie_id: i64) -> AppResult<Option<Vec<Video>>>;

    async fn fetch_reviews(&self, movie_id: i64) -> AppResult<Option<Vec<Review>>>;
}

/// TMDB API client
pub struct TmdbClient {
    http_client: Client,
    api_key: Option<String>,
}

impl TmdbClient {
    /// Client over the configured key; without one every fetch fails with `MissingApiKey`
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.require_api_key().ok().map(str::to_string),
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    /// GET `url` and return the body as text
    ///
    /// An empty body is `None`; a non-success status is `HttpStatus`.
    /// Transport errors are stripped of the URL, which carries the key.
    pub async fn get_response(&self, url: &Url) -> AppResult<Option<String>> {
        // Query string carries the key; keep it out of the log
        log::debug!("GET {}{}", url.host_str().unwrap_or_default(), url.path());

        let response = self
            .http_client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Catalog request {} returned {}", url.path(), status);
            return Err(AppError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::Http(e.without_url()))?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_movies(&self, sort_order: SortOrder) -> AppResult<Option<Vec<MovieSummary>>> {
        let key = self.api_key()?;
        if !sort_order.is_remote() {
            return Err(DomainError::InvariantViolation(format!(
                "{} is not served by the catalog",
                sort_order
            ))
            .into());
        }

        let url = urls::movie_list_url(sort_order, key)?;
        match self.get_response(&url).await? {
            Some(body) => json::parse_movie_list(&body),
            None => Ok(None),
        }
    }

    async fn fetch_detail(&self, movie_id: i64) -> AppResult<Option<MovieDetail>> {
        let url = urls::movie_detail_url(movie_id, self.api_key()?)?;
        match self.get_response(&url).await? {
            Some(body) => json::parse_movie_detail(&body),
            None => Ok(None),
        }
    }

    async fn fetch_videos(&self, movie_id: i64) -> AppResult<Option<Vec<Video>>> {
        let url = urls::movie_videos_url(movie_id, self.api_key()?)?;
        match self.get_response(&url).await? {
            Some(body) => json::parse_videos(&body),
            None => Ok(None),
        }
    }

    async fn fetch_reviews(&self, movie_id: i64) -> AppResult<Option<Vec<Review>>> {
        let url = urls::movie_reviews_url(movie_id, self.api_key()?)?;
        match self.get_response(&url).await? {
            Some(body) => json::parse_reviews(&body),
            None => Ok(None),
        }
    }
}
