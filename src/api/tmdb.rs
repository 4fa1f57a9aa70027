//! TMDB (The Movie Database) API client
//!
//! Search, discovery and metadata for movies.
//! API docs: https://developer.themoviedb.org/docs
//!
//! Public operations never fail: transport errors, non-success statuses and
//! malformed bodies all collapse into an empty/neutral value, with the cause
//! logged as a warning. Callers only ever render "no results".

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Credits, Genre, ImageSize, MovieDetail, ResultPage, SearchFilters};

/// TMDB v3 API root
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB image CDN root; sizes are appended as path segments
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Served in place of a missing poster/backdrop/profile image
pub const DEFAULT_PLACEHOLDER: &str = "/abstract-movie-poster.png";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
pub struct TmdbClient {
    api_key: Option<String>,
    access_token: Option<String>,
    base_url: String,
    image_base_url: String,
    placeholder: String,
    client: reqwest::Client,
}

fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

impl TmdbClient {
    /// Create a new TMDB client authenticating with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self {
            api_key: (!api_key.is_empty()).then_some(api_key),
            access_token: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            client: http_client(DEFAULT_TIMEOUT),
        }
    }

    /// Also send a v4 read-access token as `Authorization: Bearer`
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn with_image_base_url(mut self, url: impl Into<String>) -> Self {
        self.image_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = http_client(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.query(&[("api_key", key)]);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        debug!(endpoint, "TMDB API request");
        let response = request.send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            status => Err(TmdbError::Status(status.as_u16())),
        }
    }

    /// Search movies by title
    pub async fn search_movies(&self, query: &str, page: u32) -> ResultPage {
        let endpoint = format!(
            "/search/movie?query={}&page={}&include_adult=false",
            urlencoding::encode(query),
            page.max(1)
        );
        or_fallback("search_movies", self.get(&endpoint).await, ResultPage::empty)
    }

    /// Currently popular movies
    pub async fn popular_movies(&self, page: u32) -> ResultPage {
        let endpoint = format!("/movie/popular?page={}", page.max(1));
        or_fallback("popular_movies", self.get(&endpoint).await, ResultPage::empty)
    }

    /// Filter-driven browse; unset filters are left out of the request
    pub async fn discover_movies(&self, filters: &SearchFilters, page: u32) -> ResultPage {
        let endpoint = discover_endpoint(filters, page.max(1));
        or_fallback("discover_movies", self.get(&endpoint).await, ResultPage::empty)
    }

    /// Shortcut for the common genre + year discover
    pub async fn discover_by_genre_and_year(
        &self,
        genre: Option<u32>,
        year: Option<u16>,
        page: u32,
    ) -> ResultPage {
        let filters = SearchFilters {
            genre,
            year,
            ..SearchFilters::default()
        };
        self.discover_movies(&filters, page).await
    }

    /// Full movie record, `None` when it cannot be loaded
    pub async fn movie_details(&self, id: u64) -> Option<MovieDetail> {
        let endpoint = format!("/movie/{}", id);
        match self.get(&endpoint).await {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!(operation = "movie_details", id, error = %e, "TMDB request failed");
                None
            }
        }
    }

    /// Cast and crew, empty on failure
    pub async fn movie_credits(&self, id: u64) -> Credits {
        let endpoint = format!("/movie/{}/credits", id);
        or_fallback("movie_credits", self.get(&endpoint).await, Credits::default)
    }

    /// Movie genre list, empty on failure
    pub async fn genres(&self) -> Vec<Genre> {
        let response = self
            .get::<GenreListResponse>("/genre/movie/list")
            .await
            .map(|r| r.genres);
        or_fallback("genres", response, Vec::new)
    }

    /// Image URL for a TMDB image path; no network involved
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> String {
        resolve_image_url(&self.image_base_url, &self.placeholder, path, size)
    }
}

/// Log the failure and hand back the fallback value
fn or_fallback<T>(operation: &str, result: Result<T, TmdbError>, fallback: impl FnOnce() -> T) -> T {
    result.unwrap_or_else(|e| {
        warn!(operation, error = %e, "TMDB request failed, using fallback");
        fallback()
    })
}

/// `/discover/movie?...` with values percent-encoded
fn discover_endpoint(filters: &SearchFilters, page: u32) -> String {
    let query = filters
        .query_pairs(page)
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("/discover/movie?{}", query)
}

/// `{base}/{size}{path}`, or the placeholder when there is no path
pub fn resolve_image_url(
    base: &str,
    placeholder: &str,
    path: Option<&str>,
    size: ImageSize,
) -> String {
    match path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) if p.starts_with('/') => format!("{}/{}{}", base.trim_end_matches('/'), size, p),
        Some(p) => format!("{}/{}/{}", base.trim_end_matches('/'), size, p),
        None => placeholder.to_string(),
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    genres: Vec<Genre>,
}
