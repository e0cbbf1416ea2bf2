//! TMDB (The Movie Database) API client
//!
//! Provides credits, similar-items and multi-search for movies and TV shows.
//! API docs: https://developer.themoviedb.org/docs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::api::{FetchError, MediaCatalog};
use crate::models::{Credits, MediaRef, MediaType};

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "catalog request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| FetchError::Decode(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            status => Err(FetchError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl MediaCatalog for TmdbClient {
    async fn fetch_cast_crew(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Credits, FetchError> {
        let endpoint = format!("/{}/{}/credits", media_type.as_path_segment(), id);
        let response: CreditsResponse = self.get(&endpoint).await?;
        Ok(response.into_credits())
    }

    async fn fetch_similar(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Vec<MediaRef>, FetchError> {
        let endpoint = format!("/{}/{}/similar", media_type.as_path_segment(), id);
        let response: MediaPageResponse = self.get(&endpoint).await?;
        Ok(response.into_results(media_type))
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MediaRef>, FetchError> {
        let endpoint = format!(
            "/search/multi?query={}&page={}",
            urlencoding::encode(query),
            page
        );
        let response: MediaPageResponse = self.get(&endpoint).await?;
        Ok(response.into_results(MediaType::Unknown))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreditsResponse {
    #[serde(default)]
    cast: Vec<PersonRaw>,
    #[serde(default)]
    crew: Vec<PersonRaw>,
}

impl CreditsResponse {
    fn into_credits(self) -> Credits {
        Credits {
            cast: self.cast.into_iter().map(|p| p.name).collect(),
            crew: self.crew.into_iter().map(|p| p.name).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PersonRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct MediaPageResponse {
    results: Vec<MediaRefRaw>,
}

impl MediaPageResponse {
    /// `fallback` is the media type assumed when the payload carries none;
    /// similar-items responses omit `media_type` and inherit the root's.
    fn into_results(self, fallback: MediaType) -> Vec<MediaRef> {
        self.results
            .into_iter()
            .map(|r| r.into_media_ref(fallback))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MediaRefRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f32>,
}

impl MediaRefRaw {
    fn into_media_ref(self, fallback: MediaType) -> MediaRef {
        let media_type = self
            .media_type
            .map(|raw| MediaType::from_raw(&raw))
            .unwrap_or(fallback);

        let title = self.title.or(self.name).unwrap_or_default();
        let date_str = self.release_date.or(self.first_air_date);
        let year = date_str.and_then(|d| extract_year(&d));

        MediaRef {
            id: self.id,
            media_type,
            title,
            year,
            overview: self.overview.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average.unwrap_or(0.0),
        }
    }
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<u16> {
    if date.len() >= 4 {
        date[..4].parse().ok()
    } else {
        None
    }
}
