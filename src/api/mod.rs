//! Remote media catalog access
//!
//! - TMDB: credits, similar-items and multi-search over HTTP
//!
//! The pipelines depend only on the [`MediaCatalog`] trait, owned and
//! injected by the composition root, so tests substitute a scripted double
//! without touching the network.

pub mod tmdb;

pub use tmdb::TmdbClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Credits, MediaRef, MediaType};

/// Failure of a single catalog operation.
///
/// Every transport, decoding or remote-signaled problem is normalized into
/// one of these kinds; the pipelines treat all of them uniformly as "this
/// attempt failed". Cloneable so a single failure can be delivered to every
/// subscriber of a multicast stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("resource not found (404)")]
    NotFound,

    #[error("server error: {0}")]
    Status(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

/// The three remote operations the pipelines are built on.
///
/// Pure request/response, no state, no caching; caching of the joined
/// detail belongs to [`crate::pipeline::DetailHub`].
#[async_trait]
pub trait MediaCatalog: Send + Sync + 'static {
    /// Cast and crew names for one item, in remote order.
    async fn fetch_cast_crew(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Credits, FetchError>;

    /// Items the catalog considers similar to the given one.
    async fn fetch_similar(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Vec<MediaRef>, FetchError>;

    /// One page of free-text search results. Pages start at 1.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MediaRef>, FetchError>;
}
