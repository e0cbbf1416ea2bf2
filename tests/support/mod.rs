//! Shared test doubles and fixtures
//!
//! `ScriptedCatalog` implements `MediaCatalog` entirely in memory with
//! per-operation call logs, scripted outcomes and optional delays, so the
//! pipelines can be driven deterministically under paused time.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use marquee::{Credits, FetchError, MediaCatalog, MediaRef, MediaType};

/// Build a minimal movie reference for fixtures.
pub fn media(id: u64, title: &str) -> MediaRef {
    MediaRef {
        id,
        media_type: MediaType::Movie,
        title: title.to_string(),
        year: Some(2022),
        overview: String::new(),
        poster_path: None,
        backdrop_path: None,
        vote_average: 7.0,
    }
}

type SearchScript = Box<dyn Fn(&str, u32) -> Result<Vec<MediaRef>, FetchError> + Send + Sync>;

pub struct ScriptedCatalog {
    credits: Mutex<Result<Credits, FetchError>>,
    similar: Mutex<Result<Vec<MediaRef>, FetchError>>,
    search: SearchScript,
    /// Delay applied to credits/similar fetches.
    detail_delay: Mutex<Duration>,
    /// Per-query delays applied to search fetches.
    slow_queries: Mutex<HashMap<String, Duration>>,

    pub credits_calls: Mutex<Vec<(MediaType, u64)>>,
    pub similar_calls: Mutex<Vec<(MediaType, u64)>>,
    pub search_calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedCatalog {
    /// A catalog that answers every operation successfully: empty credits
    /// and similar lists, one generated result per search page.
    pub fn new() -> Self {
        Self::with_search(|query, page| Ok(vec![media(page as u64, &format!("{} p{}", query, page))]))
    }

    /// A catalog with a scripted search behavior.
    pub fn with_search(
        search: impl Fn(&str, u32) -> Result<Vec<MediaRef>, FetchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            credits: Mutex::new(Ok(Credits::default())),
            similar: Mutex::new(Ok(Vec::new())),
            search: Box::new(search),
            detail_delay: Mutex::new(Duration::ZERO),
            slow_queries: Mutex::new(HashMap::new()),
            credits_calls: Mutex::new(Vec::new()),
            similar_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_credits(&self, outcome: Result<Credits, FetchError>) {
        *self.credits.lock().unwrap() = outcome;
    }

    pub fn set_similar(&self, outcome: Result<Vec<MediaRef>, FetchError>) {
        *self.similar.lock().unwrap() = outcome;
    }

    /// Delay credits and similar fetches, e.g. to let several subscribers
    /// attach before the join completes.
    pub fn set_detail_delay(&self, delay: Duration) {
        *self.detail_delay.lock().unwrap() = delay;
    }

    /// Delay search fetches for one specific query.
    pub fn delay_query(&self, query: &str, delay: Duration) {
        self.slow_queries
            .lock()
            .unwrap()
            .insert(query.to_string(), delay);
    }

    pub fn credits_call_count(&self) -> usize {
        self.credits_calls.lock().unwrap().len()
    }

    pub fn similar_call_count(&self) -> usize {
        self.similar_calls.lock().unwrap().len()
    }

    pub fn search_log(&self) -> Vec<(String, u32)> {
        self.search_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaCatalog for ScriptedCatalog {
    async fn fetch_cast_crew(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Credits, FetchError> {
        self.credits_calls.lock().unwrap().push((media_type, id));
        let delay = *self.detail_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.credits.lock().unwrap().clone()
    }

    async fn fetch_similar(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Vec<MediaRef>, FetchError> {
        self.similar_calls.lock().unwrap().push((media_type, id));
        let delay = *self.detail_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.similar.lock().unwrap().clone()
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MediaRef>, FetchError> {
        self.search_calls
            .lock()
            .unwrap()
            .push((query.to_string(), page));
        let delay = self.slow_queries.lock().unwrap().get(query).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        (self.search)(query, page)
    }
}
