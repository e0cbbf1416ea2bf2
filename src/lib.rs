//! marquee - async aggregation pipelines for a remote media catalog
//!
//! A client-side library that turns user intent (a search keystroke, a
//! selected media item) into display-ready section lists by orchestrating
//! calls to a remote media catalog: concurrent detail joins with a
//! multicast replay cache, debounced paginated search, and selection
//! hand-off for navigation.
//!
//! # Modules
//!
//! - `models` - Media references, joined details, display sections
//! - `api` - Catalog trait and the TMDB client
//! - `pipeline` - Detail, search and selection pipelines
//! - `sections` - Pure section builders
//! - `config` - Config file and API key handling
//!
//! # Wiring
//!
//! ```no_run
//! use std::sync::Arc;
//! use marquee::{DetailHub, SearchPipeline, SelectionRelay, TmdbClient};
//!
//! # async fn wire() {
//! let catalog = Arc::new(TmdbClient::new("api-key"));
//! let search = SearchPipeline::new(catalog.clone());
//! let details = DetailHub::new(catalog);
//! let (relay, mut selected) = SelectionRelay::for_search(search.snapshots());
//!
//! search.set_query("batman");
//! relay.select(0);
//! if let Some(media) = selected.recv().await {
//!     let mut subscription = details.observe(&media);
//!     let _detail = subscription.recv().await;
//! }
//! # }
//! ```

pub mod api;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod sections;

// Re-export commonly used types
pub use models::{Credits, MediaDetail, MediaRef, MediaType, Section, SectionItem};

pub use api::{FetchError, MediaCatalog, TmdbClient};
pub use config::Config;
pub use pipeline::{
    DetailHub, DetailSubscription, SearchPhase, SearchPipeline, SearchSnapshot, SelectionRelay,
    UnknownMediaPolicy,
};
