//! Asynchronous aggregation pipelines
//!
//! - Detail: concurrent credits + similar join with a multicast replay cache
//! - Search: debounced, paginated free-text search state machine
//! - Selection: index-event to concrete-item relay
//!
//! Each pipeline owns its state on a single spawned task; network completions
//! are delivered back onto that task, so state is never mutated concurrently.

pub mod detail;
pub mod search;
pub mod selection;

pub use detail::{DetailHub, DetailSubscription, UnknownMediaPolicy};
pub use search::{SearchPhase, SearchPipeline, SearchSnapshot};
pub use selection::SelectionRelay;
