//! Selection relay tests
//!
//! Verifies lookup against the list as it exists at processing time and the
//! silent drop of out-of-range indices.

mod support;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use marquee::{MediaRef, SearchPhase, SearchPipeline, SelectionRelay};
use support::{media, ScriptedCatalog};

fn shared_items(initial: Vec<MediaRef>) -> Arc<Mutex<Vec<MediaRef>>> {
    Arc::new(Mutex::new(initial))
}

#[tokio::test]
async fn test_selection_resolves_item_at_index() {
    let items = shared_items(vec![media(1, "The Batman"), media(2, "Joker")]);
    let provider = {
        let items = items.clone();
        Arc::new(move || items.lock().unwrap().clone())
    };
    let (relay, mut selected) = SelectionRelay::spawn(provider);

    relay.select(1);
    let picked = selected.recv().await.unwrap();
    assert_eq!(picked.title, "Joker");
}

#[tokio::test]
async fn test_out_of_range_selection_is_dropped() {
    let items = shared_items(vec![media(1, "The Batman")]);
    let provider = {
        let items = items.clone();
        Arc::new(move || items.lock().unwrap().clone())
    };
    let (relay, mut selected) = SelectionRelay::spawn(provider);

    // index 5 no longer exists; only the follow-up selection resolves
    relay.select(5);
    relay.select(0);
    let picked = selected.recv().await.unwrap();
    assert_eq!(picked.title, "The Batman");
}

#[tokio::test]
async fn test_lookup_uses_list_at_processing_time() {
    let items = shared_items(vec![media(1, "Old Item")]);
    let provider = {
        let items = items.clone();
        Arc::new(move || items.lock().unwrap().clone())
    };
    let (relay, mut selected) = SelectionRelay::spawn(provider);

    relay.select(0);
    assert_eq!(selected.recv().await.unwrap().title, "Old Item");

    *items.lock().unwrap() = vec![media(2, "New Item")];
    relay.select(0);
    assert_eq!(selected.recv().await.unwrap().title, "New Item");
}

#[tokio::test(start_paused = true)]
async fn test_relay_wired_to_search_snapshots() {
    let catalog = Arc::new(ScriptedCatalog::with_search(|query, _| {
        Ok(vec![
            media(10, &format!("{} first", query)),
            media(11, &format!("{} second", query)),
        ])
    }));
    let pipeline = SearchPipeline::with_debounce(catalog, Duration::from_millis(300));
    let (relay, mut selected) = SelectionRelay::for_search(pipeline.snapshots());

    let mut rx = pipeline.snapshots();
    pipeline.set_query("dune");
    rx.wait_for(|s| s.phase == SearchPhase::Loaded).await.unwrap();

    relay.select(1);
    let picked = selected.recv().await.unwrap();
    assert_eq!(picked.title, "dune second");
}
