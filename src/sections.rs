//! Display-section assembly
//!
//! Pure, total functions mapping pipeline output into the ordered
//! [`Section`] lists the render collaborator consumes. No I/O, no state.

use crate::models::{MediaDetail, MediaRef, Section, SectionItem};

/// Header label for the similar-content section of a detail screen.
pub const SIMILAR_HEADER: &str = "Similar Movies & Shows";

/// Build the two fixed sections of a detail screen.
///
/// Always returns the unlabeled header section first, then the similar
/// section. An empty `similar` list yields an empty second section, never an
/// absent one.
pub fn detail_sections(detail: &MediaDetail) -> Vec<Section> {
    vec![
        Section::new("", vec![SectionItem::Header(detail.clone())]),
        Section::new(
            SIMILAR_HEADER,
            detail
                .similar
                .iter()
                .cloned()
                .map(SectionItem::Media)
                .collect(),
        ),
    ]
}

/// Build the single section of a search-results screen, items in input order.
pub fn search_sections(label: &str, results: &[MediaRef]) -> Vec<Section> {
    vec![Section::new(
        label,
        results.iter().cloned().map(SectionItem::Media).collect(),
    )]
}
