//! Data structures and types for marquee
//!
//! Contains all shared models used across the pipelines organized by domain:
//! - **Catalog**: media references and types as returned by the remote catalog
//! - **Detail**: the joined cast/crew/similar aggregate
//! - **Sections**: ordered, labeled display groups handed to the renderer

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models
// =============================================================================

/// Media type discriminator for catalog items.
///
/// Anything the catalog reports that is neither `movie` nor `tv` (people,
/// collections, future additions) maps to `Unknown` and is carried through
/// rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
    #[default]
    Unknown,
}

impl MediaType {
    /// Parse the catalog's raw `media_type` string, falling back to `Unknown`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "movie" => MediaType::Movie,
            "tv" => MediaType::Tv,
            _ => MediaType::Unknown,
        }
    }

    /// The lowercase path segment used in catalog URLs.
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
            MediaType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
            MediaType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Immutable identity of a catalog item.
///
/// Created by deserializing a remote response and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub id: u64,
    pub media_type: MediaType,
    pub title: String,
    pub year: Option<u16>,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f32,
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

/// Cast and crew names for one catalog item, in the order the remote
/// returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub cast: Vec<String>,
    pub crew: Vec<String>,
}

// =============================================================================
// Detail Model
// =============================================================================

/// The joined detail aggregate for one root item.
///
/// Constructed exactly once per successful join of the credits and
/// similar-items fetches. `cast`/`crew` keep remote order; `similar` is not
/// deduplicated against `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDetail {
    pub root: MediaRef,
    pub cast: Vec<String>,
    pub crew: Vec<String>,
    pub similar: Vec<MediaRef>,
}

impl MediaDetail {
    /// Combine a root item with the results of both detail fetches.
    pub fn join(root: MediaRef, credits: Credits, similar: Vec<MediaRef>) -> Self {
        Self {
            root,
            cast: credits.cast,
            crew: credits.crew,
            similar,
        }
    }
}

impl fmt::Display for MediaDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} cast, {} crew, {} similar",
            self.root,
            self.cast.len(),
            self.crew.len(),
            self.similar.len()
        )
    }
}

// =============================================================================
// Section Models
// =============================================================================

/// One display item inside a section.
///
/// Renderers branch on this tag to pick a cell, never on header text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SectionItem {
    /// The large top cell carrying the full joined detail.
    Header(MediaDetail),
    /// A plain media tile.
    Media(MediaRef),
}

impl SectionItem {
    /// The media reference, if this is a plain tile.
    pub fn as_media(&self) -> Option<&MediaRef> {
        match self {
            SectionItem::Media(media) => Some(media),
            SectionItem::Header(_) => None,
        }
    }
}

/// An ordered, labeled group of display items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section label; empty for the detail header section.
    pub header: String,
    pub items: Vec<SectionItem>,
}

impl Section {
    pub fn new(header: impl Into<String>, items: Vec<SectionItem>) -> Self {
        Self {
            header: header.into(),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
