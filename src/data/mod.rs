//! Core data models for memegle
//!
//! Raw GIPHY response records and the minimal display model the rest of the
//! application works with.

use serde::{Deserialize, Serialize};

/// A GIF reduced to what the UI needs to show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GifImage {
    /// Opaque identifier assigned by GIPHY
    pub id: String,
    /// Title of the GIF, empty when GIPHY has none
    pub title: String,
    /// Absolute URL of the original rendition
    pub image_url: String,
}

/// Envelope returned by the `trending` and `search` endpoints
#[derive(Debug, Deserialize)]
pub struct GifsResponse {
    /// GIF records in ranking order
    pub data: Vec<GifRecord>,
}

/// A single GIF record as GIPHY returns it
#[derive(Debug, Clone, Deserialize)]
pub struct GifRecord {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub images: GifImages,
}

/// Renditions available for a GIF; only the original is used
#[derive(Debug, Clone, Deserialize)]
pub struct GifImages {
    pub original: ImageRendition,
}

/// One rendition of a GIF
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRendition {
    pub url: String,
}

impl From<GifRecord> for GifImage {
    fn from(record: GifRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            image_url: record.images.original.url,
        }
    }
}

/// Converts raw GIPHY records into display images
///
/// Output has the same length and order as the input. Nothing is filtered or
/// deduplicated.
pub fn convert_records(records: Vec<GifRecord>) -> Vec<GifImage> {
    records.into_iter().map(GifImage::from).collect()
}
