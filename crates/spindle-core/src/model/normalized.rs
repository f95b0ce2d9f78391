use serde::{Deserialize, Serialize};

use crate::model::ids::{ArtistId, ReleaseId};
use crate::model::release::Prices;
use crate::taxonomy::{ColorCategory, EditionType, SizeCategory};

/// A release mapped onto the canonical analysis schema.
///
/// Produced exactly once per [`RawRecord`](crate::model::RawRecord) and never
/// mutated afterwards. The classified columns are closed enumerations, so a
/// row can never carry a label outside the canonical vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub id: ReleaseId,
    pub title: String,
    pub year: Option<i32>,
    pub album_year: Option<i32>,

    /// Region tokens in source order; never empty.
    pub regions: Vec<String>,

    /// Artist names with catalog disambiguation suffixes removed.
    pub artists: Vec<String>,
    pub artist_ids: Vec<ArtistId>,

    /// Bracketed display form of `artists`, e.g. `[Artist A, Artist B]`.
    pub artist_display: String,

    pub format: Option<String>,
    pub quantity: Option<u32>,

    /// Pressing text exactly as received.
    pub pressing: String,
    pub descriptors: Vec<String>,

    pub color_category: ColorCategory,
    pub size_category: SizeCategory,
    pub edition_type: EditionType,

    pub genres: Vec<String>,
    pub wants: Option<u32>,
    pub haves: Option<u32>,
    pub rating: Option<f64>,
    pub url: Option<String>,

    #[serde(flatten)]
    pub prices: Prices,
}
