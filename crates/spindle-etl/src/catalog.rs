//! Catalog release payloads.
//!
//! Decodes the release objects returned by the catalog service (one per
//! release in a collection export) into [`RawRecord`]s. Only the shape is
//! handled here: authenticating and paging through the service happen
//! upstream of spindle.
//!
//! A payload carries several formats; the first one describes the physical
//! item and supplies the pressing text, descriptors, format name and disc
//! count. Pressings without any text are standard black vinyl.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Deserialize;

use spindle_core::model::{null_as_default, ArtistId, RawRecord, ReleaseId};

use crate::error::{NormalizeError, NormalizeResult};
use crate::prices::prices_from_scraped;

/// Pressing text recorded when the catalog gives none.
pub const STANDARD_PRESSING: &str = "Standard Black";

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// A release as returned by the catalog's release endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRelease {
    pub id: ReleaseId,
    pub title: String,
    /// Release year; the catalog reports `0` when unknown.
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artists: Vec<CatalogArtist>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: Vec<CatalogFormat>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub community: Option<CatalogCommunity>,
    /// The master release this pressing belongs to, if any.
    #[serde(default)]
    pub master: Option<CatalogMaster>,
    /// Public page of the release.
    #[serde(default)]
    pub uri: Option<String>,
    /// Sold-price figures scraped from the release page, joined in by the
    /// caller (e.g. `["$12.00", "$20.50", "$48.99"]`).
    #[serde(default, deserialize_with = "null_as_default")]
    pub scraped_prices: Vec<String>,
}

/// A primary artist credit on a release.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogArtist {
    pub id: ArtistId,
    pub name: String,
}

/// A format entry describing the physical medium.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFormat {
    /// Format name (e.g. "Vinyl", "CD").
    pub name: String,
    /// Number of discs, as a string.
    #[serde(default)]
    pub qty: Option<String>,
    /// Free-text pressing details, usually the color.
    #[serde(default)]
    pub text: Option<String>,
    /// Descriptor tokens (e.g. "LP", "Album", "Limited Edition").
    #[serde(default)]
    pub descriptions: Vec<String>,
}

/// Community statistics for a release.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCommunity {
    #[serde(default)]
    pub want: Option<u32>,
    #[serde(default)]
    pub have: Option<u32>,
    #[serde(default)]
    pub rating: Option<CatalogRating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRating {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogMaster {
    #[serde(default)]
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// Artist selection
// ---------------------------------------------------------------------------

/// Which attribute of the artist credits to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistField {
    Name,
    Id,
}

/// One attribute of an artist credit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArtistValue {
    Name(String),
    Id(ArtistId),
}

/// Drop repeated items, keeping the first occurrence of each.
fn dedup_preserving_order<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

impl CatalogRelease {
    /// Artist names or ids in credit order, without repeats.
    ///
    /// Artists credited under several scripts can appear twice in the
    /// catalog's list.
    pub fn artist_info(&self, field: ArtistField) -> Vec<ArtistValue> {
        match field {
            ArtistField::Name => self.artist_names().into_iter().map(ArtistValue::Name).collect(),
            ArtistField::Id => self.artist_ids().into_iter().map(ArtistValue::Id).collect(),
        }
    }

    fn artist_names(&self) -> Vec<String> {
        dedup_preserving_order(self.artists.iter().map(|artist| artist.name.clone()))
    }

    fn artist_ids(&self) -> Vec<ArtistId> {
        dedup_preserving_order(self.artists.iter().map(|artist| artist.id))
    }

    /// Year of the original release: the master's year when this pressing
    /// has a master, otherwise its own year.
    pub fn album_year(&self) -> Option<i32> {
        self.master
            .as_ref()
            .and_then(|master| master.year)
            .filter(|year| *year > 0)
            .or_else(|| self.release_year())
    }

    fn release_year(&self) -> Option<i32> {
        self.year.filter(|year| *year > 0)
    }

    /// Decode into a [`RawRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::MalformedInput`] when the release has no
    /// country or no formats, or when the disc count or a scraped price is
    /// not a number.
    pub fn into_raw_record(self) -> NormalizeResult<RawRecord> {
        let id = self.id;
        let malformed = |reason: String| NormalizeError::malformed(Some(id), reason);

        let year = self.release_year();
        let album_year = self.album_year();
        let artists = self.artist_names();
        let artist_ids = self.artist_ids();

        let Self {
            title,
            country,
            formats,
            genres,
            community,
            uri,
            scraped_prices,
            ..
        } = self;

        let country = country.ok_or_else(|| malformed("release has no country".to_string()))?;

        let format = formats
            .into_iter()
            .next()
            .ok_or_else(|| malformed("release has no formats".to_string()))?;

        let quantity = format
            .qty
            .as_deref()
            .map(str::parse::<u32>)
            .transpose()
            .map_err(|e| malformed(format!("invalid format quantity: {e}")))?;

        let prices = prices_from_scraped(&scraped_prices)
            .map_err(|e| malformed(format!("invalid scraped price: {e}")))?;

        let (wants, haves, rating) = match community {
            Some(c) => (c.want, c.have, c.rating.and_then(|r| r.average)),
            None => (None, None, None),
        };

        Ok(RawRecord {
            id,
            title,
            year,
            album_year,
            country,
            artists,
            artist_ids,
            format: Some(format.name),
            quantity,
            pressing: format.text.unwrap_or_else(|| STANDARD_PRESSING.to_string()),
            descriptors: format.descriptions,
            genres,
            wants,
            haves,
            rating,
            url: uri,
            prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_release() -> serde_json::Value {
        json!({
            "id": 12345,
            "title": "Geogaddi",
            "year": 2013,
            "country": "UK & Europe",
            "artists": [
                {"id": 2013, "name": "Boards of Canada (2)"},
                {"id": 2013, "name": "Boards of Canada (2)"}
            ],
            "formats": [
                {
                    "name": "Vinyl",
                    "qty": "3",
                    "text": "Ocean Blue",
                    "descriptions": ["LP", "Album", "Reissue"]
                },
                {"name": "CD", "qty": "1", "descriptions": ["Album"]}
            ],
            "genres": ["Electronic"],
            "community": {"want": 120, "have": 3400, "rating": {"average": 4.62, "count": 900}},
            "master": {"year": 2002},
            "uri": "https://catalog.example/release/12345",
            "scraped_prices": ["$25.00", "$38.50", "$1,100.00"]
        })
    }

    #[test]
    fn test_full_release_converts() {
        let release: CatalogRelease = serde_json::from_value(full_release()).unwrap();
        let record = release.into_raw_record().unwrap();

        assert_eq!(record.id, ReleaseId::new(12345));
        assert_eq!(record.year, Some(2013));
        assert_eq!(record.album_year, Some(2002));
        assert_eq!(record.country, "UK & Europe");
        assert_eq!(record.artists, vec!["Boards of Canada (2)"]);
        assert_eq!(record.artist_ids, vec![ArtistId::new(2013)]);
        assert_eq!(record.format.as_deref(), Some("Vinyl"));
        assert_eq!(record.quantity, Some(3));
        assert_eq!(record.pressing, "Ocean Blue");
        assert_eq!(record.descriptors, vec!["LP", "Album", "Reissue"]);
        assert_eq!(record.wants, Some(120));
        assert_eq!(record.haves, Some(3400));
        assert_eq!(record.rating, Some(4.62));
        assert_eq!(record.prices.high, Some(1100.0));
    }

    #[test]
    fn test_missing_text_is_standard_black() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 1,
            "title": "Plain",
            "country": "US",
            "artists": [{"id": 5, "name": "Someone"}],
            "formats": [{"name": "Vinyl", "qty": "1", "descriptions": ["LP"]}]
        }))
        .unwrap();
        let record = release.into_raw_record().unwrap();
        assert_eq!(record.pressing, STANDARD_PRESSING);
        assert!(record.prices.is_empty());
    }

    #[test]
    fn test_album_year_falls_back_to_release_year() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 1,
            "title": "No Master",
            "year": 1999,
            "country": "US",
            "formats": [{"name": "Vinyl"}]
        }))
        .unwrap();
        assert_eq!(release.album_year(), Some(1999));
    }

    #[test]
    fn test_unknown_year_is_none() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 1,
            "title": "Undated",
            "year": 0,
            "country": "US",
            "formats": [{"name": "Vinyl"}]
        }))
        .unwrap();
        let record = release.into_raw_record().unwrap();
        assert!(record.year.is_none());
        assert!(record.album_year.is_none());
    }

    #[test]
    fn test_artist_info_keeps_first_occurrence_order() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 1,
            "title": "Split",
            "country": "US",
            "artists": [
                {"id": 2, "name": "B"},
                {"id": 1, "name": "A"},
                {"id": 2, "name": "B"}
            ],
            "formats": [{"name": "Vinyl"}]
        }))
        .unwrap();

        assert_eq!(
            release.artist_info(ArtistField::Name),
            vec![
                ArtistValue::Name("B".to_string()),
                ArtistValue::Name("A".to_string())
            ]
        );
        assert_eq!(
            release.artist_info(ArtistField::Id),
            vec![
                ArtistValue::Id(ArtistId::new(2)),
                ArtistValue::Id(ArtistId::new(1))
            ]
        );
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 80,
            "title": "Sparse",
            "country": "US",
            "artists": null,
            "genres": null,
            "scraped_prices": null,
            "formats": [{"name": "Vinyl", "descriptions": ["LP"]}]
        }))
        .unwrap();
        let record = release.into_raw_record().unwrap();
        assert!(record.artists.is_empty());
        assert!(record.artist_ids.is_empty());
        assert!(record.genres.is_empty());
        assert!(record.prices.is_empty());
    }

    #[test]
    fn test_no_formats_is_malformed() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 77,
            "title": "Formatless",
            "country": "US"
        }))
        .unwrap();
        let err = release.into_raw_record().unwrap_err();
        assert_eq!(err.record_id(), Some(ReleaseId::new(77)));
        assert!(err.to_string().contains("no formats"));
    }

    #[test]
    fn test_no_country_is_malformed() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 78,
            "title": "Stateless",
            "formats": [{"name": "Vinyl"}]
        }))
        .unwrap();
        assert!(release.into_raw_record().is_err());
    }

    #[test]
    fn test_bad_quantity_is_malformed() {
        let release: CatalogRelease = serde_json::from_value(json!({
            "id": 79,
            "title": "Odd",
            "country": "US",
            "formats": [{"name": "Vinyl", "qty": "two"}]
        }))
        .unwrap();
        let err = release.into_raw_record().unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }
}
