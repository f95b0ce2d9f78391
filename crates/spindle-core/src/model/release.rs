use serde::{Deserialize, Deserializer, Serialize};

use crate::model::ids::{ArtistId, ReleaseId};

/// Sold-price figures scraped from the marketplace page of a release.
///
/// Every figure is optional; a release that has never sold has no figures
/// at all, which is a valid state rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
}

impl Prices {
    #[must_use]
    pub const fn new(low: Option<f64>, median: Option<f64>, high: Option<f64>) -> Self {
        Self { low, median, high }
    }

    /// Returns `true` when no figure is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.low.is_none() && self.median.is_none() && self.high.is_none()
    }
}

/// Deserialize an explicit `null` the same way as a missing key.
///
/// Pair with `#[serde(default)]`, which only covers the missing key.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One release as received from the catalog.
///
/// `country`, `artists`, `pressing` and `descriptors` are required: a
/// payload missing any of them (or carrying the wrong shape) does not
/// deserialize. Everything else is optional pass-through data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: ReleaseId,
    pub title: String,

    /// Year of this pressing.
    #[serde(default)]
    pub year: Option<i32>,

    /// Year of the original (master) release.
    #[serde(default)]
    pub album_year: Option<i32>,

    /// Raw country string, e.g. "US", "UK & Europe", "US, Canada".
    pub country: String,

    /// Artist display names as listed by the catalog, suffixes included.
    pub artists: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_ids: Vec<ArtistId>,

    /// Format name, e.g. "Vinyl".
    #[serde(default)]
    pub format: Option<String>,

    /// Number of discs in the format.
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Free-text pressing description (usually the color).
    pub pressing: String,

    /// Format descriptor tokens, e.g. `["LP", "Album", "Limited Edition"]`.
    pub descriptors: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,

    #[serde(default)]
    pub wants: Option<u32>,
    #[serde(default)]
    pub haves: Option<u32>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub prices: Prices,
}

impl RawRecord {
    #[must_use]
    pub fn new(id: impl Into<ReleaseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            album_year: None,
            country: String::new(),
            artists: Vec::new(),
            artist_ids: Vec::new(),
            format: None,
            quantity: None,
            pressing: String::new(),
            descriptors: Vec::new(),
            genres: Vec::new(),
            wants: None,
            haves: None,
            rating: None,
            url: None,
            prices: Prices::default(),
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn with_artists<I, S>(mut self, artists: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artists = artists.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_pressing(mut self, pressing: impl Into<String>) -> Self {
        self.pressing = pressing.into();
        self
    }

    #[must_use]
    pub fn with_descriptors<I, S>(mut self, descriptors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.descriptors = descriptors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_years(mut self, year: i32, album_year: i32) -> Self {
        self.year = Some(year);
        self.album_year = Some(album_year);
        self
    }

    #[must_use]
    pub fn with_prices(mut self, prices: Prices) -> Self {
        self.prices = prices;
        self
    }
}
