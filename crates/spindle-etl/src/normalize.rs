//! Record normalization: raw catalog records in, canonical rows out.
//!
//! The normalizer owns one set of classifiers built from the rule tables
//! and applies them field by field. Records are independent of each other;
//! the output of a batch has one entry per input, in input order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use spindle_core::model::{NormalizedRecord, RawRecord, ReleaseId};
use spindle_core::taxonomy::artist::{format_list, strip_disambiguation};
use spindle_core::taxonomy::{ClassificationRules, Classifiers};

use crate::batch::{BatchReport, ErrorPolicy, RecordFailure};
use crate::catalog::CatalogRelease;
use crate::error::{NormalizeError, NormalizeResult};

/// Descriptor marking a picture disc, whatever its pressing text says.
const PICTURE_DISC: &str = "Picture Disc";

/// Shape of the records in an input batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Flat [`RawRecord`] objects.
    #[default]
    Records,
    /// Release payloads from the catalog service, see [`CatalogRelease`].
    Catalog,
}

/// Maps raw records onto the canonical schema.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    classifiers: Classifiers,
    input_format: InputFormat,
}

impl RecordNormalizer {
    #[must_use]
    pub fn new(rules: &ClassificationRules) -> Self {
        Self {
            classifiers: Classifiers::from_rules(rules),
            input_format: InputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_input_format(mut self, input_format: InputFormat) -> Self {
        self.input_format = input_format;
        self
    }

    pub fn classifiers(&self) -> &Classifiers {
        &self.classifiers
    }

    pub fn input_format(&self) -> InputFormat {
        self.input_format
    }

    /// Normalize one typed record.
    pub fn normalize(&self, raw: &RawRecord) -> NormalizedRecord {
        let classifiers = &self.classifiers;

        let color_source = if raw.descriptors.iter().any(|d| d == PICTURE_DISC) {
            PICTURE_DISC
        } else {
            raw.pressing.as_str()
        };

        let artists: Vec<String> = raw
            .artists
            .iter()
            .map(|name| strip_disambiguation(name).to_string())
            .collect();
        let artist_display = format_list(&artists);

        NormalizedRecord {
            id: raw.id,
            title: raw.title.clone(),
            year: raw.year,
            album_year: raw.album_year,
            regions: classifiers.region.parse(&raw.country),
            artists,
            artist_ids: raw.artist_ids.clone(),
            artist_display,
            format: raw.format.clone(),
            quantity: raw.quantity,
            pressing: raw.pressing.clone(),
            descriptors: raw.descriptors.clone(),
            color_category: classifiers.color.classify(color_source),
            size_category: classifiers.size.classify(&raw.descriptors),
            edition_type: classifiers.edition.classify(&raw.descriptors),
            genres: raw.genres.clone(),
            wants: raw.wants,
            haves: raw.haves,
            rating: raw.rating,
            url: raw.url.clone(),
            prices: raw.prices,
        }
    }

    /// Decode an untyped record according to the configured input format.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::MalformedInput`] when a required field is
    /// missing or has the wrong shape. The error carries the record id when
    /// the payload has a readable one.
    pub fn decode(&self, value: &Value) -> NormalizeResult<RawRecord> {
        let malformed =
            |e: serde_json::Error| NormalizeError::malformed(readable_id(value), e.to_string());

        match self.input_format {
            InputFormat::Records => RawRecord::deserialize(value).map_err(malformed),
            InputFormat::Catalog => CatalogRelease::deserialize(value)
                .map_err(malformed)?
                .into_raw_record(),
        }
    }

    /// Decode and normalize one untyped record.
    ///
    /// # Errors
    ///
    /// See [`RecordNormalizer::decode`].
    pub fn normalize_value(&self, value: &Value) -> NormalizeResult<NormalizedRecord> {
        self.decode(value).map(|raw| self.normalize(&raw))
    }

    /// Normalize every record of a batch, one result per input in order.
    pub fn normalize_batch(&self, batch: &[Value]) -> Vec<NormalizeResult<NormalizedRecord>> {
        batch.iter().map(|value| self.normalize_value(value)).collect()
    }

    /// Normalize a batch under an error policy.
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::HaltOnFirstError`], returns the first record
    /// failure. With [`ErrorPolicy::SkipAndContinue`] this never fails;
    /// failures are listed in the report.
    pub fn run(&self, batch: &[Value], policy: ErrorPolicy) -> NormalizeResult<BatchReport> {
        log::info!(
            "Normalizing {} records ({:?}, {:?})",
            batch.len(),
            self.input_format,
            policy
        );

        let mut report = BatchReport::default();

        for (index, value) in batch.iter().enumerate() {
            match self.normalize_value(value) {
                Ok(record) => report.records.push(record),
                Err(err) if policy == ErrorPolicy::HaltOnFirstError => {
                    log::warn!("Halting at record #{index}: {err}");
                    return Err(err);
                }
                Err(err) => {
                    log::warn!("Skipping record #{index}: {err}");
                    report.failures.push(RecordFailure::new(index, &err));
                }
            }
        }

        log::info!(
            "Normalized {} of {} records, {} skipped",
            report.records.len(),
            report.total(),
            report.failures.len()
        );

        Ok(report)
    }
}

fn readable_id(value: &Value) -> Option<ReleaseId> {
    value.get("id").and_then(Value::as_u64).map(ReleaseId::new)
}
