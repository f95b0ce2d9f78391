//! Normalize stage: turn one batch file into exported canonical rows.
//!
//! Reads the batch named by the work item, normalizes it under the
//! configured error policy and writes the rows as JSON lines. Skipped
//! records are listed in the stage metadata and pause the item with
//! `StageOutcome::NeedsReview`.

use std::path::{Path, PathBuf};

use serde_json::json;
use treadle::{Stage, StageContext, StageOutcome};

use spindle_core::taxonomy::ClassificationRules;

use crate::batch::{load_batch, ErrorPolicy};
use crate::export::{default_output_path, export_to_path};
use crate::normalize::{InputFormat, RecordNormalizer};
use crate::work_item::batch_path;

/// The Normalize stage.
#[derive(Debug)]
pub struct NormalizeStage {
    normalizer: RecordNormalizer,
    policy: ErrorPolicy,
    output: Option<PathBuf>,
}

impl NormalizeStage {
    /// Create a stage with rules loaded from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the rules file cannot be loaded.
    pub fn new(
        rules_path: &Path,
        input_format: InputFormat,
        policy: ErrorPolicy,
    ) -> Result<Self, String> {
        let rules = ClassificationRules::load(rules_path).map_err(|e| {
            format!(
                "Failed to load classification rules from {}: {e}",
                rules_path.display()
            )
        })?;
        Ok(Self::with_normalizer(
            RecordNormalizer::new(&rules).with_input_format(input_format),
            policy,
        ))
    }

    /// Create a stage around a prepared normalizer.
    #[must_use]
    pub fn with_normalizer(normalizer: RecordNormalizer, policy: ErrorPolicy) -> Self {
        Self {
            normalizer,
            policy,
            output: None,
        }
    }

    /// Write the export to `output` instead of next to the input.
    #[must_use]
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(input))
    }
}

#[async_trait::async_trait]
impl Stage for NormalizeStage {
    fn name(&self) -> &str {
        "normalize"
    }

    async fn execute(
        &self,
        item: &dyn treadle::WorkItem,
        ctx: &mut StageContext,
    ) -> treadle::Result<StageOutcome> {
        let input = batch_path(item);

        let batch = load_batch(input).map_err(|e| {
            treadle::TreadleError::StageExecution(format!("Failed to load batch: {e}"))
        })?;

        let report = self.normalizer.run(&batch, self.policy).map_err(|e| {
            treadle::TreadleError::StageExecution(format!("Normalization halted: {e}"))
        })?;

        let output = self.output_path(input);
        export_to_path(&output, &report.records).map_err(|e| {
            treadle::TreadleError::StageExecution(format!("Failed to export rows: {e}"))
        })?;

        let failures = serde_json::to_value(&report.failures).map_err(|e| {
            treadle::TreadleError::StageExecution(format!("Failed to serialize failures: {e}"))
        })?;

        ctx.metadata
            .insert("normalized".to_string(), json!(report.records.len()));
        ctx.metadata
            .insert("failed".to_string(), json!(report.failures.len()));
        ctx.metadata.insert("failures".to_string(), failures);
        ctx.metadata
            .insert("output".to_string(), json!(output.display().to_string()));

        if report.is_clean() {
            Ok(StageOutcome::Complete)
        } else {
            log::info!(
                "{} records skipped in {}, flagging for review",
                report.failures.len(),
                item.id()
            );
            Ok(StageOutcome::NeedsReview)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work_item::ReleaseBatch;

    const CLEAN_BATCH: &str = r#"[
        {"id": 1, "title": "One", "country": "US", "artists": ["A (2)"], "pressing": "Ocean Blue", "descriptors": ["LP"]},
        {"id": 2, "title": "Two", "country": "UK & Europe", "artists": ["B"], "pressing": "Black", "descriptors": ["7\""]}
    ]"#;

    const DIRTY_BATCH: &str = r#"
{"id": 1, "title": "One", "country": "US", "artists": ["A"], "pressing": "Red", "descriptors": ["LP"]}
{"id": 2, "title": "Broken"}
"#;

    fn stage(policy: ErrorPolicy) -> NormalizeStage {
        NormalizeStage::with_normalizer(RecordNormalizer::default(), policy)
    }

    fn write_batch(dir: &Path, content: &str) -> ReleaseBatch {
        let path = dir.join("batch.json");
        std::fs::write(&path, content).unwrap();
        ReleaseBatch::new(path)
    }

    #[test]
    fn test_stage_name() {
        let stage = stage(ErrorPolicy::default());
        assert_eq!(stage.name(), "normalize");
    }

    #[test]
    fn test_stage_new_with_missing_rules_file() {
        let result = NormalizeStage::new(
            Path::new("/nonexistent/rules.toml"),
            InputFormat::Records,
            ErrorPolicy::default(),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clean_batch_completes() {
        let dir = tempfile::TempDir::new().unwrap();
        let item = write_batch(dir.path(), CLEAN_BATCH);
        let output = dir.path().join("out.jsonl");

        let stage = stage(ErrorPolicy::default()).with_output(output.clone());
        let mut ctx = StageContext::new("normalize".to_string());

        let outcome = stage.execute(&item, &mut ctx).await.unwrap();
        assert_eq!(outcome, StageOutcome::Complete);
        assert_eq!(ctx.metadata.get("normalized"), Some(&json!(2)));
        assert_eq!(ctx.metadata.get("failed"), Some(&json!(0)));

        let exported = std::fs::read_to_string(&output).unwrap();
        let first: serde_json::Value =
            serde_json::from_str(exported.lines().next().unwrap()).unwrap();
        assert_eq!(first["color_category"], "Blue");
        assert_eq!(first["regions"], json!(["USA"]));
        assert_eq!(first["artist_display"], "[A]");
    }

    #[tokio::test]
    async fn test_skipped_records_need_review() {
        let dir = tempfile::TempDir::new().unwrap();
        let item = write_batch(dir.path(), DIRTY_BATCH);

        let stage = stage(ErrorPolicy::SkipAndContinue);
        let mut ctx = StageContext::new("normalize".to_string());

        let outcome = stage.execute(&item, &mut ctx).await.unwrap();
        assert_eq!(outcome, StageOutcome::NeedsReview);
        assert_eq!(ctx.metadata.get("failed"), Some(&json!(1)));

        let failures = ctx.metadata.get("failures").unwrap().as_array().unwrap();
        assert_eq!(failures[0]["index"], 1);
        assert_eq!(failures[0]["id"], 2);

        let exported =
            std::fs::read_to_string(dir.path().join("batch.normalized.jsonl")).unwrap();
        assert_eq!(exported.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_halt_policy_fails_stage() {
        let dir = tempfile::TempDir::new().unwrap();
        let item = write_batch(dir.path(), DIRTY_BATCH);

        let stage = stage(ErrorPolicy::HaltOnFirstError);
        let mut ctx = StageContext::new("normalize".to_string());

        let result = stage.execute(&item, &mut ctx).await;
        assert!(result.is_err());
        assert!(!dir.path().join("batch.normalized.jsonl").exists());
    }

    #[tokio::test]
    async fn test_missing_batch_fails_stage() {
        let item = ReleaseBatch::new(PathBuf::from("/nonexistent/batch.json"));
        let stage = stage(ErrorPolicy::default());
        let mut ctx = StageContext::new("normalize".to_string());

        assert!(stage.execute(&item, &mut ctx).await.is_err());
    }
}
