use anyhow::{Context, Result};
use std::path::PathBuf;

use spindle_etl::export::default_output_path;
use spindle_etl::{
    export_to_path, load_batch, BatchReport, Config, InputFormat, RecordNormalizer,
};

/// Normalize one batch file and write the rows as JSON lines.
pub fn run_normalize(
    input: PathBuf,
    output: Option<PathBuf>,
    format: InputFormat,
    config: &Config,
) -> Result<()> {
    let rules = config.rules()?;
    let normalizer = RecordNormalizer::new(&rules).with_input_format(format);

    let batch = load_batch(&input)
        .with_context(|| format!("Failed to read batch {}", input.display()))?;

    let report = normalizer
        .run(&batch, config.error_policy())
        .context("Normalization halted")?;

    let output = output.unwrap_or_else(|| default_output_path(&input));
    export_to_path(&output, &report.records)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_summary(&report);
    println!("  Output: {}", output.display());

    Ok(())
}

pub(crate) fn print_summary(report: &BatchReport) {
    println!("\n💿 Normalized {} of {} records", report.records.len(), report.total());

    if report.is_clean() {
        return;
    }

    println!("\n  Skipped {} malformed records:", report.failures.len());
    for failure in &report.failures {
        println!("    #{}: {}", failure.index, failure.reason);
    }
    println!("\n  Run with --halt-on-error to stop at the first malformed record");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_normalize_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.json");
        std::fs::write(
            &input,
            r#"[{"id": 1, "title": "One", "country": "US", "artists": ["A"], "pressing": "Gold", "descriptors": ["LP"]},
                {"id": 2, "title": "Broken"}]"#,
        )
        .unwrap();
        let rules = dir.path().join("rules.toml");
        std::fs::write(&rules, spindle_core::taxonomy::rules::DEFAULT_RULES_TOML).unwrap();
        let config = Config::default().with_overrides(Some(rules), false);

        run_normalize(input.clone(), None, InputFormat::Records, &config).unwrap();

        let exported = std::fs::read_to_string(default_output_path(&input)).unwrap();
        assert_eq!(exported.lines().count(), 1);
        assert!(exported.contains("\"Yellow\""));
    }

    #[test]
    fn test_run_normalize_halts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.json");
        std::fs::write(&input, r#"[{"id": 2, "title": "Broken"}]"#).unwrap();
        let rules = dir.path().join("rules.toml");
        std::fs::write(&rules, spindle_core::taxonomy::rules::DEFAULT_RULES_TOML).unwrap();
        let config = Config::default().with_overrides(Some(rules), true);

        let output = dir.path().join("out.jsonl");
        let result = run_normalize(input, Some(output.clone()), InputFormat::Records, &config);

        assert!(result.is_err());
        assert!(!output.exists());
    }
}
