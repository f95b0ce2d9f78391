use anyhow::{Context, Result};
use std::path::PathBuf;

use spindle_etl::{
    build_pipeline, Config, InputFormat, NormalizeStage, RecordNormalizer, ReleaseBatch,
};

/// Run one batch through the tracked normalize pipeline.
pub async fn run_process(
    input: PathBuf,
    output: Option<PathBuf>,
    format: InputFormat,
    config: &Config,
) -> Result<()> {
    println!("\n💿 Spindle Normalize Pipeline\n");
    println!("  Batch: {}", input.display());
    println!("  State store: {}", config.state_path.display());
    println!();

    let rules = config.rules()?;
    let normalizer = RecordNormalizer::new(&rules).with_input_format(format);
    let mut stage = NormalizeStage::with_normalizer(normalizer, config.error_policy());
    if let Some(output) = output {
        stage = stage.with_output(output);
    }

    let workflow = build_pipeline(stage).context("Failed to build pipeline")?;

    if let Some(parent) = config.state_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create state directory")?;
    }
    let mut store = treadle::SqliteStateStore::open(&config.state_path)
        .await
        .context("Failed to open pipeline state store")?;

    let work_item = ReleaseBatch::new(input);

    // Subscribe to events for progress display
    let mut events = workflow.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                treadle::WorkflowEvent::StageStarted { stage, .. } => {
                    println!("  ⏳ [{stage}] Starting...");
                }
                treadle::WorkflowEvent::StageCompleted { stage, .. } => {
                    println!("  ✓ [{stage}] Complete");
                }
                treadle::WorkflowEvent::StageFailed { stage, error, .. } => {
                    eprintln!("  ✗ [{stage}] FAILED: {error}");
                }
                _ => {}
            }
        }
    });

    workflow
        .advance(&work_item, &mut store)
        .await
        .context("Pipeline execution failed")?;

    println!("\n✓ Pipeline run complete for {work_item}");
    println!("\nBatches with skipped records are held for review;");
    println!("rerun 'spindle normalize' on a fixed batch to export it again.");

    Ok(())
}
