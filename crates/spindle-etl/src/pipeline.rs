use treadle::Workflow;

use crate::NormalizeStage;

/// Build the normalize pipeline.
///
/// # Errors
/// Returns an error if the workflow cannot be built.
pub fn build_pipeline(stage: NormalizeStage) -> treadle::Result<Workflow> {
    Workflow::builder().stage("normalize", stage).build()
}
