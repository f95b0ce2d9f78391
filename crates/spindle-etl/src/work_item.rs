use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use treadle::WorkItem;

/// A batch file of raw records flowing through the pipeline.
///
/// The item id is the batch path, so the state store tracks progress per
/// file and stages can locate the batch from the id alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseBatch {
    id: String,
    /// Path to the batch file (JSON array or JSON lines).
    pub input: PathBuf,
}

impl ReleaseBatch {
    #[must_use]
    pub fn new(input: PathBuf) -> Self {
        Self {
            id: input.display().to_string(),
            input,
        }
    }
}

/// Resolve the batch path of a work item by its id.
pub fn batch_path(item: &dyn WorkItem) -> &Path {
    Path::new(item.id())
}

impl WorkItem for ReleaseBatch {
    fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ReleaseBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input.display())
    }
}
