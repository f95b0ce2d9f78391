//! Normalization pipeline for spindle.
//!
//! Decodes raw catalog batches, runs them through the classifiers, exports
//! the canonical rows, and wraps the whole thing as a treadle `Stage`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod prices;
pub mod stage;
pub mod work_item;

pub use batch::{load_batch, BatchReport, ErrorPolicy, RecordFailure};
pub use config::Config;
pub use error::{NormalizeError, NormalizeResult};
pub use export::{export_to_path, write_json_lines};
pub use normalize::{InputFormat, RecordNormalizer};
pub use pipeline::build_pipeline;
pub use stage::NormalizeStage;
pub use work_item::ReleaseBatch;
