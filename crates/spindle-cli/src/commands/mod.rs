pub mod classify;
pub mod config;
pub mod normalize;
pub mod process;
pub mod rules;

pub use normalize::run_normalize;
pub use process::run_process;
