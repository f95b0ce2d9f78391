//! Core domain model for spindle.
//!
//! This crate defines the release records flowing through the pipeline
//! (raw catalog records in, normalized rows out), the closed category
//! enumerations, the injectable classification rule tables, and the
//! classifiers that map free text onto those categories.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod model;
pub mod taxonomy;

pub use error::{Error, Result};
