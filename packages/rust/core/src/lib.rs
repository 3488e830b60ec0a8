//! Diagram import pipeline for dotdoc.
//!
//! This crate ties together collection, sanitizing, and document emission
//! into end-to-end workflows (`import_diagrams`, `check_diagrams`).

pub mod collect;
pub mod emit;
pub mod pipeline;

pub use pipeline::{ProgressReporter, SilentProgress, check_diagrams, import_diagrams};
