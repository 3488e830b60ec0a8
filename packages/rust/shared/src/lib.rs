//! Shared types, error model, and configuration for dotdoc.
//!
//! This crate is the foundation depended on by all other dotdoc crates.
//! It provides:
//! - [`DotdocError`]: the unified error type
//! - Domain types ([`GraphFile`], [`DiagramSource`], [`ImportReport`])
//! - Configuration ([`AppConfig`], [`ImportConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_FILE, ImportConfig,
    ImportSection, config_file_path, init_config, load_config, load_config_from, load_config_in,
};
pub use error::{DotdocError, Result};
pub use types::{CheckOutcome, DiagramSource, GraphFile, ImportOutcome, ImportReport};
