//! Core domain types for the diagram import.

use std::path::{Path, PathBuf};

use crate::error::{DotdocError, Result};

// ---------------------------------------------------------------------------
// GraphFile
// ---------------------------------------------------------------------------

/// A discovered `.dot` file and its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphFile {
    /// Path as produced by the collector (relative if the input root was).
    pub path: PathBuf,
    /// Unmodified file content.
    pub content: String,
}

impl GraphFile {
    /// Read a graph file to completion. The handle is closed before returning.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DotdocError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }
}

// ---------------------------------------------------------------------------
// DiagramSource
// ---------------------------------------------------------------------------

/// A retained (non-legend) graph file paired with its display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSource {
    pub path: PathBuf,
    pub title: String,
}

// ---------------------------------------------------------------------------
// Run results
// ---------------------------------------------------------------------------

/// Summary of a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Where the document was written.
    pub output_file: PathBuf,
    /// Every `.dot` file found, legends included.
    pub discovered: usize,
    /// Diagrams embedded in the document.
    pub emitted: usize,
    /// Legend graphs that were dropped.
    pub skipped_legends: usize,
}

/// Result of an import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The input root does not exist; nothing was written.
    MissingInput { input_dir: PathBuf },
    /// The document was (re)written.
    Written(ImportReport),
}

/// Result of comparing freshly rendered output with the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The input root does not exist; there is nothing to compare.
    MissingInput { input_dir: PathBuf },
    /// The output file matches what an import would write.
    UpToDate { output_file: PathBuf, emitted: usize },
    /// The output file is missing or differs.
    Stale { output_file: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_graph_file_reports_path() {
        let path = std::env::temp_dir().join(format!("dotdoc-missing-{}.dot", uuid::Uuid::now_v7()));
        let err = GraphFile::read(&path).unwrap_err();
        match err {
            DotdocError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_graph_file_keeps_content_verbatim() {
        let path = std::env::temp_dir().join(format!("dotdoc-read-{}.dot", uuid::Uuid::now_v7()));
        std::fs::write(&path, "digraph G {\r\n  a -> b;\r\n}\n").unwrap();

        let file = GraphFile::read(&path).unwrap();
        assert_eq!(file.path, path);
        assert_eq!(file.content, "digraph G {\r\n  a -> b;\r\n}\n");

        let _ = std::fs::remove_file(&path);
    }
}
