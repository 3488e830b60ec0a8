//! Recursive discovery of Graphviz sources under the Doxygen output tree.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::{debug, instrument, warn};

use dotdoc_graphviz::DOT_EXTENSION;
use dotdoc_shared::{DotdocError, Result};

/// Base-name prefix of Doxygen's symbol legend graph.
pub const LEGEND_PREFIX: &str = "graph_legend";

/// Find every `.dot` file under `root`, at any depth.
///
/// Returns `Ok(None)` when `root` does not exist. Paths come back sorted by
/// their byte representation, so `a-b.dot` sorts before `a/b.dot`.
/// Names starting with `.` are not matched, and entries that cannot be read
/// are skipped with a warning.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn collect_graph_files(root: &Path) -> Result<Option<Vec<PathBuf>>> {
    if !root.exists() {
        return Ok(None);
    }

    let escaped = Pattern::escape(&root.to_string_lossy());
    let pattern = Path::new(&escaped)
        .join("**")
        .join(format!("*.{DOT_EXTENSION}"));
    let pattern = pattern.to_string_lossy();

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| {
        DotdocError::config(format!("invalid input pattern '{pattern}': {e}"))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => debug!(path = %path.display(), "skipping non-file match"),
            Err(e) => warn!(
                path = %e.path().display(),
                error = %e.error(),
                "skipping unreadable entry"
            ),
        }
    }

    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));

    debug!(count = files.len(), "collected graph files");

    Ok(Some(files))
}

/// Whether `path` is a Doxygen legend graph.
pub fn is_legend(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(LEGEND_PREFIX))
}
