//! End-to-end import: Doxygen output tree → sanitized, titled → one `.rst` file.

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use dotdoc_graphviz::title_for_path;
use dotdoc_shared::{
    CheckOutcome, DiagramSource, DotdocError, ImportConfig, ImportOutcome, ImportReport, Result,
};

use crate::collect::{collect_graph_files, is_legend};
use crate::emit::{render_document, write_document};

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each diagram is appended to the document.
    fn diagram_rendered(&self, title: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &ImportReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn diagram_rendered(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &ImportReport) {}
}

/// Discovered files split into what gets embedded and what was dropped.
struct Selection {
    discovered: usize,
    skipped_legends: usize,
    sources: Vec<DiagramSource>,
}

/// Drop legend graphs and pair the rest with their titles, keeping order.
fn select_sources(paths: Vec<PathBuf>) -> Selection {
    let discovered = paths.len();
    let sources: Vec<DiagramSource> = paths
        .into_iter()
        .filter(|path| !is_legend(path))
        .map(|path| DiagramSource {
            title: title_for_path(&path),
            path,
        })
        .collect();

    Selection {
        discovered,
        skipped_legends: discovered - sources.len(),
        sources,
    }
}

/// Run the full import.
///
/// 1. Collect `.dot` files (missing input root → warn, write nothing)
/// 2. Filter legends, derive titles
/// 3. Read + sanitize each file into the document
/// 4. Overwrite the output file
#[instrument(skip_all, fields(input = %config.input_dir.display(), output = %config.output_file.display()))]
pub fn import_diagrams(
    config: &ImportConfig,
    progress: &dyn ProgressReporter,
) -> Result<ImportOutcome> {
    progress.phase("Collecting diagrams");
    let Some(paths) = collect_graph_files(&config.input_dir)? else {
        warn!(
            input = %config.input_dir.display(),
            "input directory not found; run doxygen first"
        );
        return Ok(ImportOutcome::MissingInput {
            input_dir: config.input_dir.clone(),
        });
    };

    debug!(count = paths.len(), "found dot files");

    let selection = select_sources(paths);

    progress.phase("Rendering diagrams");
    let document = render_document(&selection.sources, progress)?;

    progress.phase("Writing document");
    write_document(&config.output_file, &document)?;

    let report = ImportReport {
        output_file: config.output_file.clone(),
        discovered: selection.discovered,
        emitted: selection.sources.len(),
        skipped_legends: selection.skipped_legends,
    };

    info!(
        output = %report.output_file.display(),
        discovered = report.discovered,
        emitted = report.emitted,
        skipped_legends = report.skipped_legends,
        "generated diagram document"
    );

    progress.done(&report);

    Ok(ImportOutcome::Written(report))
}

/// Render the document as [`import_diagrams`] would and compare it with the
/// output file on disk, without writing anything.
#[instrument(skip_all, fields(input = %config.input_dir.display(), output = %config.output_file.display()))]
pub fn check_diagrams(config: &ImportConfig) -> Result<CheckOutcome> {
    let Some(paths) = collect_graph_files(&config.input_dir)? else {
        warn!(input = %config.input_dir.display(), "input directory not found");
        return Ok(CheckOutcome::MissingInput {
            input_dir: config.input_dir.clone(),
        });
    };

    let selection = select_sources(paths);
    let expected = render_document(&selection.sources, &SilentProgress)?;
    let output_file = config.output_file.clone();

    let actual = match std::fs::read_to_string(&output_file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(CheckOutcome::Stale {
                output_file,
                reason: "output file does not exist".into(),
            });
        }
        Err(e) => return Err(DotdocError::io(&output_file, e)),
    };

    if actual == expected {
        debug!(emitted = selection.sources.len(), "output is current");
        return Ok(CheckOutcome::UpToDate {
            output_file,
            emitted: selection.sources.len(),
        });
    }

    Ok(CheckOutcome::Stale {
        output_file,
        reason: describe_difference(&expected, &actual),
    })
}

/// Short human description of where two documents diverge.
fn describe_difference(expected: &str, actual: &str) -> String {
    let first_mismatch = expected
        .lines()
        .zip(actual.lines())
        .position(|(e, a)| e != a);

    match first_mismatch {
        Some(idx) => format!("first difference at line {}", idx + 1),
        None => {
            let (e, a) = (expected.lines().count(), actual.lines().count());
            if e != a {
                return format!("expected {e} lines, found {a}");
            }
            // `lines` drops the final newline, so compare it separately.
            match (expected.ends_with('\n'), actual.ends_with('\n')) {
                (true, false) => "missing final newline".into(),
                (false, true) => "unexpected final newline".into(),
                _ => "line endings differ".into(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
