//! reStructuredText emitter for the aggregated diagram document.
//!
//! Layout:
//! ```text
//! Generated Doxygen Diagrams
//! --------------------------
//!
//! **<title>**
//!
//! .. graphviz::
//!
//!    <sanitized dot, indented three spaces>
//!
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use dotdoc_graphviz::sanitize;
use dotdoc_shared::{DiagramSource, DotdocError, GraphFile, Result};

use crate::pipeline::ProgressReporter;

/// Heading of the generated document.
pub const DOCUMENT_TITLE: &str = "Generated Doxygen Diagrams";

/// Written in place of entries when nothing survived filtering.
pub const EMPTY_NOTICE: &str = "No diagrams found.";

/// Sphinx directive that renders an inline DOT block.
pub const GRAPHVIZ_DIRECTIVE: &str = ".. graphviz::";

/// Prefix for every line of embedded DOT content.
pub const CONTENT_INDENT: &str = "   ";

/// Render the full document, reading and sanitizing one source at a time.
#[instrument(skip_all, fields(diagrams = sources.len()))]
pub fn render_document(sources: &[DiagramSource], progress: &dyn ProgressReporter) -> Result<String> {
    let mut doc = render_header();

    if sources.is_empty() {
        doc.push_str(EMPTY_NOTICE);
        doc.push('\n');
        return Ok(doc);
    }

    let total = sources.len();
    for (i, source) in sources.iter().enumerate() {
        let graph = GraphFile::read(&source.path)?;
        let content = sanitize(&graph.content);
        push_entry(&mut doc, &source.title, &content);

        debug!(path = %source.path.display(), title = %source.title, "embedded diagram");
        progress.diagram_rendered(&source.title, i + 1, total);
    }

    Ok(doc)
}

/// Title line, matching underline, blank line.
fn render_header() -> String {
    let underline = "-".repeat(DOCUMENT_TITLE.chars().count());
    format!("{DOCUMENT_TITLE}\n{underline}\n\n")
}

/// Append one bolded title plus its indented directive body.
fn push_entry(doc: &mut String, title: &str, content: &str) {
    doc.push_str(&format!("**{title}**\n\n"));
    doc.push_str(GRAPHVIZ_DIRECTIVE);
    doc.push_str("\n\n");
    for line in content.lines() {
        doc.push_str(CONTENT_INDENT);
        doc.push_str(line);
        doc.push('\n');
    }
    doc.push('\n');
}

/// Replace `path` with `document` in full.
///
/// The content goes to a sibling temp file first and is renamed over the
/// target, so readers never see a partial document. A symlinked `path` is
/// followed, and the existing file's permissions are kept.
#[instrument(skip_all, fields(path = %path.display(), bytes = document.len()))]
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).map_err(|e| DotdocError::io(parent, e))?;
    }

    let target = resolve_symlink(path)?;
    let file_name = target
        .file_name()
        .ok_or_else(|| DotdocError::config(format!("output path '{}' has no file name", path.display())))?;
    let temp = target.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));
    let permissions = std::fs::metadata(&target).ok().map(|m| m.permissions());

    std::fs::write(&temp, document).map_err(|e| DotdocError::io(&temp, e))?;

    let replaced = match permissions {
        Some(perms) => std::fs::set_permissions(&temp, perms)
            .map_err(|e| DotdocError::io(&temp, e)),
        None => Ok(()),
    }
    .and_then(|()| std::fs::rename(&temp, &target).map_err(|e| DotdocError::io(&target, e)));

    if replaced.is_err() {
        let _ = std::fs::remove_file(&temp);
    }
    replaced
}

/// The file a symlink points at, or `path` itself when it is not a link.
fn resolve_symlink(path: &Path) -> Result<PathBuf> {
    match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            let target = std::fs::canonicalize(path).map_err(|e| DotdocError::io(path, e))?;
            debug!(link = %path.display(), target = %target.display(), "following output symlink");
            Ok(target)
        }
        _ => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::pipeline::SilentProgress;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("dotdoc-emit-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn header_underline_matches_title() {
        let header = render_header();
        assert_eq!(
            header,
            "Generated Doxygen Diagrams\n--------------------------\n\n"
        );
    }

    #[test]
    fn empty_sources_render_notice() {
        let doc = render_document(&[], &SilentProgress).unwrap();
        assert_eq!(
            doc,
            "Generated Doxygen Diagrams\n--------------------------\n\nNo diagrams found.\n"
        );
    }

    #[test]
    fn entry_indents_every_line() {
        let mut doc = String::new();
        push_entry(&mut doc, "Foo Dependencies", "digraph G {\n\n  a -> b;\n}\n");
        assert_eq!(
            doc,
            "**Foo Dependencies**\n\n.. graphviz::\n\n   digraph G {\n   \n     a -> b;\n   }\n\n"
        );
    }

    #[test]
    fn entry_handles_crlf_and_missing_final_newline() {
        let mut doc = String::new();
        push_entry(&mut doc, "T", "digraph G {\r\n}");
        assert_eq!(doc, "**T**\n\n.. graphviz::\n\n   digraph G {\n   }\n\n");
    }

    #[test]
    fn render_reads_and_sanitizes_sources() {
        let tmp = temp_dir();
        let path = tmp.join("structFoo_dep.dot");
        std::fs::write(&path, "digraph G {\n  a [label=\"a\",URL=\"$a.html\"];\n}\n").unwrap();

        let sources = vec![DiagramSource {
            path,
            title: "Foo Dependencies".into(),
        }];
        let doc = render_document(&sources, &SilentProgress).unwrap();

        assert!(doc.ends_with(
            "**Foo Dependencies**\n\n.. graphviz::\n\n   digraph G {\n     a [label=\"a\"];\n   }\n\n"
        ));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn render_fails_on_unreadable_source() {
        let tmp = temp_dir();
        let sources = vec![DiagramSource {
            path: tmp.join("vanished.dot"),
            title: "vanished".into(),
        }];

        let err = render_document(&sources, &SilentProgress).unwrap_err();
        assert!(matches!(err, DotdocError::Io { .. }));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn write_document_truncates_previous_content() {
        let tmp = temp_dir();
        let out = tmp.join("docs/generated_diagrams.rst");

        write_document(&out, "a much longer first version\n").unwrap();
        write_document(&out, "short\n").unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "short\n");

        // No temp files should remain
        for entry in std::fs::read_dir(out.parent().unwrap()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn write_document_follows_symlinked_output() {
        let tmp = temp_dir();
        let real = tmp.join("real.rst");
        let link = tmp.join("generated_diagrams.rst");
        std::fs::write(&real, "old\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_document(&link, "new\n").unwrap();

        let meta = std::fs::symlink_metadata(&link).unwrap();
        assert!(meta.file_type().is_symlink(), "symlink was replaced");
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "new\n");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[cfg(unix)]
    #[test]
    fn write_document_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = temp_dir();
        let out = tmp.join("generated_diagrams.rst");
        std::fs::write(&out, "old\n").unwrap();
        std::fs::set_permissions(&out, std::fs::Permissions::from_mode(0o640)).unwrap();

        write_document(&out, "new\n").unwrap();

        let mode = std::fs::metadata(&out).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "new\n");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
