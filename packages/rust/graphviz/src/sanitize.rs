//! Attribute stripping for Doxygen-generated DOT sources.
//!
//! Doxygen decorates nodes and edges with `URL` and `tooltip` attributes that
//! point into its own HTML tree. Once the graph is inlined into a Sphinx page
//! those links resolve against the wrong directory, so they are cut out and
//! the separators they leave behind are repaired.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Attributes removed from every graph, in removal order.
pub const STRIPPED_ATTRIBUTES: &[&str] = &["URL", "tooltip"];

/// Separator repairs applied after attribute removal, in order.
pub const SEPARATOR_REPAIRS: &[(&str, &str)] = &[
    (r",\s*,", ","),
    (r",\s*];", "];"),
    (r",\s*]", "]"),
    (r",\s*;", ";"),
];

/// Strip link attributes and repair the attribute lists they were part of.
///
/// Content that does not match any pattern passes through untouched; this
/// never fails.
pub fn sanitize(content: &str) -> String {
    let stripped = strip_attributes(content);
    let repaired = repair_separators(&stripped);

    trace!(
        input_len = content.len(),
        output_len = repaired.len(),
        "sanitized graph"
    );

    repaired
}

// ---------------------------------------------------------------------------
// Pass 1: Remove attributes
// ---------------------------------------------------------------------------

/// Remove every `name="..."` span for each name in [`STRIPPED_ATTRIBUTES`].
fn strip_attributes(content: &str) -> String {
    static ATTRIBUTE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
        STRIPPED_ATTRIBUTES
            .iter()
            .map(|name| {
                Regex::new(&format!(r#"{}="[^"]*""#, regex::escape(name))).expect("valid regex")
            })
            .collect()
    });

    let mut result = content.to_string();
    for re in ATTRIBUTE_RES.iter() {
        result = re.replace_all(&result, "").into_owned();
    }
    result
}

// ---------------------------------------------------------------------------
// Pass 2: Repair separators
// ---------------------------------------------------------------------------

static REPAIR_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    SEPARATOR_REPAIRS
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), *replacement))
        .collect()
});

/// Apply every repair exactly once, in table order.
///
/// A single sweep per rule; commas inside quoted values are not protected, so
/// a second sweep would rewrite valid labels like `"a,,,b"` further.
fn repair_separators(content: &str) -> String {
    let mut result = content.to_string();
    for (re, replacement) in REPAIR_RES.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
