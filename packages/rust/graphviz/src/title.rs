//! Display titles derived from Doxygen graph file names.

use std::path::Path;

use crate::DOT_EXTENSION;

/// Literal replacements applied to a file stem, strictly in this order.
///
/// `struct` must go before the `__` collapse, and `_coll__graph` must match
/// before `__` is collapsed, so reordering changes the output.
pub const TITLE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("_coll__graph", " Collaboration Graph"),
    ("_dep", " Dependencies"),
    ("struct", ""),
    ("__", "_"),
    ("_", " "),
];

/// Turn a file stem (extension already stripped) into a heading.
pub fn derive_title(stem: &str) -> String {
    TITLE_SUBSTITUTIONS
        .iter()
        .fold(stem.to_string(), |name, (from, to)| name.replace(from, to))
        .trim()
        .to_string()
}

/// Title for a graph file path: base name, minus a trailing `.dot`.
pub fn title_for_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = format!(".{DOT_EXTENSION}");
    let stem = file_name.strip_suffix(suffix.as_str()).unwrap_or(&file_name);

    derive_title(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaboration_graph() {
        assert_eq!(derive_title("Foo_coll__graph"), "Foo Collaboration Graph");
    }

    #[test]
    fn struct_dependency_graph() {
        assert_eq!(derive_title("structFoo_dep"), "Foo Dependencies");
    }

    #[test]
    fn doubled_separator() {
        assert_eq!(derive_title("a__b"), "a b");
    }

    #[test]
    fn collapse_is_non_overlapping() {
        // "___" -> "__" in a single left-to-right sweep, then two spaces.
        assert_eq!(derive_title("a___b"), "a  b");
    }

    #[test]
    fn struct_removal_before_collapse() {
        assert_eq!(derive_title("struct_foo__bar"), "foo bar");
        assert_eq!(derive_title("my_struct_t"), "my t");
    }

    #[test]
    fn doxygen_include_graph_names() {
        assert_eq!(
            derive_title("classns_1_1_widget__inherit__graph"),
            "classns 1 1 widget inherit graph"
        );
        assert_eq!(derive_title("foo_8h__dep__incl"), "foo 8h  Dependencies incl");
    }

    #[test]
    fn order_matters() {
        let reversed = TITLE_SUBSTITUTIONS
            .iter()
            .rev()
            .fold("Foo_coll__graph".to_string(), |name, (from, to)| name.replace(from, to));
        assert_ne!(reversed.trim(), derive_title("Foo_coll__graph"));
    }

    #[test]
    fn title_for_path_strips_directory_and_extension() {
        let path = Path::new("_build/doxygen-html/html/structFoo_dep.dot");
        assert_eq!(title_for_path(path), "Foo Dependencies");

        let path = Path::new("nested/Foo_coll__graph.dot");
        assert_eq!(title_for_path(path), "Foo Collaboration Graph");
    }

    #[test]
    fn title_for_path_only_strips_trailing_extension() {
        assert_eq!(title_for_path(Path::new("a.dotted.dot")), "a.dotted");
    }
}
