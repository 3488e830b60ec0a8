//! Text transforms for Doxygen-generated Graphviz sources.
//!
//! Both transforms are pure string functions: [`sanitize`] prepares DOT text
//! for inlining into a `.. graphviz::` directive, and [`derive_title`] turns a
//! Doxygen file name into a readable heading.

mod sanitize;
mod title;

pub use sanitize::{SEPARATOR_REPAIRS, STRIPPED_ATTRIBUTES, sanitize};
pub use title::{TITLE_SUBSTITUTIONS, derive_title, title_for_path};

/// File extension of Graphviz sources, without the dot.
pub const DOT_EXTENSION: &str = "dot";
