//! dotdoc CLI: collect Doxygen-generated Graphviz diagrams into a single
//! reStructuredText page for a Sphinx build.
//!
//! Running `dotdoc` with no arguments imports from `_build/doxygen-html`
//! into `generated_diagrams.rst`, or wherever `dotdoc.toml` points.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
