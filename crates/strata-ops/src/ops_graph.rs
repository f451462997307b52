//! Operation: print the override graph for Graphviz.

use std::path::Path;

use crate::ops_setup;

/// Print the override graph in DOT format.
pub fn graph(project_dir: &Path) -> miette::Result<()> {
    let project = ops_setup::load_project(project_dir)?;
    print!("{}", project.graph.to_dot());
    Ok(())
}
