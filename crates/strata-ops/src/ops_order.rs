//! Operation: print the modules in override order.

use std::path::Path;

use crate::ops_setup;

/// Print every module name, overridden modules before the modules that
/// override them.
pub fn order(project_dir: &Path) -> miette::Result<()> {
    let project = ops_setup::load_project(project_dir)?;
    for name in project.graph.sorted_node_names() {
        println!("{name}");
    }
    Ok(())
}
