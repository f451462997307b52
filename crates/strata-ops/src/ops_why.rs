//! Operation: explain how one module comes to override another.

use std::path::Path;

use crate::ops_setup;

/// Print the chain of overrides leading from `from` to `to`.
pub fn why(project_dir: &Path, from: &str, to: &str) -> miette::Result<()> {
    let project = ops_setup::load_project(project_dir)?;
    ops_setup::require_module(&project, from)?;
    ops_setup::require_module(&project, to)?;

    match project.graph.get_path(from, to) {
        Some(path) => {
            println!("\"{to}\" overrides \"{from}\":");
            for (i, name) in path.iter().enumerate() {
                let indent = "  ".repeat(i);
                println!("{indent}{name}");
            }
        }
        None => println!("\"{to}\" does not override \"{from}\"."),
    }
    Ok(())
}
