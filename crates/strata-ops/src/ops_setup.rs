//! Operation: locate the project and load everything the other operations need.

use std::path::{Path, PathBuf};

use strata_core::config::GlobalConfig;
use strata_core::module::ModuleState;
use strata_core::module_list::ModuleList;
use strata_resolver::graph::OverrideGraph;
use strata_util::errors::StrataError;
use strata_util::fs::find_ancestor_with;

/// A loaded project: its modules and their override graph.
pub struct Project {
    pub root_dir: PathBuf,
    pub config: GlobalConfig,
    pub modules: ModuleList,
    pub graph: OverrideGraph,
}

/// Find the root module file at or above `start_dir`, load all modules and
/// build the override graph.
pub fn load_project(start_dir: &Path) -> miette::Result<Project> {
    let config = GlobalConfig::load()?;
    load_project_with(start_dir, config)
}

/// Like [`load_project`], with an explicit configuration.
pub fn load_project_with(start_dir: &Path, config: GlobalConfig) -> miette::Result<Project> {
    let file_name = &config.modules.file_name;
    let root_dir = find_ancestor_with(start_dir, file_name).ok_or_else(|| StrataError::Manifest {
        message: format!("Could not find {file_name} in current or parent directories"),
    })?;
    tracing::debug!("project root: {}", root_dir.display());

    let modules = ModuleList::load(&root_dir, &config)?;
    strata_util::progress::status("Loading", &format!("{} modules", modules.len()));
    warn_unloadable(&modules);

    let graph = OverrideGraph::for_modules(&modules)?;

    Ok(Project {
        root_dir,
        config,
        modules,
        graph,
    })
}

fn warn_unloadable(modules: &ModuleList) {
    for module in modules.modules() {
        if matches!(module.state, ModuleState::NotFound | ModuleState::NotLoadable) {
            let reason = module.load_error.as_deref().unwrap_or("unknown error");
            strata_util::progress::status_warn(
                "Skipping",
                &format!("{} ({}): {reason}", module.name, module.state),
            );
        }
    }
}

/// Fail with a [`StrataError::Module`] unless `name` is a module of the project.
pub fn require_module(project: &Project, name: &str) -> miette::Result<()> {
    if project.modules.contains(name) {
        Ok(())
    } else {
        Err(StrataError::Module {
            message: format!("The module \"{name}\" is not installed"),
        }
        .into())
    }
}
