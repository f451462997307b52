//! Loading the root module and every installed module of a project.

use std::path::{Path, PathBuf};

use strata_util::errors::StrataError;

use crate::config::GlobalConfig;
use crate::module::{Module, ModuleState};
use crate::module_file::{InstallInfo, ModuleFile, RootModuleFile};

/// The project's own module, defined by the root module file.
#[derive(Debug, Clone)]
pub struct RootModule {
    pub root_dir: PathBuf,
    pub file: RootModuleFile,
}

impl RootModule {
    pub fn name(&self) -> &str {
        self.file.name()
    }
}

/// All modules of a project: the root module plus the installed modules, in
/// load order.
#[derive(Debug, Clone, Default)]
pub struct ModuleList {
    root: Option<RootModule>,
    modules: Vec<Module>,
}

impl ModuleList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the root module file from `project_dir` and every module it installs.
    ///
    /// Installed modules that cannot be loaded are kept in the list with a
    /// `NotFound` or `NotLoadable` state instead of failing the whole load.
    pub fn load(project_dir: &Path, config: &GlobalConfig) -> miette::Result<Self> {
        let file_name = &config.modules.file_name;
        let root_file = RootModuleFile::from_path(&project_dir.join(file_name))?;

        let mut list = Self::new();
        for (name, info) in &root_file.modules {
            list.push(load_installed(project_dir, file_name, name, info))?;
        }
        list.set_root(RootModule {
            root_dir: project_dir.to_path_buf(),
            file: root_file,
        })?;

        tracing::info!(
            "loaded {} installed module(s) from {}",
            list.modules.len(),
            project_dir.display()
        );
        Ok(list)
    }

    /// Set the root module. Fails if an installed module has the same name.
    pub fn set_root(&mut self, root: RootModule) -> Result<(), StrataError> {
        if self.get(root.name()).is_some() {
            return Err(StrataError::Module {
                message: format!(
                    "The root module \"{}\" is also installed as a module",
                    root.name()
                ),
            });
        }
        self.root = Some(root);
        Ok(())
    }

    /// Append an installed module. Fails if the name is already taken.
    pub fn push(&mut self, module: Module) -> Result<(), StrataError> {
        let taken = self.get(&module.name).is_some()
            || self.root.as_ref().is_some_and(|r| r.name() == module.name);
        if taken {
            return Err(StrataError::Module {
                message: format!("The module \"{}\" is loaded twice", module.name),
            });
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn root(&self) -> Option<&RootModule> {
        self.root.as_ref()
    }

    /// Installed modules, excluding the root module.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Returns `true` if `name` is the root module or an installed module.
    pub fn contains(&self, name: &str) -> bool {
        self.root.as_ref().is_some_and(|r| r.name() == name) || self.get(name).is_some()
    }

    /// All module names, root module first.
    pub fn names(&self) -> Vec<&str> {
        self.root
            .iter()
            .map(|r| r.name())
            .chain(self.modules.iter().map(|m| m.name.as_str()))
            .collect()
    }

    /// Every module with its metadata (if loadable), root module first.
    pub fn module_files(&self) -> Vec<(&str, Option<&ModuleFile>)> {
        self.root
            .iter()
            .map(|r| (r.name(), Some(&r.file.module)))
            .chain(self.modules.iter().map(|m| (m.name.as_str(), m.file.as_ref())))
            .collect()
    }

    /// Metadata of the modules that contribute resources: the root module
    /// and every enabled installed module.
    pub fn enabled_module_files(&self) -> Vec<(&str, &ModuleFile)> {
        self.root
            .iter()
            .map(|r| (r.name(), &r.file.module))
            .chain(
                self.modules
                    .iter()
                    .filter(|m| m.is_enabled())
                    .filter_map(|m| m.file.as_ref().map(|f| (m.name.as_str(), f))),
            )
            .collect()
    }

    /// Number of modules, root module included.
    pub fn len(&self) -> usize {
        self.modules.len() + usize::from(self.root.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn load_installed(project_dir: &Path, file_name: &str, name: &str, info: &InstallInfo) -> Module {
    let install_path = project_dir.join(&info.install_path);
    let mut module = Module {
        name: name.to_string(),
        install_path: install_path.clone(),
        file: None,
        state: ModuleState::NotFound,
        load_error: None,
    };

    if !install_path.is_dir() {
        tracing::warn!(
            "module {name}: install path {} does not exist",
            install_path.display()
        );
        module.load_error = Some(format!(
            "The install path {} does not exist",
            install_path.display()
        ));
        return module;
    }

    let file_path = install_path.join(file_name);
    let file = if file_path.is_file() {
        match ModuleFile::from_path(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("module {name}: {e}");
                module.state = ModuleState::NotLoadable;
                module.load_error = Some(e.to_string());
                return module;
            }
        }
    } else {
        // A module without a module file is valid; it just declares nothing.
        ModuleFile::default()
    };

    if let Some(declared) = file.name.as_deref().filter(|n| *n != name) {
        tracing::warn!("module {name}: module file declares name {declared}, keeping {name}");
    }

    module.file = Some(file);
    module.state = if info.enabled {
        ModuleState::Enabled
    } else {
        ModuleState::Disabled
    };
    module
}
