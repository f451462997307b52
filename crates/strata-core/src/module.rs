use std::fmt;
use std::path::PathBuf;

use crate::module_file::ModuleFile;

/// Load state of an installed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Loaded and contributing resources.
    Enabled,
    /// Loaded, but switched off in the root module file.
    Disabled,
    /// The install path does not exist.
    NotFound,
    /// The module file exists but could not be read or parsed.
    NotLoadable,
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModuleState::Enabled => "enabled",
            ModuleState::Disabled => "disabled",
            ModuleState::NotFound => "not-found",
            ModuleState::NotLoadable => "not-loadable",
        };
        f.write_str(s)
    }
}

/// An installed module together with its (possibly missing) metadata.
#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub install_path: PathBuf,
    /// `None` when the module could not be loaded.
    pub file: Option<ModuleFile>,
    pub state: ModuleState,
    /// Why loading failed, for `NotFound` and `NotLoadable` modules.
    pub load_error: Option<String>,
}

impl Module {
    pub fn is_enabled(&self) -> bool {
        self.state == ModuleState::Enabled
    }
}
