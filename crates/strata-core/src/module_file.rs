use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use strata_util::errors::StrataError;

/// The parsed representation of a module's `strata.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Modules whose resources this module overrides.
    #[serde(
        default,
        rename = "override",
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub overridden_modules: Vec<String>,

    /// Repository path -> filesystem path(s) relative to the module root.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceTarget>,
}

/// The filesystem side of a resource mapping: one path or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceTarget {
    Single(String),
    Multiple(Vec<String>),
}

impl ResourceTarget {
    /// All filesystem paths of this mapping.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            ResourceTarget::Single(p) => vec![p.as_str()],
            ResourceTarget::Multiple(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}

/// The root module file: a module file plus project-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootModuleFile {
    #[serde(flatten)]
    pub module: ModuleFile,

    /// Explicit precedence: each module overrides the one listed before it.
    #[serde(default, rename = "override-order", skip_serializing_if = "Vec::is_empty")]
    pub override_order: Vec<String>,

    /// Installed modules keyed by module name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modules: BTreeMap<String, InstallInfo>,
}

/// Where and how a module is installed, from `modules.<name>` in the root file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallInfo {
    #[serde(rename = "install-path")]
    pub install_path: PathBuf,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl ModuleFile {
    /// Load and parse a module file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = strata_util::fs::read_manifest(path)?;
        Ok(Self::from_str(&content).map_err(|e| StrataError::Manifest {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?)
    }

    /// Parse a module file from a JSON string.
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

impl RootModuleFile {
    /// Name used for the root module when its file declares none.
    pub const DEFAULT_NAME: &'static str = "__root__";

    /// Load and parse the root module file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = strata_util::fs::read_manifest(path)?;
        Ok(Self::from_str(&content).map_err(|e| StrataError::Manifest {
            message: format!("Failed to parse {}: {e}", path.display()),
        })?)
    }

    /// Parse a root module file from a JSON string.
    pub fn from_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// The declared root module name, or [`Self::DEFAULT_NAME`].
    pub fn name(&self) -> &str {
        self.module.name.as_deref().unwrap_or(Self::DEFAULT_NAME)
    }
}
