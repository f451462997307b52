//! Core data types for the Strata module manager.
//!
//! This crate defines the metadata that describes a Strata project: the root
//! module file, the module files of installed modules, the loaded module list,
//! repository path handling and the global configuration.
//!
//! Override resolution lives in `strata-resolver`.

/// Name of the module file looked up in the project root and in every
/// installed module.
pub const DEFAULT_MODULE_FILE: &str = "strata.json";

pub mod config;
pub mod module;
pub mod module_file;
pub mod module_list;
pub mod repository_path;
