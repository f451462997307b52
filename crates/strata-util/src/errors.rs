use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Strata operations.
#[derive(Debug, Error, Diagnostic)]
pub enum StrataError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or malformed module file (e.g. strata.json).
    #[error("Module file error: {message}")]
    #[diagnostic(help("Check the module file for JSON syntax errors"))]
    Manifest { message: String },

    /// A module referenced by name is not part of the project.
    #[error("Module error: {message}")]
    Module { message: String },

    /// Two or more modules claim the same resource without an override order.
    #[error("Resource conflicts detected: {message}")]
    #[diagnostic(help(
        "Add an \"override\" key to one of the modules or an \"override-order\" list to the root module file"
    ))]
    Conflict { message: String },

    /// Global configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type StrataResult<T> = miette::Result<T>;
