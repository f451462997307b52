//! Handler for `strata check`.

use miette::Result;

use strata_ops::ops_check::{self, CheckOptions};
use strata_util::errors::StrataError;

pub fn exec(path: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StrataError::Io)?;
    ops_check::check(&cwd, &CheckOptions { path })
}
