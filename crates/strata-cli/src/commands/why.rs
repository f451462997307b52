//! Handler for `strata why`.

use miette::Result;

use strata_util::errors::StrataError;

pub fn exec(from: &str, to: &str) -> Result<()> {
    let cwd = std::env::current_dir().map_err(StrataError::Io)?;
    strata_ops::ops_why::why(&cwd, from, to)
}
