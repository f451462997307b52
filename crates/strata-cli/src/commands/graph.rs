use miette::Result;

use strata_util::errors::StrataError;

pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(StrataError::Io)?;
    strata_ops::ops_graph::graph(&cwd)
}
