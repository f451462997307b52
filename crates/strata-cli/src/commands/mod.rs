//! Command dispatch and handler modules.

mod check;
mod graph;
mod order;
mod why;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check { path } => check::exec(path),
        Command::Order => order::exec(),
        Command::Why { from, to } => why::exec(&from, &to),
        Command::Graph => graph::exec(),
    }
}
