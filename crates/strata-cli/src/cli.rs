//! CLI argument definitions for Strata.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "A module manager for composite resource repositories",
    long_about = "Strata loads the modules of a project, orders them by their override \
                  declarations and checks that every resource path has a single winner."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check resource mappings for conflicts between modules
    Check {
        /// Only check repository paths at or below this path
        #[arg(long)]
        path: Option<String>,
    },

    /// Print modules in override order
    Order,

    /// Explain why one module overrides another
    Why {
        /// The overridden module
        from: String,
        /// The overriding module
        to: String,
    },

    /// Print the override graph in Graphviz DOT format
    Graph,
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
