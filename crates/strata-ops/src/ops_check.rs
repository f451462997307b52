//! Operation: check that no two modules map the same resource path without
//! an override order.

use std::path::Path;

use strata_resolver::mapping::check_resource_conflicts;
use strata_util::errors::StrataError;

use crate::ops_setup;

/// Options for `strata check`.
#[derive(Default)]
pub struct CheckOptions {
    /// Only check repository paths at or below this path.
    pub path: Option<String>,
}

/// Check the project's resource mappings for conflicts.
///
/// Conflicts fail the check unless `fail-on-conflict` is switched off in the
/// global configuration, in which case they are printed as warnings.
pub fn check(project_dir: &Path, opts: &CheckOptions) -> miette::Result<()> {
    let project = ops_setup::load_project(project_dir)?;
    let root_name = project
        .modules
        .root()
        .map(|r| r.name().to_string())
        .unwrap_or_default();
    strata_util::progress::status(
        "Checking",
        &format!("{root_name} ({})", project.root_dir.display()),
    );

    let report = check_resource_conflicts(&project.modules, &project.graph, opts.path.as_deref())?;
    if report.is_empty() {
        println!("{report}");
        return Ok(());
    }

    if !project.config.check.fail_on_conflict {
        for conflict in &report.conflicts {
            strata_util::progress::status_warn("Conflict", &conflict.to_string());
        }
        return Ok(());
    }

    for conflict in &report.conflicts {
        strata_util::progress::status_error("Conflict", &conflict.to_string());
    }
    Err(StrataError::Conflict {
        message: format!("{} conflicting resource path(s)", report.len()),
    }
    .into())
}
