//! Resource mapping conflicts: repository paths mapped by several modules.

use strata_core::module_list::ModuleList;
use strata_core::repository_path;

use crate::conflict::{ConflictDetector, ConflictReport};
use crate::error::GraphError;
use crate::graph::OverrideGraph;

/// Claim every repository path mapped by the root module and the enabled
/// modules, then report the paths whose modules have no override order.
///
/// With `base_path`, only paths at or below it are checked.
pub fn check_resource_conflicts(
    modules: &ModuleList,
    graph: &OverrideGraph,
    base_path: Option<&str>,
) -> Result<ConflictReport, GraphError> {
    let mut detector = ConflictDetector::new(graph);
    for (name, file) in modules.enabled_module_files() {
        for repository_path in file.resources.keys() {
            detector.claim(repository_path::normalize(repository_path), name);
        }
    }

    let conflicts = match base_path.map(repository_path::normalize) {
        Some(base) => {
            let tokens: Vec<&str> = detector
                .tokens()
                .into_iter()
                .filter(|token| repository_path::is_base_path(&base, token))
                .collect();
            detector.detect_conflicts_for(&tokens)?
        }
        None => detector.detect_conflicts()?,
    };

    let mut report = ConflictReport::new();
    for conflict in conflicts {
        report.add(conflict);
    }
    tracing::info!(
        "checked {} resource path(s), {} conflict(s)",
        detector.tokens().len(),
        report.len()
    );
    Ok(report)
}
