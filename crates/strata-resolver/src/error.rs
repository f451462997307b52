use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while building or querying an [`OverrideGraph`](crate::graph::OverrideGraph).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GraphError {
    /// A module name was registered twice.
    #[error("The module \"{name}\" was already added to the override graph")]
    DuplicateNode { name: String },

    /// An edge or sort referenced a module that was never registered.
    #[error("The module \"{name}\" is not part of the override graph")]
    UnknownNode { name: String },

    /// Adding the edge would have closed a cycle. `path` lists the cycle,
    /// starting and ending with the same module.
    #[error("A cyclic override was discovered between the modules {}", quoted(.path))]
    #[diagnostic(help(
        "Check the \"override\" keys defined in these modules and remove one of them"
    ))]
    CyclicDependency { path: Vec<String> },
}

fn quoted(path: &[String]) -> String {
    path.iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_path() {
        let err = GraphError::CyclicDependency {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(
            err.to_string(),
            "A cyclic override was discovered between the modules \"a\" -> \"b\" -> \"a\""
        );
    }

    #[test]
    fn unknown_node_message() {
        let err = GraphError::UnknownNode {
            name: "acme/gone".into(),
        };
        assert!(err.to_string().contains("acme/gone"));
    }
}
