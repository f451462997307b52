//! Detection of tokens claimed by modules without a defined override order.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::GraphError;
use crate::graph::OverrideGraph;

/// A token claimed by two or more modules that have no override order
/// between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    token: String,
    /// Sorted and deduplicated.
    module_names: Vec<String>,
}

impl Conflict {
    pub fn new<I, S>(token: impl Into<String>, module_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut module_names: Vec<String> = module_names.into_iter().map(Into::into).collect();
        module_names.sort();
        module_names.dedup();
        Self {
            token: token.into(),
            module_names,
        }
    }

    /// The contested token, usually a repository path.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The modules involved, in sorted order.
    pub fn module_names(&self) -> &[String] {
        &self.module_names
    }

    pub fn involves(&self, module_name: &str) -> bool {
        self.module_names
            .binary_search_by(|n| n.as_str().cmp(module_name))
            .is_ok()
    }

    /// The other modules of the conflict, or nothing if `module_name` is not
    /// involved.
    pub fn opponents_of(&self, module_name: &str) -> Vec<&str> {
        if !self.involves(module_name) {
            return Vec::new();
        }
        self.module_names
            .iter()
            .map(String::as_str)
            .filter(|n| *n != module_name)
            .collect()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self
            .module_names
            .iter()
            .map(|n| format!("\"{n}\""))
            .collect();
        let names = match quoted.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} and {last}", rest.join(", ")),
            _ => quoted.join(""),
        };
        write!(
            f,
            "The modules {names} map resources to the same path \"{}\"",
            self.token
        )
    }
}

/// Collects claims of tokens by modules and reports the tokens whose
/// claimants are not ordered by the override graph.
///
/// The detector borrows the graph; claims are independent of it, so the
/// graph can be swapped with [`ConflictDetector::set_graph`].
#[derive(Debug, Clone)]
pub struct ConflictDetector<'g> {
    graph: &'g OverrideGraph,
    /// Token -> claiming modules, in claim order.
    claims: BTreeMap<String, Vec<String>>,
}

impl<'g> ConflictDetector<'g> {
    pub fn new(graph: &'g OverrideGraph) -> Self {
        Self {
            graph,
            claims: BTreeMap::new(),
        }
    }

    pub fn set_graph(&mut self, graph: &'g OverrideGraph) {
        self.graph = graph;
    }

    /// Record that `module_name` claims `token`. Claiming twice is a no-op.
    pub fn claim(&mut self, token: impl Into<String>, module_name: impl Into<String>) {
        let token = token.into();
        let module_name = module_name.into();
        tracing::trace!("{module_name} claims {token}");
        let claimants = self.claims.entry(token).or_default();
        if !claimants.contains(&module_name) {
            claimants.push(module_name);
        }
    }

    /// Drop the claim of `module_name` on `token`, if any.
    pub fn release(&mut self, token: &str, module_name: &str) {
        if let Some(claimants) = self.claims.get_mut(token) {
            claimants.retain(|n| n != module_name);
            if claimants.is_empty() {
                self.claims.remove(token);
            }
        }
    }

    /// Modules currently claiming `token`, in claim order.
    pub fn claimants(&self, token: &str) -> &[String] {
        self.claims.get(token).map(Vec::as_slice).unwrap_or_default()
    }

    /// All claimed tokens, sorted.
    pub fn tokens(&self) -> Vec<&str> {
        self.claims.keys().map(String::as_str).collect()
    }

    /// Check every claimed token.
    pub fn detect_conflicts(&self) -> Result<Vec<Conflict>, GraphError> {
        let tokens: Vec<&str> = self.tokens();
        self.detect_conflicts_for(&tokens)
    }

    /// Check the given tokens. Tokens nobody claims are skipped.
    ///
    /// The claimants of a token are sorted topologically, and every pair of
    /// neighbours in that order must be joined by a direct override edge.
    /// A transitive override does not settle a conflict. One [`Conflict`] is
    /// reported per token, naming every module of every failing pair.
    ///
    /// Fails only if a claimant is not a node of the override graph.
    pub fn detect_conflicts_for<S: AsRef<str>>(
        &self,
        tokens: &[S],
    ) -> Result<Vec<Conflict>, GraphError> {
        let mut conflicts = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            let Some(claimants) = self.claims.get(token) else {
                continue;
            };
            if claimants.len() < 2 {
                continue;
            }

            let sorted = self.graph.sort_subset(claimants.as_slice())?;
            let mut conflicting: Vec<&str> = Vec::new();
            for pair in sorted.windows(2) {
                if !self.graph.has_edge(pair[0], pair[1]) {
                    conflicting.extend([pair[0], pair[1]]);
                }
            }

            if !conflicting.is_empty() {
                let conflict = Conflict::new(token, conflicting);
                tracing::debug!("{conflict}");
                conflicts.push(conflict);
            }
        }
        Ok(conflicts)
    }
}

/// A report of all conflicts found in one check, rendered for the user.
#[derive(Debug, Default)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, conflict: Conflict) {
        self.conflicts.push(conflict);
    }

    /// Conflicts a module takes part in.
    pub fn involving(&self, module_name: &str) -> Vec<&Conflict> {
        self.conflicts
            .iter()
            .filter(|c| c.involves(module_name))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }
}

impl From<Vec<Conflict>> for ConflictReport {
    fn from(conflicts: Vec<Conflict>) -> Self {
        Self { conflicts }
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return write!(f, "No resource conflicts.");
        }
        writeln!(f, "Resource conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            writeln!(f, "  {c}")?;
        }
        write!(
            f,
            "Add an \"override\" key to one of the modules or an \"override-order\" list to the root module file."
        )
    }
}
