//! Override graph construction and traversal.
//!
//! Nodes are module names. An edge `from -> to` means "`from` is overridden
//! by `to`": wherever both modules provide the same resource, the resource of
//! `to` wins. The graph is acyclic after every successful mutation.

use std::collections::{HashMap, HashSet};

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use strata_core::module_list::ModuleList;

use crate::error::GraphError;

/// A directed acyclic graph of override relations between modules, backed
/// by petgraph.
///
/// Edge weights are insertion sequence numbers. Traversals visit the direct
/// predecessors of a node in the order their edges were added, which makes
/// path finding and topological sorting deterministic.
#[derive(Debug, Clone, Default)]
pub struct OverrideGraph {
    graph: DiGraph<String, u64>,
    /// Lookup from module name to node index.
    index: HashMap<String, NodeIndex>,
    next_edge: u64,
}

impl OverrideGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph pre-seeded with the given module names.
    pub fn with_nodes<I, S>(names: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        graph.add_nodes(names)?;
        Ok(graph)
    }

    /// Build the override graph of a module list.
    ///
    /// Every module becomes a node. Each module with loadable metadata adds
    /// an edge from every module it overrides to itself, and the root
    /// module's `override-order` chains each listed module to its
    /// predecessor in the list. References to modules that are not part of
    /// the list are skipped.
    pub fn for_modules(modules: &ModuleList) -> Result<Self, GraphError> {
        let mut graph = Self::with_nodes(modules.names())?;

        for (name, file) in modules.module_files() {
            let Some(file) = file else {
                continue;
            };
            for overridden in &file.overridden_modules {
                if graph.has_node(overridden) {
                    graph.add_edge(overridden, name)?;
                } else {
                    tracing::warn!("module {name} overrides unknown module {overridden}, skipping");
                }
            }
        }

        if let Some(root) = modules.root() {
            for pair in root.file.override_order.windows(2) {
                let (overridden, overriding) = (&pair[0], &pair[1]);
                if graph.has_node(overridden) && graph.has_node(overriding) {
                    graph.add_edge(overridden, overriding)?;
                } else {
                    tracing::warn!(
                        "override-order entry {overridden} -> {overriding} names an unknown module, skipping"
                    );
                }
            }
        }

        tracing::debug!(
            "built override graph with {} modules and {} overrides",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Register a module name.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<(), GraphError> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateNode { name });
        }
        let idx = self.graph.add_node(name.clone());
        self.index.insert(name, idx);
        Ok(())
    }

    /// Register several module names. Names added before a failure stay in
    /// the graph.
    pub fn add_nodes<I, S>(&mut self, names: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_node(name)?;
        }
        Ok(())
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Record that `from` is overridden by `to`.
    ///
    /// Both modules must be registered. Fails without touching the graph if
    /// `to` already overrides `from`, directly or transitively, since the new
    /// edge would close a cycle. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let from_idx = self.require(from)?;
        let to_idx = self.require(to)?;

        if from_idx == to_idx {
            return Err(GraphError::CyclicDependency {
                path: vec![from.to_string(), to.to_string()],
            });
        }
        if let Some(mut path) = self.path_indices(to_idx, from_idx) {
            path.push(to_idx);
            let path: Vec<String> = path.into_iter().map(|i| self.graph[i].clone()).collect();
            tracing::debug!("rejected override {from} -> {to}: cycle {}", path.join(" -> "));
            return Err(GraphError::CyclicDependency { path });
        }
        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return Ok(());
        }

        self.graph.add_edge(from_idx, to_idx, self.next_edge);
        self.next_edge += 1;
        tracing::debug!("added override {from} -> {to}");
        Ok(())
    }

    /// Remove the edge `from -> to` if present.
    pub fn remove_edge(&mut self, from: &str, to: &str) {
        let (Some(from_idx), Some(to_idx)) = (self.find(from), self.find(to)) else {
            return;
        };
        if let Some(edge) = self.graph.find_edge(from_idx, to_idx) {
            self.graph.remove_edge(edge);
            tracing::debug!("removed override {from} -> {to}");
        }
    }

    /// Returns `true` only for a direct edge `from -> to`.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.find(from), self.find(to)) {
            (Some(f), Some(t)) => self.graph.find_edge(f, t).is_some(),
            _ => false,
        }
    }

    /// Returns `true` if `to` overrides `from`, directly or transitively.
    ///
    /// Unknown module names yield `false`.
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        match (self.find(from), self.find(to)) {
            (Some(f), Some(t)) => self.path_indices(f, t).is_some(),
            _ => false,
        }
    }

    /// One path of overrides leading from `from` to `to`, both included.
    pub fn get_path(&self, from: &str, to: &str) -> Option<Vec<&str>> {
        let path = self.path_indices(self.find(from)?, self.find(to)?)?;
        Some(path.into_iter().map(|i| self.graph[i].as_str()).collect())
    }

    /// All module names in topological order: every module comes after the
    /// modules it overrides.
    ///
    /// Modules are visited in registration order, and each module is
    /// preceded by all of its not yet emitted predecessors.
    pub fn sorted_node_names(&self) -> Vec<&str> {
        let all: Vec<NodeIndex> = self.graph.node_indices().collect();
        self.sort_indices(&all)
    }

    /// The given module names in topological order.
    ///
    /// Only the given names are returned, but overrides through modules
    /// outside the subset still order them. Fails if a name is unknown.
    pub fn sort_subset<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&str>, GraphError> {
        let members = names
            .iter()
            .map(|name| self.require(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.sort_indices(&members))
    }

    /// Module names in registration order.
    pub fn node_names(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Render the graph in Graphviz DOT format.
    pub fn to_dot(&self) -> String {
        format!(
            "{}",
            Dot::with_config(&self.graph, &[Config::EdgeNoLabel])
        )
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of override edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    fn require(&self, name: &str) -> Result<NodeIndex, GraphError> {
        self.find(name).ok_or_else(|| GraphError::UnknownNode {
            name: name.to_string(),
        })
    }

    /// Direct predecessors of `idx` in edge insertion order.
    fn predecessors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut incoming: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| (*e.weight(), e.source()))
            .collect();
        incoming.sort_unstable_by_key(|&(seq, _)| seq);
        incoming.into_iter().map(|(_, source)| source).collect()
    }

    fn path_indices(&self, from: NodeIndex, to: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut reverse_path = Vec::new();
        let mut dead_ends = HashSet::new();
        if self.dfs_reverse_path(from, to, &mut reverse_path, &mut dead_ends) {
            reverse_path.reverse();
            Some(reverse_path)
        } else {
            None
        }
    }

    /// Search backwards from `current` towards `from`, checking the direct
    /// predecessors before recursing into them.
    fn dfs_reverse_path(
        &self,
        from: NodeIndex,
        current: NodeIndex,
        reverse_path: &mut Vec<NodeIndex>,
        dead_ends: &mut HashSet<NodeIndex>,
    ) -> bool {
        if dead_ends.contains(&current) {
            return false;
        }
        let predecessors = self.predecessors(current);
        if predecessors.is_empty() {
            return false;
        }

        reverse_path.push(current);
        if predecessors.contains(&from) {
            reverse_path.push(from);
            return true;
        }
        for predecessor in predecessors {
            if self.dfs_reverse_path(from, predecessor, reverse_path, dead_ends) {
                return true;
            }
        }
        reverse_path.pop();
        // Acyclic, so a node that cannot reach `from` never will.
        dead_ends.insert(current);
        false
    }

    fn sort_indices(&self, members: &[NodeIndex]) -> Vec<&str> {
        let wanted: HashSet<NodeIndex> = members.iter().copied().collect();
        let mut visited = HashSet::new();
        let mut sorted = Vec::with_capacity(wanted.len());
        for &idx in members {
            self.dfs_sort(idx, &wanted, &mut visited, &mut sorted);
        }
        sorted.into_iter().map(|i| self.graph[i].as_str()).collect()
    }

    fn dfs_sort(
        &self,
        current: NodeIndex,
        wanted: &HashSet<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
        output: &mut Vec<NodeIndex>,
    ) {
        if !visited.insert(current) {
            return;
        }
        for predecessor in self.predecessors(current) {
            self.dfs_sort(predecessor, wanted, visited, output);
        }
        if wanted.contains(&current) {
            output.push(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(names: &[&str]) -> OverrideGraph {
        OverrideGraph::with_nodes(names.iter().copied()).unwrap()
    }

    #[test]
    fn add_and_query_nodes() {
        let mut g = OverrideGraph::new();
        assert!(g.is_empty());
        g.add_node("acme/blog").unwrap();
        assert!(g.has_node("acme/blog"));
        assert!(!g.has_node("acme/forum"));
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let mut g = graph(&["acme/blog"]);
        assert_eq!(
            g.add_node("acme/blog"),
            Err(GraphError::DuplicateNode {
                name: "acme/blog".into()
            })
        );
    }

    #[test]
    fn add_nodes_keeps_earlier_names_on_failure() {
        let mut g = graph(&["b"]);
        assert!(g.add_nodes(["a", "b", "c"]).is_err());
        assert!(g.has_node("a"));
        assert!(!g.has_node("c"));
    }

    #[test]
    fn edge_requires_known_nodes() {
        let mut g = graph(&["a"]);
        assert_eq!(
            g.add_edge("a", "b"),
            Err(GraphError::UnknownNode { name: "b".into() })
        );
        assert_eq!(
            g.add_edge("c", "a"),
            Err(GraphError::UnknownNode { name: "c".into() })
        );
    }

    #[test]
    fn has_edge_is_direct_only() {
        let mut g = graph(&["a", "b", "c"]);
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();
        assert!(g.has_edge("a", "b"));
        assert!(!g.has_edge("b", "a"));
        assert!(!g.has_edge("a", "c"));
        assert!(g.has_path("a", "c"));
    }

    #[test]
    fn reverse_edge_is_rejected_without_mutation() {
        let mut g = graph(&["a", "b"]);
        g.add_edge("a", "b").unwrap();
        let err = g.add_edge("b", "a").unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicDependency {
                path: vec!["a".into(), "b".into(), "a".into()]
            }
        );
        assert!(!g.has_edge("b", "a"));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn transitive_cycle_carries_full_path() {
        let mut g = graph(&["a", "b", "c"]);
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();
        let err = g.add_edge("c", "a").unwrap_err();
        assert_eq!(
            err,
            GraphError::CyclicDependency {
                path: vec!["a".into(), "b".into(), "c".into(), "a".into()]
            }
        );
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let mut g = graph(&["a"]);
        assert!(matches!(
            g.add_edge("a", "a"),
            Err(GraphError::CyclicDependency { .. })
        ));
        assert!(!g.has_path("a", "a"));
    }

    #[test]
    fn duplicate_edge_is_noop() {
        let mut g = graph(&["a", "b"]);
        g.add_edge("a", "b").unwrap();
        g.add_edge("a", "b").unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn remove_edge() {
        let mut g = graph(&["a", "b"]);
        g.add_edge("a", "b").unwrap();
        g.remove_edge("a", "b");
        assert!(!g.has_edge("a", "b"));
        // Removing again, or an unknown edge, does nothing.
        g.remove_edge("a", "b");
        g.remove_edge("a", "missing");
        // The reverse direction is allowed once the edge is gone.
        g.add_edge("b", "a").unwrap();
    }

    #[test]
    fn path_to_unknown_node_is_none() {
        let g = graph(&["a"]);
        assert!(!g.has_path("a", "missing"));
        assert!(!g.has_path("missing", "a"));
        assert!(g.get_path("a", "missing").is_none());
    }

    #[test]
    fn get_path_follows_first_predecessor() {
        let mut g = graph(&["a", "b", "c", "d"]);
        g.add_edge("a", "b").unwrap();
        g.add_edge("a", "c").unwrap();
        g.add_edge("b", "d").unwrap();
        g.add_edge("c", "d").unwrap();
        assert_eq!(g.get_path("a", "d"), Some(vec!["a", "b", "d"]));
        assert_eq!(g.get_path("c", "d"), Some(vec!["c", "d"]));
        assert_eq!(g.get_path("d", "a"), None);
    }

    #[test]
    fn sorted_names_follow_registration_order() {
        let mut g = graph(&["m1", "m2", "m3", "m4", "m5", "m6"]);
        g.add_edge("m1", "m2").unwrap();
        g.add_edge("m2", "m3").unwrap();
        g.add_edge("m2", "m4").unwrap();
        g.add_edge("m5", "m2").unwrap();
        g.add_edge("m4", "m3").unwrap();
        assert_eq!(
            g.sorted_node_names(),
            vec!["m1", "m5", "m2", "m4", "m3", "m6"]
        );
    }

    #[test]
    fn sort_subset_orders_through_outside_nodes() {
        let mut g = graph(&["c", "b", "a"]);
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();
        assert_eq!(g.sort_subset(&["c", "a"]).unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn sort_subset_rejects_unknown_names() {
        let g = graph(&["a"]);
        assert_eq!(
            g.sort_subset(&["a", "zzz"]),
            Err(GraphError::UnknownNode { name: "zzz".into() })
        );
    }

    #[test]
    fn dot_output_lists_modules() {
        let mut g = graph(&["acme/blog", "acme/theme"]);
        g.add_edge("acme/blog", "acme/theme").unwrap();
        let dot = g.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("acme/blog"));
        assert!(dot.contains("0 -> 1"));
    }
}
