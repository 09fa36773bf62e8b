//! Interactive query state over a built call graph.
//!
//! Holds the canonical graph together with its pre-filter backup and
//! applies the three interaction kinds: reload, text search, and node
//! selection. Every transition returns a fresh payload snapshot; the
//! backup is only ever replaced wholesale on reload, so the pair can
//! never mix generations.

use std::collections::HashSet;
use tracing::debug;

use super::engine::CallGraph;
use super::types::GraphPayload;

/// Query state for one loaded project: the current (possibly filtered)
/// graph and the unfiltered backup it can revert to.
#[derive(Debug, Clone)]
pub struct ProjectState {
    graph: CallGraph,
    backup: CallGraph,
}

impl ProjectState {
    /// Wrap a freshly compiled canonical graph.
    pub fn new(graph: CallGraph) -> Self {
        let backup = graph.clone();
        Self { graph, backup }
    }

    /// The current view's graph.
    pub fn graph(&self) -> &CallGraph {
        &self.graph
    }

    /// Replace the canonical graph after a new project load. All
    /// transient flags start cleared; the backup is reset alongside.
    pub fn reload(&mut self, graph: CallGraph) -> GraphPayload {
        self.backup = graph.clone();
        self.graph = graph;
        self.graph.payload()
    }

    /// Filter the view to everything reachable to or from a text match.
    ///
    /// Matching is a case-insensitive substring test over node ids,
    /// evaluated against the full backup graph, so consecutive searches
    /// never compound. An empty `text` reverts to the unfiltered backup;
    /// a search with no matches yields an empty view.
    pub fn search(&mut self, text: &str) -> GraphPayload {
        if text.is_empty() {
            self.graph = self.backup.clone();
            self.graph.reset_flags();
            return self.graph.payload();
        }

        let mut full = self.backup.clone();
        full.reset_flags();

        let targets = full.matches(text);
        debug!(text, matches = targets.len(), "search");

        let mut keep: HashSet<String> = targets.iter().cloned().collect();
        for target in &targets {
            keep.extend(full.descendants(target));
            keep.extend(full.ancestors(target));
        }

        let mut view = full.induced_subgraph(&keep);
        for target in &targets {
            view.mark_filtered(target);
        }
        self.graph = view;
        self.graph.payload()
    }

    /// Select a node and highlight its transitive caller chain.
    ///
    /// Selection state is reset first, so selecting twice in a row is
    /// idempotent. An id missing from the current view (e.g. filtered
    /// away by a search) clears the highlight and nothing else.
    pub fn select(&mut self, node_id: &str) -> GraphPayload {
        self.graph.clear_selection();

        if self.graph.contains(node_id) {
            self.graph.mark_selected(node_id);
            self.graph.mark_chain(node_id);
            for ancestor in self.graph.ancestors(node_id) {
                self.graph.mark_chain(&ancestor);
            }
        } else {
            debug!(node_id, "selected node not in current view");
        }
        self.graph.payload()
    }

    /// Snapshot the current view without changing any state.
    pub fn payload(&self) -> GraphPayload {
        self.graph.payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{LineSpan, NodeRecord};

    fn record(id: &str) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            label: id.to_string(),
            file: Some("test.cpp".into()),
            span: LineSpan { start: 1, end: 2 },
            mangled_name: String::new(),
            kind: "FunctionDecl".to_string(),
        }
    }

    fn graph(edges: &[(&str, &str)], isolated: &[&str]) -> CallGraph {
        let mut g = CallGraph::new();
        for (a, b) in edges {
            let a = g.ensure_node(record(a));
            let b = g.ensure_node(record(b));
            g.connect(a, b);
        }
        for id in isolated {
            g.ensure_node(record(id));
        }
        g
    }

    fn chained(payload: &GraphPayload) -> HashSet<String> {
        payload
            .nodes
            .iter()
            .filter(|n| n.chain)
            .map(|n| n.id.clone())
            .collect()
    }

    #[test]
    fn test_select_marks_ancestor_chain() {
        let mut state = ProjectState::new(graph(
            &[("main()", "mid()"), ("mid()", "leaf()")],
            &["other()"],
        ));
        let payload = state.select("leaf()");

        assert_eq!(
            chained(&payload),
            HashSet::from(["main()".into(), "mid()".into(), "leaf()".into()])
        );
        let leaf = payload.nodes.iter().find(|n| n.id == "leaf()").unwrap();
        assert!(leaf.selected);
        let main = payload.nodes.iter().find(|n| n.id == "main()").unwrap();
        assert!(!main.selected);
    }

    #[test]
    fn test_select_cycle_terminates_and_marks_all() {
        let mut state = ProjectState::new(graph(
            &[("a()", "b()"), ("b()", "c()"), ("c()", "a()")],
            &[],
        ));
        let payload = state.select("a()");
        assert_eq!(
            chained(&payload),
            HashSet::from(["a()".into(), "b()".into(), "c()".into()])
        );
    }

    #[test]
    fn test_select_idempotent() {
        let mut state = ProjectState::new(graph(&[("a()", "b()")], &[]));
        let first = state.select("b()");
        let second = state.select("b()");
        assert_eq!(chained(&first), chained(&second));
        assert_eq!(first.nodes.len(), second.nodes.len());
    }

    #[test]
    fn test_reselect_clears_previous_chain() {
        let mut state = ProjectState::new(graph(&[("a()", "b()"), ("c()", "d()")], &[]));
        state.select("b()");
        let payload = state.select("d()");
        assert_eq!(
            chained(&payload),
            HashSet::from(["c()".into(), "d()".into()])
        );
    }

    #[test]
    fn test_select_missing_node_clears_highlight() {
        let mut state = ProjectState::new(graph(&[("a()", "b()")], &[]));
        state.select("b()");
        let payload = state.select("gone()");
        assert!(chained(&payload).is_empty());
        assert!(payload.nodes.iter().all(|n| !n.selected));
    }

    #[test]
    fn test_search_keeps_reachability_closure() {
        // main → foo_helper, plus an unrelated isolated function.
        let mut state = ProjectState::new(graph(
            &[("main()", "foo_helper()"), ("foo_helper()", "deep()")],
            &["unused_fn()"],
        ));
        let payload = state.search("foo");

        let ids: HashSet<String> = payload.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(
            ids,
            HashSet::from(["main()".into(), "foo_helper()".into(), "deep()".into()])
        );
        let hit = payload.nodes.iter().find(|n| n.id == "foo_helper()").unwrap();
        assert!(hit.filtered);
        let main = payload.nodes.iter().find(|n| n.id == "main()").unwrap();
        assert!(!main.filtered);
    }

    #[test]
    fn test_search_no_match_yields_empty_view() {
        let mut state = ProjectState::new(graph(&[("a()", "b()")], &[]));
        let payload = state.search("zzz");
        assert!(payload.nodes.is_empty());
        assert!(payload.edges.is_empty());
    }

    #[test]
    fn test_empty_search_restores_backup() {
        let mut state = ProjectState::new(graph(&[("a()", "b()")], &["c()"]));
        state.search("a");
        let payload = state.search("");
        assert_eq!(payload.nodes.len(), 3);
        assert!(payload.nodes.iter().all(|n| !n.filtered));
    }

    #[test]
    fn test_consecutive_searches_do_not_compound() {
        let mut state = ProjectState::new(graph(&[("alpha()", "beta()")], &["gamma()"]));
        state.search("gamma");
        // The second search runs against the full backup, not the
        // narrowed view.
        let payload = state.search("alpha");
        let ids: HashSet<String> = payload.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, HashSet::from(["alpha()".into(), "beta()".into()]));
    }

    #[test]
    fn test_select_then_search_then_select_within_view() {
        let mut state = ProjectState::new(graph(
            &[("main()", "foo()"), ("bar()", "baz()")],
            &[],
        ));
        state.select("foo()");
        let payload = state.search("foo");
        // Search cleared the old chain marks.
        assert!(chained(&payload).is_empty());

        let payload = state.select("foo()");
        assert_eq!(
            chained(&payload),
            HashSet::from(["main()".into(), "foo()".into()])
        );
        // The filtered mark from the active search survives selection.
        let foo = payload.nodes.iter().find(|n| n.id == "foo()").unwrap();
        assert!(foo.filtered);
    }

    #[test]
    fn test_reload_replaces_both_generations() {
        let mut state = ProjectState::new(graph(&[("old()", "gone()")], &[]));
        state.search("old");
        state.reload(graph(&[("new()", "fresh()")], &[]));

        let payload = state.search("");
        let ids: HashSet<String> = payload.nodes.iter().map(|n| n.id.clone()).collect();
        assert_eq!(ids, HashSet::from(["new()".into(), "fresh()".into()]));
    }

    #[test]
    fn test_search_highlight_edges_only_in_chain() {
        let mut state = ProjectState::new(graph(
            &[("main()", "foo()"), ("foo()", "leaf()")],
            &[],
        ));
        state.search("foo");
        let payload = state.select("foo()");
        let up_edge = payload
            .edges
            .iter()
            .find(|e| e.source == "main()" && e.target == "foo()")
            .unwrap();
        let down_edge = payload
            .edges
            .iter()
            .find(|e| e.source == "foo()" && e.target == "leaf()")
            .unwrap();
        assert!(up_edge.highlight);
        assert!(!down_edge.highlight);
    }
}
