//! The call graph engine.
//!
//! Uses petgraph to store caller→callee relationships and provides the
//! traversal primitives the query layer is built from: ancestor and
//! descendant closure, substring matching, induced subgraphs, and
//! payload emission. All traversals are iterative with visited sets, so
//! recursive and mutually recursive call graphs terminate.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, HashSet};
use tracing::warn;

use super::types::{EdgePayload, GraphPayload, GraphStats, NodePayload, NodeRecord};

/// One node of the call graph: immutable metadata plus the transient
/// query flags.
#[derive(Debug, Clone)]
pub struct CallNode {
    pub record: NodeRecord,
    pub chain: bool,
    pub selected: bool,
    pub filtered: bool,
}

impl CallNode {
    fn new(record: NodeRecord) -> Self {
        Self {
            record,
            chain: false,
            selected: false,
            filtered: false,
        }
    }
}

/// A directed call graph over fully-qualified display names.
///
/// Node and edge insertion order is preserved, so payloads are
/// deterministic for a given accumulation order. Edge multiplicity is
/// collapsed: only existence matters, not call count.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: DiGraph<CallNode, ()>,
    index: HashMap<String, NodeIndex>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Construction ───────────────────────────────────────────

    /// Add a node for `record`, or return the existing one. The first
    /// recorded metadata for an id wins; later sightings merge into it.
    pub fn ensure_node(&mut self, record: NodeRecord) -> NodeIndex {
        if let Some(&idx) = self.index.get(&record.id) {
            return idx;
        }
        let id = record.id.clone();
        let idx = self.graph.add_node(CallNode::new(record));
        self.index.insert(id, idx);
        idx
    }

    /// Add a caller→callee edge unless it already exists.
    pub fn connect(&mut self, caller: NodeIndex, callee: NodeIndex) {
        if self.graph.find_edge(caller, callee).is_none() {
            self.graph.add_edge(caller, callee, ());
        }
    }

    // ─── Lookup ─────────────────────────────────────────────────

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&CallNode> {
        self.index.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }

    /// True if a directed caller→callee edge exists.
    pub fn has_edge(&self, caller: &str, callee: &str) -> bool {
        match (self.index.get(caller), self.index.get(callee)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Node ids whose lowercased form contains the lowercased `text`.
    pub fn matches(&self, text: &str) -> Vec<String> {
        let needle = text.to_lowercase();
        self.graph
            .node_indices()
            .filter(|&idx| self.graph[idx].record.id.to_lowercase().contains(&needle))
            .map(|idx| self.graph[idx].record.id.clone())
            .collect()
    }

    // ─── Traversal ──────────────────────────────────────────────

    /// All nodes reachable by following caller edges backwards from `id`,
    /// excluding `id` itself. Cycle-safe: a visited node is not
    /// re-expanded.
    pub fn ancestors(&self, id: &str) -> HashSet<String> {
        self.closure(id, Direction::Incoming)
    }

    /// All nodes reachable by following callee edges from `id`,
    /// excluding `id` itself.
    pub fn descendants(&self, id: &str) -> HashSet<String> {
        self.closure(id, Direction::Outgoing)
    }

    fn closure(&self, id: &str, direction: Direction) -> HashSet<String> {
        let mut out = HashSet::new();
        let Some(&start) = self.index.get(id) else {
            return out;
        };
        let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            for next in self.graph.neighbors_directed(idx, direction) {
                if seen.insert(next) {
                    out.insert(self.graph[next].record.id.clone());
                    stack.push(next);
                }
            }
        }
        out
    }

    /// The subgraph induced by `keep`: those nodes and every edge whose
    /// endpoints both survive. Edges that lose an endpoint are dropped
    /// from the result, logged once per call.
    pub fn induced_subgraph(&self, keep: &HashSet<String>) -> CallGraph {
        let mut sub = CallGraph::new();
        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            if keep.contains(&node.record.id) {
                sub.ensure_node(node.record.clone());
            }
        }

        let mut dropped = 0usize;
        for edge in self.graph.edge_references() {
            let source = &self.graph[edge.source()].record.id;
            let target = &self.graph[edge.target()].record.id;
            match (sub.index.get(source), sub.index.get(target)) {
                (Some(&a), Some(&b)) => sub.connect(a, b),
                _ => dropped += 1,
            }
        }
        if dropped > 0 {
            warn!(dropped, "edges lost an endpoint in the filtered view");
        }
        sub
    }

    // ─── Transient Flags ────────────────────────────────────────

    /// Clear chain, selected, and filtered on every node.
    pub fn reset_flags(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.chain = false;
            node.selected = false;
            node.filtered = false;
        }
    }

    /// Clear only the selection state (chain + selected); the filtered
    /// marks of an active search survive.
    pub fn clear_selection(&mut self) {
        for node in self.graph.node_weights_mut() {
            node.chain = false;
            node.selected = false;
        }
    }

    pub fn mark_chain(&mut self, id: &str) {
        if let Some(&idx) = self.index.get(id) {
            self.graph[idx].chain = true;
        }
    }

    pub fn mark_selected(&mut self, id: &str) {
        if let Some(&idx) = self.index.get(id) {
            self.graph[idx].selected = true;
        }
    }

    pub fn mark_filtered(&mut self, id: &str) {
        if let Some(&idx) = self.index.get(id) {
            self.graph[idx].filtered = true;
        }
    }

    // ─── Emission ───────────────────────────────────────────────

    /// Snapshot the graph into the presentation contract. An edge is
    /// highlighted iff both endpoints currently carry the chain flag.
    pub fn payload(&self) -> GraphPayload {
        let nodes = self
            .graph
            .node_indices()
            .map(|idx| {
                let node = &self.graph[idx];
                NodePayload {
                    id: node.record.id.clone(),
                    label: node.record.label.clone(),
                    file: node
                        .record
                        .file
                        .as_ref()
                        .map(|p| p.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    start: node.record.span.start,
                    end: node.record.span.end,
                    mangled_name: node.record.mangled_name.clone(),
                    kind: node.record.kind.clone(),
                    chain: node.chain,
                    selected: node.selected,
                    filtered: node.filtered,
                }
            })
            .collect();

        let edges = self
            .graph
            .edge_references()
            .map(|edge| {
                let source = &self.graph[edge.source()];
                let target = &self.graph[edge.target()];
                EdgePayload {
                    source: source.record.id.clone(),
                    target: target.record.id.clone(),
                    highlight: source.chain && target.chain,
                }
            })
            .collect();

        GraphPayload { nodes, edges }
    }
}
