//! Graph builder — accumulates walker observations into a call graph.
//!
//! One builder value is owned for the duration of a project load: each
//! translation-unit walk feeds declarations and call sites into its maps,
//! and a single `compile()` at the end produces the canonical graph.
//! No state outlives a load.

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::engine::CallGraph;
use super::types::{CalleeRecord, LineSpan, NodeRecord};

/// A problem found while accumulating or compiling; never fatal.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildDiagnostic {
    /// A call expression occurred outside any tracked function (e.g. an
    /// initializer at namespace scope); the edge has no caller to attach
    /// to and is dropped.
    UntrackedCall {
        callee: String,
        file: Option<PathBuf>,
        line: u32,
    },
    /// A caller key had recorded calls but no recorded declaration; its
    /// edge group is skipped.
    OrphanCaller { caller: String, dropped_edges: usize },
}

/// Accumulates symbol and call observations across translation units.
///
/// Three maps carry the state: `fullnames` (bare identity → the display
/// names seen for it), `nodes` (display-name key → metadata), and
/// `declarations` (bare identity → declared extent). `calls` keeps the
/// observed call lists in first-observation order so compilation is
/// deterministic.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    fullnames: HashMap<String, BTreeSet<String>>,
    nodes: HashMap<String, NodeRecord>,
    declarations: HashMap<String, LineSpan>,
    calls: IndexMap<String, Vec<CalleeRecord>>,
    untracked: Vec<BuildDiagnostic>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable declaration. Repeat sightings of the same
    /// entity (declaration then definition, or across translation units)
    /// merge onto one key; the first recorded metadata wins.
    pub fn record_declaration(&mut self, identity: String, record: NodeRecord, span: LineSpan) {
        self.fullnames
            .entry(identity.clone())
            .or_default()
            .insert(record.id.clone());
        self.declarations.entry(identity).or_insert(span);
        self.nodes.entry(record.id.clone()).or_insert(record);
    }

    /// Record one observed call. `caller` is the display-name key of the
    /// enclosing function, or `None` when the call occurred outside any
    /// tracked function — such calls become diagnostics, not edges.
    pub fn record_call(
        &mut self,
        caller: Option<&str>,
        callee: CalleeRecord,
        site_file: Option<PathBuf>,
        site_line: u32,
    ) {
        match caller {
            Some(key) => {
                self.calls
                    .entry(key.to_string())
                    .or_insert_with(Vec::new)
                    .push(callee);
            }
            None => {
                debug!(callee = %callee.id, "call outside any tracked function");
                self.untracked.push(BuildDiagnostic::UntrackedCall {
                    callee: callee.id,
                    file: site_file,
                    line: site_line,
                });
            }
        }
    }

    /// Compile the accumulated maps into a call graph.
    ///
    /// For every caller with recorded calls, a node is created from its
    /// declared metadata; every callee resolves to the best metadata
    /// available: a declared node under the same display name, an
    /// overload-unique declared node under the bare identity, or a
    /// fresh record with the definition / declaration / reference extent
    /// fallback chain.
    pub fn compile(self) -> (CallGraph, Vec<BuildDiagnostic>) {
        let GraphBuilder {
            fullnames,
            nodes,
            declarations,
            calls,
            untracked,
        } = self;
        let mut graph = CallGraph::new();
        let mut diagnostics = untracked;

        for (caller_key, callees) in &calls {
            let Some(caller_record) = nodes.get(caller_key) else {
                warn!(caller = %caller_key, "calls recorded for unknown caller; skipping");
                diagnostics.push(BuildDiagnostic::OrphanCaller {
                    caller: caller_key.clone(),
                    dropped_edges: callees.len(),
                });
                continue;
            };
            let caller_idx = graph.ensure_node(caller_record.clone());

            for callee in callees {
                let record = resolve_callee(&fullnames, &nodes, &declarations, callee);
                let callee_idx = graph.ensure_node(record);
                graph.connect(caller_idx, callee_idx);
            }
        }

        (graph, diagnostics)
    }
}

/// Best-available metadata for a call target.
fn resolve_callee(
    fullnames: &HashMap<String, BTreeSet<String>>,
    nodes: &HashMap<String, NodeRecord>,
    declarations: &HashMap<String, LineSpan>,
    callee: &CalleeRecord,
) -> NodeRecord {
    // A declaration under the same display name is the richest source.
    if let Some(known) = nodes.get(&callee.id) {
        return known.clone();
    }

    // The bare identity may map to a single declared display form — this
    // is how a template instantiation or differently-rendered reference
    // merges with its declaration instead of duplicating.
    if let Some(pretty_names) = fullnames.get(&callee.identity) {
        if pretty_names.len() == 1 {
            if let Some(known) = pretty_names.iter().next().and_then(|only| nodes.get(only)) {
                return known.clone();
            }
        }
    }

    // Never declared in any walked unit: fall back through definition
    // extent, recorded declaration extent, then the reference cursor's
    // own extent, so the node still renders with a real location.
    let (file, span) = if let Some(span) = callee.definition_span {
        (
            callee.definition_file.clone().or_else(|| callee.file.clone()),
            span,
        )
    } else if let Some(span) = declarations.get(&callee.identity) {
        (callee.file.clone(), *span)
    } else {
        (callee.file.clone(), callee.reference_span)
    };

    NodeRecord {
        id: callee.id.clone(),
        label: callee.label.clone(),
        file,
        span,
        mangled_name: callee.mangled_name.clone(),
        kind: callee.kind.clone(),
    }
}
