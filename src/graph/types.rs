//! Core types for the call graph.
//!
//! Defines the node metadata records accumulated during AST walking and
//! the payload types handed to the presentation layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cursor::{Cursor, SourceSpan};
use crate::naming::{qualified_display, qualified_name};

/// A 1-indexed, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: u32,
    pub end: u32,
}

impl From<&SourceSpan> for LineSpan {
    fn from(span: &SourceSpan) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

/// Metadata for one callable entity, as recorded from its best-known
/// declaration or definition cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Fully-qualified display name; the graph's node key.
    pub id: String,
    /// Display name as the parser renders it (with parameter types).
    pub label: String,
    /// Source file, when the cursor is file-backed.
    pub file: Option<PathBuf>,
    /// Declaration/definition extent, 1-indexed inclusive.
    pub span: LineSpan,
    /// Linker-level mangled name; empty when the entity has none.
    pub mangled_name: String,
    /// The parser's textual kind for the cursor.
    pub kind: String,
}

impl NodeRecord {
    /// Snapshot a declaration cursor into a record.
    pub fn from_cursor<C: Cursor>(cursor: &C) -> Self {
        let extent = cursor.extent();
        Self {
            id: qualified_display(cursor),
            label: cursor.display_name(),
            file: extent.as_ref().and_then(|span| span.file.clone()),
            span: extent
                .as_ref()
                .map(LineSpan::from)
                .unwrap_or(LineSpan { start: 0, end: 0 }),
            mangled_name: cursor.mangled_name().unwrap_or_default(),
            kind: cursor.kind_name(),
        }
    }
}

/// A call target observed at a call site, snapshotted from the referenced
/// cursor so nothing borrows the translation unit after the walk.
#[derive(Debug, Clone)]
pub struct CalleeRecord {
    /// Fully-qualified display name of the target.
    pub id: String,
    /// Bare fully-qualified name; used to look up declared extents.
    pub identity: String,
    pub label: String,
    pub file: Option<PathBuf>,
    /// The referenced cursor's own extent; the last-resort line range.
    pub reference_span: LineSpan,
    /// Extent of the target's definition, when the parser located one.
    pub definition_span: Option<LineSpan>,
    pub definition_file: Option<PathBuf>,
    pub mangled_name: String,
    pub kind: String,
}

impl CalleeRecord {
    /// Snapshot the target of a call expression.
    pub fn from_cursor<C: Cursor>(target: &C) -> Self {
        let extent = target.extent();
        let definition = target.definition().and_then(|d| d.extent());
        Self {
            id: qualified_display(target),
            identity: qualified_name(target),
            label: target.display_name(),
            file: extent.as_ref().and_then(|span| span.file.clone()),
            reference_span: extent
                .as_ref()
                .map(LineSpan::from)
                .unwrap_or(LineSpan { start: 0, end: 0 }),
            definition_span: definition.as_ref().map(LineSpan::from),
            definition_file: definition.and_then(|span| span.file),
            mangled_name: target.mangled_name().unwrap_or_default(),
            kind: target.kind_name(),
        }
    }
}

// ─── Presentation Payloads ──────────────────────────────────────────────

/// One node row of a query response; the sole node contract the
/// visualization layer depends on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodePayload {
    pub id: String,
    pub label: String,
    pub file: String,
    pub start: u32,
    pub end: u32,
    pub mangled_name: String,
    pub kind: String,
    /// On the highlighted ancestor path of the selected node.
    pub chain: bool,
    /// The tapped node itself.
    pub selected: bool,
    /// Matched the active search text.
    pub filtered: bool,
}

/// One directed edge row of a query response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgePayload {
    pub source: String,
    pub target: String,
    /// True iff both endpoints are on the highlighted chain.
    pub highlight: bool,
}

/// A complete query response: every node and edge of the current view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<NodePayload>,
    pub edges: Vec<EdgePayload>,
}

/// The source text behind one node, for display next to the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceExcerpt {
    pub code: String,
    pub start: u32,
    pub end: u32,
    pub filename: String,
}

/// Graph size summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}
