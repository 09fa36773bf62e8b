//! # callgrapher
//!
//! Interactive static call graph exploration for C/C++.
//!
//! callgrapher walks compiler-produced ASTs (via libclang), reconciles
//! the many cursor representations of one logical function into a
//! deduplicated directed call graph, and answers interactive queries
//! over it: ancestor-chain highlighting, substring search with
//! reachability filtering, and per-session caching across repeated
//! loads of the same project.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use callgrapher::{load, ExclusionFilter, ProjectDescriptor, ProjectState};
//!
//! let descriptor = ProjectDescriptor::new("./src", "-I./include");
//! let outcome = load(&descriptor, &ExclusionFilter::default())?;
//!
//! let mut state = ProjectState::new(outcome.graph);
//! let view = state.search("parse");       // subgraph reachable from matches
//! let view = state.select(&view.nodes[0].id); // highlight caller chain
//! # Ok::<(), callgrapher::CallgrapherError>(())
//! ```

pub mod cursor;
pub mod error;
pub mod filter;
pub mod frontend;
pub mod graph;
pub mod loader;
pub mod naming;
pub mod session;
pub mod walker;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports for convenience
pub use error::{CallgrapherError, Result};

pub use cursor::{Cursor, CursorKind, SourceSpan};
pub use filter::ExclusionFilter;
pub use frontend::{ClangCursor, FrontEnd};
pub use graph::{
    BuildDiagnostic, CallGraph, EdgePayload, GraphBuilder, GraphPayload, GraphStats, LineSpan,
    NodePayload, NodeRecord, ProjectState, SourceExcerpt,
};
pub use loader::{enumerate_sources, load, read_source, LoadOutcome, LoadWarning, ProjectDescriptor};
pub use naming::{pretty_print, qualified_display, qualified_name};
pub use session::{SessionCache, MAX_PROJECTS_PER_SESSION};
pub use walker::walk;
