//! Call graph module — data model, builder, engine, and query state.

pub mod builder;
pub mod engine;
pub mod query;
pub mod types;

pub use builder::{BuildDiagnostic, GraphBuilder};
pub use engine::{CallGraph, CallNode};
pub use query::ProjectState;
pub use types::{
    CalleeRecord, EdgePayload, GraphPayload, GraphStats, LineSpan, NodePayload, NodeRecord,
    SourceExcerpt,
};
