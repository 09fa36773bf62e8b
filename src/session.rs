//! Session-scoped cache of loaded projects.
//!
//! Keyed by (opaque session id, project path). Each entry owns a
//! [`ProjectState`] — the canonical graph and its backup together — so a
//! cached pair can never mix generations. Per-session capacity is
//! bounded with least-recently-used eviction; the original design grew
//! without limit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::graph::ProjectState;

/// Projects kept per session before the least recently used is evicted.
pub const MAX_PROJECTS_PER_SESSION: usize = 8;

struct CacheEntry {
    path: PathBuf,
    state: ProjectState,
}

/// In-memory, session-scoped project cache.
///
/// Entries within a session are kept in recency order (most recent
/// last). Sessions do not share or evict each other's entries.
pub struct SessionCache {
    capacity: usize,
    sessions: HashMap<String, Vec<CacheEntry>>,
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionCache {
    pub fn new() -> Self {
        Self::with_capacity(MAX_PROJECTS_PER_SESSION)
    }

    /// A cache holding at most `capacity` projects per session.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: HashMap::new(),
        }
    }

    /// Look up a cached project and mark it most recently used.
    pub fn get_mut(&mut self, session_id: &str, path: &Path) -> Option<&mut ProjectState> {
        let entries = self.sessions.get_mut(session_id)?;
        let pos = entries.iter().position(|e| e.path == path)?;
        let entry = entries.remove(pos);
        entries.push(entry);
        entries.last_mut().map(|e| &mut e.state)
    }

    /// Insert or replace a project's state. Replacement swaps the whole
    /// `(graph, backup)` pair at once. May evict the session's least
    /// recently used project.
    pub fn insert(&mut self, session_id: &str, path: PathBuf, state: ProjectState) {
        let entries = self.sessions.entry(session_id.to_string()).or_default();
        entries.retain(|e| e.path != path);
        entries.push(CacheEntry { path, state });
        if entries.len() > self.capacity {
            let evicted = entries.remove(0);
            debug!(
                session = session_id,
                path = %evicted.path.display(),
                "evicted least recently used project"
            );
        }
    }

    /// Drop everything a session holds.
    pub fn remove_session(&mut self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn project_count(&self, session_id: &str) -> usize {
        self.sessions.get(session_id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::types::{LineSpan, NodeRecord};
    use crate::graph::CallGraph;

    fn state(tag: &str) -> ProjectState {
        let mut graph = CallGraph::new();
        graph.ensure_node(NodeRecord {
            id: tag.to_string(),
            label: tag.to_string(),
            file: None,
            span: LineSpan { start: 0, end: 0 },
            mangled_name: String::new(),
            kind: "FunctionDecl".to_string(),
        });
        ProjectState::new(graph)
    }

    #[test]
    fn test_miss_then_hit() {
        let mut cache = SessionCache::new();
        assert!(cache.get_mut("s1", Path::new("/p")).is_none());

        cache.insert("s1", "/p".into(), state("a()"));
        let cached = cache.get_mut("s1", Path::new("/p")).unwrap();
        assert!(cached.graph().contains("a()"));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut cache = SessionCache::new();
        cache.insert("s1", "/p".into(), state("a()"));
        assert!(cache.get_mut("s2", Path::new("/p")).is_none());
        assert_eq!(cache.project_count("s1"), 1);
        assert_eq!(cache.project_count("s2"), 0);
    }

    #[test]
    fn test_replace_swaps_whole_pair() {
        let mut cache = SessionCache::new();
        cache.insert("s1", "/p".into(), state("old()"));
        cache.insert("s1", "/p".into(), state("new()"));
        assert_eq!(cache.project_count("s1"), 1);

        let cached = cache.get_mut("s1", Path::new("/p")).unwrap();
        assert!(cached.graph().contains("new()"));
        assert!(!cached.graph().contains("old()"));
        // The backup came along with the new generation.
        let payload = cached.search("");
        assert_eq!(payload.nodes.len(), 1);
        assert_eq!(payload.nodes[0].id, "new()");
    }

    #[test]
    fn test_eviction_drops_least_recently_used() {
        let mut cache = SessionCache::with_capacity(2);
        cache.insert("s1", "/a".into(), state("a()"));
        cache.insert("s1", "/b".into(), state("b()"));
        // Touch /a so /b becomes the coldest.
        cache.get_mut("s1", Path::new("/a")).unwrap();
        cache.insert("s1", "/c".into(), state("c()"));

        assert_eq!(cache.project_count("s1"), 2);
        assert!(cache.get_mut("s1", Path::new("/b")).is_none());
        assert!(cache.get_mut("s1", Path::new("/a")).is_some());
        assert!(cache.get_mut("s1", Path::new("/c")).is_some());
    }

    #[test]
    fn test_eviction_is_per_session() {
        let mut cache = SessionCache::with_capacity(1);
        cache.insert("s1", "/a".into(), state("a()"));
        cache.insert("s2", "/b".into(), state("b()"));
        assert!(cache.get_mut("s1", Path::new("/a")).is_some());
        assert!(cache.get_mut("s2", Path::new("/b")).is_some());
    }

    #[test]
    fn test_remove_session() {
        let mut cache = SessionCache::new();
        cache.insert("s1", "/a".into(), state("a()"));
        cache.remove_session("s1");
        assert_eq!(cache.project_count("s1"), 0);
    }
}
