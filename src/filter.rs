//! Exclusion of system-header and standard-library noise.

use crate::cursor::Cursor;
use crate::naming::qualified_display;

/// Decides whether a cursor is noise that must stay out of the graph.
///
/// Matching is prefix-based and case-sensitive, against the cursor's
/// absolute source path and its fully-qualified display name. Cursors
/// without a resolvable source file are kept: compiler builtins often
/// have no file, and dropping them by default would lose real edges.
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    pub excluded_paths: Vec<String>,
    pub excluded_prefixes: Vec<String>,
}

impl ExclusionFilter {
    pub fn new(excluded_paths: Vec<String>, excluded_prefixes: Vec<String>) -> Self {
        Self {
            excluded_paths,
            excluded_prefixes,
        }
    }

    /// No exclusions at all. Mostly useful in tests.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn is_excluded<C: Cursor>(&self, cursor: &C) -> bool {
        if let Some(file) = cursor.extent().and_then(|span| span.file) {
            let path = file.to_string_lossy();
            if self
                .excluded_paths
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
            {
                return true;
            }
        }

        let name = qualified_display(cursor);
        self.excluded_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
    }
}

impl Default for ExclusionFilter {
    /// Standard-library namespaces, compiler builtins, and system install
    /// trees.
    fn default() -> Self {
        Self::new(
            vec!["/usr".into(), "/Applications".into()],
            vec![
                "std::".into(),
                "__libcpp".into(),
                "operator".into(),
                "__builtin".into(),
                "__c11_atomic".into(),
            ],
        )
    }
}
