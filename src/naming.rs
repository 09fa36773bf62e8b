//! Symbol naming — stable fully-qualified identities for AST cursors.
//!
//! Two renderings exist for every callable: the bare qualified name
//! (`ns::Widget::resize`) used as the identity fallback, and the qualified
//! display form (`ns::Widget::resize(int, int)`) that distinguishes
//! overloads and is what the graph keys nodes by.

use crate::cursor::{Cursor, CursorKind};

/// The bare fully-qualified name: ancestor scope spellings joined by `::`,
/// ending in the cursor's own spelling.
///
/// Empty for the translation-unit root, so recursion up the semantic
/// parent chain terminates there.
pub fn qualified_name<C: Cursor>(cursor: &C) -> String {
    let mut segments = Vec::new();
    let mut current = Some(cursor.clone());
    while let Some(c) = current {
        if c.kind() == CursorKind::TranslationUnit {
            break;
        }
        segments.push(c.spelling());
        current = c.semantic_parent();
    }
    segments.reverse();
    segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("::")
}

/// The qualified display form: same scope prefix as [`qualified_name`],
/// but the final segment uses the display name (with parameter types).
pub fn qualified_display<C: Cursor>(cursor: &C) -> String {
    if cursor.kind() == CursorKind::TranslationUnit {
        return String::new();
    }
    let prefix = cursor
        .semantic_parent()
        .map(|p| qualified_name(&p))
        .unwrap_or_default();
    let display = cursor.display_name();
    if prefix.is_empty() {
        display
    } else {
        format!("{}::{}", prefix, display)
    }
}

/// Display form with ` virtual` / ` = 0` suffix for virtual and
/// pure-virtual methods.
pub fn pretty_print<C: Cursor>(cursor: &C) -> String {
    let mut suffix = "";
    if cursor.is_virtual_method() {
        suffix = " virtual";
    }
    if cursor.is_pure_virtual_method() {
        suffix = " = 0";
    }
    format!("{}{}", qualified_display(cursor), suffix)
}
