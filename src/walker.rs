//! AST walker — turns one translation unit's cursor tree into graph
//! builder observations.
//!
//! The walk is a pre-order depth-first traversal with an explicit work
//! stack, so arbitrarily deep nesting cannot overflow the call stack.
//! The enclosing-function context travels down with each stack entry by
//! value: a callable declaration replaces the context for its own
//! subtree only, and every node's children are visited regardless of
//! kind, so nested declarations (lambdas, local classes) are reached.

use crate::cursor::{Cursor, CursorKind};
use crate::filter::ExclusionFilter;
use crate::graph::{CalleeRecord, GraphBuilder, LineSpan, NodeRecord};
use crate::naming::qualified_name;

/// Walk the tree under `root`, feeding declarations and call sites into
/// `builder`.
pub fn walk<C: Cursor>(root: &C, filter: &ExclusionFilter, builder: &mut GraphBuilder) {
    let mut stack: Vec<(C, Option<String>)> = vec![(root.clone(), None)];

    while let Some((node, mut current_function)) = stack.pop() {
        let kind = node.kind();

        if kind.is_callable_decl() && !filter.is_excluded(&node) {
            let identity = qualified_name(&node);
            let record = NodeRecord::from_cursor(&node);
            let span = node
                .extent()
                .map(|s| LineSpan::from(&s))
                .unwrap_or(LineSpan { start: 0, end: 0 });
            current_function = Some(record.id.clone());
            builder.record_declaration(identity, record, span);
        }

        if kind == CursorKind::Call {
            if let Some(target) = node.referenced() {
                if !filter.is_excluded(&target) {
                    let site = node.extent();
                    builder.record_call(
                        current_function.as_deref(),
                        CalleeRecord::from_cursor(&target),
                        site.as_ref().and_then(|s| s.file.clone()),
                        site.map(|s| s.start).unwrap_or(0),
                    );
                }
            }
        }

        // Children in reverse so the stack pops them in source order.
        for child in node.children().into_iter().rev() {
            stack.push((child, current_function.clone()));
        }
    }
}
