//! The narrow AST cursor interface consumed by the core.
//!
//! Everything downstream of parsing (naming, filtering, walking) works
//! against this trait rather than a concrete parser library, so the
//! front-end can be swapped or faked in tests. The shape mirrors what a
//! compiler front-end exposes for one syntactic element: kind, spelling,
//! display form, source extent, semantic parent, referenced target,
//! children.

use std::path::PathBuf;

/// The cursor kinds the call graph extraction cares about.
///
/// Anything else is [`CursorKind::Other`]: it has no direct graph effect,
/// but its children are still visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorKind {
    /// The whole-file root; name recursion terminates here.
    TranslationUnit,
    /// A free function declaration or definition.
    Function,
    /// A C++ class/struct method.
    Method,
    /// A constructor.
    Constructor,
    /// A function template.
    FunctionTemplate,
    /// A call expression.
    Call,
    /// Any other syntactic element.
    Other,
}

impl CursorKind {
    /// True for the declaration kinds that become graph nodes and
    /// enclosing-function context.
    pub fn is_callable_decl(self) -> bool {
        matches!(
            self,
            CursorKind::Function
                | CursorKind::Method
                | CursorKind::Constructor
                | CursorKind::FunctionTemplate
        )
    }
}

/// A source extent: file plus 1-indexed, inclusive line range.
///
/// `file` is `None` for compiler builtins and other unbacked cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    pub file: Option<PathBuf>,
    pub start: u32,
    pub end: u32,
}

/// One node of a parsed translation unit's AST.
///
/// Implementations wrap whatever the parser library returns; the core
/// never sees the library's own types.
pub trait Cursor: Clone {
    /// The classified kind of this cursor.
    fn kind(&self) -> CursorKind;

    /// The parser's textual name for the kind (kept verbatim for display).
    fn kind_name(&self) -> String;

    /// The bare name of the entity, without parameter types.
    fn spelling(&self) -> String;

    /// The display form, including parameter types for callables.
    fn display_name(&self) -> String;

    /// The source extent, if the cursor is backed by a file location.
    fn extent(&self) -> Option<SourceSpan>;

    /// The enclosing semantic scope (namespace, class, translation unit).
    fn semantic_parent(&self) -> Option<Self>;

    /// For references and call expressions: the declaration referred to.
    fn referenced(&self) -> Option<Self>;

    /// The definition of this entity, if the parser can locate one.
    fn definition(&self) -> Option<Self>;

    /// Child cursors in source order.
    fn children(&self) -> Vec<Self>;

    /// The linker-level mangled name, when the entity has one.
    fn mangled_name(&self) -> Option<String>;

    fn is_virtual_method(&self) -> bool;

    fn is_pure_virtual_method(&self) -> bool;
}
