//! In-memory cursor trees for tests.
//!
//! Implements the [`Cursor`] trait over a small Rc-backed tree so the
//! walker, builder, and query layers can be exercised without libclang.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::cursor::{Cursor, CursorKind, SourceSpan};

pub(crate) struct FakeNode {
    kind: CursorKind,
    kind_name: &'static str,
    spelling: String,
    display: String,
    span: Option<SourceSpan>,
    mangled: RefCell<Option<String>>,
    virtual_method: Cell<bool>,
    pure_virtual: Cell<bool>,
    parent: RefCell<Weak<FakeNode>>,
    children: RefCell<Vec<FakeCursor>>,
    referenced: RefCell<Option<FakeCursor>>,
    definition: RefCell<Option<FakeCursor>>,
}

#[derive(Clone)]
pub(crate) struct FakeCursor {
    inner: Rc<FakeNode>,
}

impl FakeCursor {
    fn new(
        kind: CursorKind,
        kind_name: &'static str,
        spelling: &str,
        display: &str,
        span: Option<SourceSpan>,
    ) -> Self {
        Self {
            inner: Rc::new(FakeNode {
                kind,
                kind_name,
                spelling: spelling.to_string(),
                display: display.to_string(),
                span,
                mangled: RefCell::new(None),
                virtual_method: Cell::new(false),
                pure_virtual: Cell::new(false),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
                referenced: RefCell::new(None),
                definition: RefCell::new(None),
            }),
        }
    }

    fn span(file: &str, start: u32, end: u32) -> Option<SourceSpan> {
        Some(SourceSpan {
            file: Some(file.into()),
            start,
            end,
        })
    }

    /// A translation-unit root.
    pub fn root() -> Self {
        Self::new(CursorKind::TranslationUnit, "TranslationUnit", "", "", None)
    }

    pub fn function(spelling: &str, display: &str, file: &str, start: u32, end: u32) -> Self {
        Self::new(
            CursorKind::Function,
            "FunctionDecl",
            spelling,
            display,
            Self::span(file, start, end),
        )
    }

    /// A function cursor with no backing file, like a compiler builtin.
    pub fn function_without_file(spelling: &str, display: &str) -> Self {
        Self::new(
            CursorKind::Function,
            "FunctionDecl",
            spelling,
            display,
            Some(SourceSpan {
                file: None,
                start: 0,
                end: 0,
            }),
        )
    }

    pub fn method(spelling: &str, display: &str, file: &str, start: u32, end: u32) -> Self {
        Self::new(
            CursorKind::Method,
            "Method",
            spelling,
            display,
            Self::span(file, start, end),
        )
    }

    pub fn constructor(spelling: &str, display: &str, file: &str, start: u32, end: u32) -> Self {
        Self::new(
            CursorKind::Constructor,
            "Constructor",
            spelling,
            display,
            Self::span(file, start, end),
        )
    }

    pub fn function_template(
        spelling: &str,
        display: &str,
        file: &str,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(
            CursorKind::FunctionTemplate,
            "FunctionTemplate",
            spelling,
            display,
            Self::span(file, start, end),
        )
    }

    /// A scope container (namespace, class) that contributes a name
    /// segment but is otherwise inert.
    pub fn scope(spelling: &str) -> Self {
        Self::new(CursorKind::Other, "Namespace", spelling, spelling, None)
    }

    /// An inert statement node.
    pub fn statement() -> Self {
        Self::new(CursorKind::Other, "CompoundStmt", "", "", None)
    }

    /// A call expression referencing `target`.
    pub fn call(target: &FakeCursor, file: &str, line: u32) -> Self {
        let call = Self::new(
            CursorKind::Call,
            "CallExpr",
            &target.inner.spelling,
            &target.inner.display,
            Self::span(file, line, line),
        );
        *call.inner.referenced.borrow_mut() = Some(target.clone());
        call
    }

    /// A call expression whose target could not be resolved.
    pub fn unresolved_call(file: &str, line: u32) -> Self {
        Self::new(
            CursorKind::Call,
            "CallExpr",
            "",
            "",
            Self::span(file, line, line),
        )
    }

    pub fn add_child(&self, child: &FakeCursor) {
        *child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
        self.inner.children.borrow_mut().push(child.clone());
    }

    pub fn virtual_method(self) -> Self {
        self.inner.virtual_method.set(true);
        self
    }

    pub fn pure_virtual_method(self) -> Self {
        self.inner.pure_virtual.set(true);
        self
    }

    pub fn with_mangled(self, mangled: &str) -> Self {
        *self.inner.mangled.borrow_mut() = Some(mangled.to_string());
        self
    }

    /// Attach the cursor the parser would report as this entity's
    /// definition.
    pub fn set_definition(&self, definition: &FakeCursor) {
        *self.inner.definition.borrow_mut() = Some(definition.clone());
    }
}

impl Cursor for FakeCursor {
    fn kind(&self) -> CursorKind {
        self.inner.kind
    }

    fn kind_name(&self) -> String {
        self.inner.kind_name.to_string()
    }

    fn spelling(&self) -> String {
        self.inner.spelling.clone()
    }

    fn display_name(&self) -> String {
        self.inner.display.clone()
    }

    fn extent(&self) -> Option<SourceSpan> {
        self.inner.span.clone()
    }

    fn semantic_parent(&self) -> Option<Self> {
        self.inner
            .parent
            .borrow()
            .upgrade()
            .map(|inner| FakeCursor { inner })
    }

    fn referenced(&self) -> Option<Self> {
        self.inner.referenced.borrow().clone()
    }

    fn definition(&self) -> Option<Self> {
        self.inner.definition.borrow().clone()
    }

    fn children(&self) -> Vec<Self> {
        self.inner.children.borrow().clone()
    }

    fn mangled_name(&self) -> Option<String> {
        self.inner.mangled.borrow().clone()
    }

    fn is_virtual_method(&self) -> bool {
        self.inner.virtual_method.get()
    }

    fn is_pure_virtual_method(&self) -> bool {
        self.inner.pure_virtual.get()
    }
}
