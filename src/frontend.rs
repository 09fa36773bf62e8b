//! libclang front-end adapter.
//!
//! The only module that touches the `clang` crate. Wraps `clang::Entity`
//! behind the [`Cursor`] trait and drives one parse per source file,
//! reporting error/fatal diagnostics without aborting the batch.
//! libclang is loaded at runtime, so a missing installation surfaces as
//! a [`CallgrapherError::FrontEnd`] instead of a link failure.

use clang::diagnostic::Severity;
use clang::{Clang, Entity, EntityKind, Index};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cursor::{Cursor, CursorKind, SourceSpan};
use crate::error::{CallgrapherError, Result};

/// An error or fatal diagnostic from parsing one translation unit.
#[derive(Debug, Clone, Serialize)]
pub struct UnitDiagnostic {
    pub file: PathBuf,
    pub severity: String,
    pub line: u32,
    pub message: String,
}

/// Owns the libclang instance for the duration of one project load.
pub struct FrontEnd {
    clang: Clang,
}

impl FrontEnd {
    pub fn new() -> Result<Self> {
        let clang = Clang::new().map_err(CallgrapherError::FrontEnd)?;
        Ok(Self { clang })
    }

    /// Parse every file with the given compiler arguments, invoking
    /// `on_unit` with each translation unit's root cursor. One index is
    /// shared across all files. Returns the diagnostics worth surfacing;
    /// a file that fails to parse at all is reported and skipped.
    pub fn run<F>(
        &self,
        files: &[PathBuf],
        arguments: &[String],
        mut on_unit: F,
    ) -> Vec<UnitDiagnostic>
    where
        F: FnMut(&ClangCursor<'_>),
    {
        let index = Index::new(&self.clang, false, false);
        let mut report = Vec::new();

        for file in files {
            debug!(file = %file.display(), "parsing");
            let mut parser = index.parser(file);
            parser.arguments(arguments);
            match parser.parse() {
                Ok(unit) => {
                    for diagnostic in unit.get_diagnostics() {
                        let severity = diagnostic.get_severity();
                        if severity == Severity::Error || severity == Severity::Fatal {
                            let location = diagnostic.get_location().get_file_location();
                            report.push(UnitDiagnostic {
                                file: file.clone(),
                                severity: format!("{:?}", severity).to_lowercase(),
                                line: location.line,
                                message: diagnostic.get_text(),
                            });
                        }
                    }
                    on_unit(&ClangCursor(unit.get_entity()));
                }
                Err(error) => {
                    info!(file = %file.display(), %error, "unable to load input");
                    report.push(UnitDiagnostic {
                        file: file.clone(),
                        severity: "fatal".to_string(),
                        line: 0,
                        message: error.to_string(),
                    });
                }
            }
        }

        report
    }
}

/// A libclang entity as seen through the narrow cursor interface.
#[derive(Debug, Clone, Copy)]
pub struct ClangCursor<'tu>(Entity<'tu>);

impl<'tu> Cursor for ClangCursor<'tu> {
    fn kind(&self) -> CursorKind {
        match self.0.get_kind() {
            EntityKind::TranslationUnit => CursorKind::TranslationUnit,
            EntityKind::FunctionDecl => CursorKind::Function,
            EntityKind::Method => CursorKind::Method,
            EntityKind::Constructor => CursorKind::Constructor,
            EntityKind::FunctionTemplate => CursorKind::FunctionTemplate,
            EntityKind::CallExpr => CursorKind::Call,
            _ => CursorKind::Other,
        }
    }

    fn kind_name(&self) -> String {
        format!("{:?}", self.0.get_kind())
    }

    fn spelling(&self) -> String {
        self.0.get_name().unwrap_or_default()
    }

    fn display_name(&self) -> String {
        self.0.get_display_name().unwrap_or_default()
    }

    fn extent(&self) -> Option<SourceSpan> {
        let range = self.0.get_range()?;
        let start = range.get_start().get_file_location();
        let end = range.get_end().get_file_location();
        Some(SourceSpan {
            file: start.file.map(|f| f.get_path()),
            start: start.line,
            end: end.line,
        })
    }

    fn semantic_parent(&self) -> Option<Self> {
        self.0.get_semantic_parent().map(ClangCursor)
    }

    fn referenced(&self) -> Option<Self> {
        self.0.get_reference().map(ClangCursor)
    }

    fn definition(&self) -> Option<Self> {
        self.0.get_definition().map(ClangCursor)
    }

    fn children(&self) -> Vec<Self> {
        self.0.get_children().into_iter().map(ClangCursor).collect()
    }

    fn mangled_name(&self) -> Option<String> {
        self.0.get_mangled_name()
    }

    fn is_virtual_method(&self) -> bool {
        self.0.is_virtual_method()
    }

    fn is_pure_virtual_method(&self) -> bool {
        self.0.is_pure_virtual_method()
    }
}
