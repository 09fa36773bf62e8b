//! Project loader — enumerates sources, drives the parser, builds the
//! canonical graph.
//!
//! A load never aborts on malformed input: files that fail to parse
//! contribute whatever the front-end salvaged, and everything worth
//! telling the user about comes back as [`LoadWarning`]s alongside the
//! graph.

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{CallgrapherError, Result};
use crate::filter::ExclusionFilter;
use crate::frontend::{FrontEnd, UnitDiagnostic};
use crate::graph::{BuildDiagnostic, CallGraph, GraphBuilder, NodePayload, SourceExcerpt};
use crate::walker::walk;

/// File extensions treated as C/C++ sources or headers.
const SOURCE_EXTENSIONS: &[&str] = &["c", "cc", "cpp", "cxx", "h", "hh", "hpp", "hxx"];

/// What to load: a single file, a directory tree, or a
/// `compile_commands.json`-style database, plus the compiler flags to
/// parse with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    pub path: PathBuf,
    /// Whitespace-separated compiler arguments (include dirs, defines).
    pub compiler_flags: String,
}

impl ProjectDescriptor {
    pub fn new(path: impl Into<PathBuf>, compiler_flags: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            compiler_flags: compiler_flags.into(),
        }
    }

    pub fn flags(&self) -> Vec<String> {
        self.compiler_flags
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// A recoverable problem encountered during a load.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// The parser reported an error/fatal diagnostic, or a file could
    /// not be turned into a translation unit at all.
    ParseDiagnostic {
        file: PathBuf,
        severity: String,
        line: u32,
        message: String,
    },
    /// A call expression outside any tracked function was dropped.
    UntrackedCall {
        callee: String,
        file: Option<PathBuf>,
        line: u32,
    },
    /// A caller with recorded calls but no declaration was skipped.
    OrphanCaller { caller: String, dropped_edges: usize },
}

impl From<UnitDiagnostic> for LoadWarning {
    fn from(d: UnitDiagnostic) -> Self {
        LoadWarning::ParseDiagnostic {
            file: d.file,
            severity: d.severity,
            line: d.line,
            message: d.message,
        }
    }
}

impl From<BuildDiagnostic> for LoadWarning {
    fn from(d: BuildDiagnostic) -> Self {
        match d {
            BuildDiagnostic::UntrackedCall { callee, file, line } => {
                LoadWarning::UntrackedCall { callee, file, line }
            }
            BuildDiagnostic::OrphanCaller {
                caller,
                dropped_edges,
            } => LoadWarning::OrphanCaller {
                caller,
                dropped_edges,
            },
        }
    }
}

/// The result of one project load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub graph: CallGraph,
    pub warnings: Vec<LoadWarning>,
}

/// Load a project and compile its canonical call graph.
pub fn load(descriptor: &ProjectDescriptor, filter: &ExclusionFilter) -> Result<LoadOutcome> {
    let files = enumerate_sources(&descriptor.path)?;
    info!(
        files = files.len(),
        path = %descriptor.path.display(),
        "reading source files"
    );

    let frontend = FrontEnd::new()?;
    let mut builder = GraphBuilder::new();
    let flags = descriptor.flags();
    let unit_diagnostics = frontend.run(&files, &flags, |root| {
        walk(root, filter, &mut builder);
    });

    let mut warnings: Vec<LoadWarning> =
        unit_diagnostics.into_iter().map(LoadWarning::from).collect();
    let (graph, build_diagnostics) = builder.compile();
    warnings.extend(build_diagnostics.into_iter().map(LoadWarning::from));

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        warnings = warnings.len(),
        "project load complete"
    );
    Ok(LoadOutcome { graph, warnings })
}

/// Resolve a project path into the list of translation units to parse,
/// in a deterministic (lexical) order.
///
/// A `.json` path is read as a compilation database; a file is parsed
/// alone; a directory is walked recursively for C/C++ extensions.
pub fn enumerate_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        return read_compile_commands(path);
    }

    let metadata = fs::metadata(path).map_err(|source| CallgrapherError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let files = WalkBuilder::new(path)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        })
        .collect();
    Ok(files)
}

#[derive(Debug, Deserialize)]
struct CompileCommand {
    file: PathBuf,
    #[serde(default)]
    directory: Option<PathBuf>,
}

fn read_compile_commands(path: &Path) -> Result<Vec<PathBuf>> {
    let text = fs::read_to_string(path).map_err(|source| CallgrapherError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let commands: Vec<CompileCommand> =
        serde_json::from_str(&text).map_err(|e| CallgrapherError::CompileDb {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let base = path.parent().unwrap_or(Path::new("."));
    Ok(commands
        .into_iter()
        .map(|cmd| {
            if cmd.file.is_absolute() {
                cmd.file
            } else if let Some(dir) = cmd.directory {
                dir.join(cmd.file)
            } else {
                base.join(cmd.file)
            }
        })
        .collect())
}

/// Read the source text behind a node, for display next to the graph.
pub fn read_source(node: &NodePayload) -> Result<SourceExcerpt> {
    if node.file.is_empty() {
        return Err(CallgrapherError::MissingFile(PathBuf::new()));
    }
    let path = PathBuf::from(&node.file);
    let code =
        fs::read_to_string(&path).map_err(|_| CallgrapherError::MissingFile(path.clone()))?;
    Ok(SourceExcerpt {
        code,
        start: node.start,
        end: node.end,
        filename: node.file.clone(),
    })
}
