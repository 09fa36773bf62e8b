//! callgrapher CLI - load a C/C++ project and query its call graph.
//!
//! Usage:
//!   callgrapher stats                      # graph size + load warnings
//!   callgrapher dump                       # full graph payload as JSON
//!   callgrapher search <text>              # reachability-filtered subgraph
//!   callgrapher chain <node-id>            # highlight a node's caller chain
//!
//! The project path, compiler flags, and extra exclusions are global
//! options; diagnostics go to stderr so stdout stays valid JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use callgrapher::{load, ExclusionFilter, LoadOutcome, ProjectDescriptor, ProjectState};

#[derive(Parser)]
#[command(name = "callgrapher")]
#[command(about = "Static call graph explorer for C/C++", long_about = None)]
struct Cli {
    /// Project path: a source file, a directory, or a compile_commands.json
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Compiler flags passed through to clang (quote the whole set)
    #[arg(short, long, default_value = "")]
    flags: String,

    /// Extra excluded source path prefix (repeatable)
    #[arg(long = "exclude-path")]
    exclude_paths: Vec<String>,

    /// Extra excluded qualified-name prefix (repeatable)
    #[arg(long = "exclude-prefix")]
    exclude_prefixes: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the project and print graph statistics
    Stats,

    /// Print the full graph payload as JSON
    Dump,

    /// Print the subgraph reachable to/from nodes matching the text
    Search {
        /// Case-insensitive substring to match against node ids
        text: String,
    },

    /// Print the graph with a node's transitive caller chain highlighted
    Chain {
        /// Fully-qualified display name of the node to select
        node_id: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut filter = ExclusionFilter::default();
    filter.excluded_paths.extend(cli.exclude_paths);
    filter.excluded_prefixes.extend(cli.exclude_prefixes);

    let descriptor = ProjectDescriptor::new(cli.project, cli.flags);
    let LoadOutcome { graph, warnings } = load(&descriptor, &filter)?;

    for warning in &warnings {
        eprintln!("warning: {}", serde_json::to_string(warning)?);
    }

    let mut state = ProjectState::new(graph);
    let payload = match cli.command {
        Commands::Stats => {
            let stats = state.graph().stats();
            println!(
                "{} nodes, {} edges ({} warnings)",
                stats.node_count,
                stats.edge_count,
                warnings.len()
            );
            return Ok(());
        }
        Commands::Dump => state.payload(),
        Commands::Search { text } => state.search(&text),
        Commands::Chain { node_id } => state.select(&node_id),
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
