use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use import_graph::export::model::ExportFormat;

/// Build the module import graph of a TypeScript/JavaScript project.
///
/// import-graph walks the project (honouring .gitignore), extracts every static
/// `import ... from '<specifier>'` with a real parser, and prints the resulting
/// graph for a visualization front-end.
#[derive(Parser, Debug)]
#[command(
    name = "import-graph",
    version,
    about,
    long_about = None,
    propagate_version = true,
)]
pub struct Cli {
    /// Verbose logging on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How the build summary is printed.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum StatsFormat {
    /// Human-readable cargo-style lines (default).
    #[default]
    Text,
    /// Pretty-printed JSON object.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a project directory and print its import graph on stdout.
    Build {
        /// Path to the project root.
        path: PathBuf,

        /// Output format.
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,

        /// Keep folders and files without any import edge (disables orphan pruning).
        #[arg(long)]
        keep_orphans: bool,

        /// Print a build summary on stderr.
        #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "text")]
        stats: Option<StatsFormat>,
    },
}
