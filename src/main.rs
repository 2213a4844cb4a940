mod cli;
mod output;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, StatsFormat};
use import_graph::config::ImportGraphConfig;
use import_graph::export::export_graph;
use import_graph::{BuildOptions, build_graph};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            path,
            format,
            pretty,
            keep_orphans,
            stats,
        } => {
            let start = Instant::now();

            let config = ImportGraphConfig::load(&path);
            let mut options = BuildOptions::from_config(&config);
            if keep_orphans {
                options.prune_orphans = false;
            }

            let outcome = build_graph(&path, &options)
                .with_context(|| format!("cannot build import graph for {}", path.display()))?;
            let result = export_graph(&outcome.graph, format, pretty)?;
            tracing::debug!(
                nodes = result.node_count,
                edges = result.edge_count,
                "graph exported"
            );

            println!("{}", result.content);

            if let Some(stats_format) = stats {
                output::print_summary(
                    &outcome.stats,
                    start.elapsed().as_secs_f64(),
                    stats_format == StatsFormat::Json,
                );
            }

            if result.node_count == 0 {
                eprintln!(
                    "warning: the import graph for {} is empty (no static imports found)",
                    path.display()
                );
            }
        }
    }

    Ok(())
}
