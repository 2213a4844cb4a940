use import_graph::BuildStats;

/// Print a summary of the build.
///
/// Always written to **stderr** so that stdout stays clean for the exported
/// graph. `json = true` emits the stats as a pretty-printed JSON object,
/// otherwise a cargo-style human-readable summary.
pub fn print_summary(stats: &BuildStats, elapsed_secs: f64, json: bool) {
    if json {
        match serde_json::to_string_pretty(stats) {
            Ok(s) => eprintln!("{}", s),
            Err(e) => eprintln!("error serialising stats: {}", e),
        }
        return;
    }

    eprintln!(
        "Scanned {} files and {} folders in {:.2}s",
        stats.source_files, stats.folders, elapsed_secs
    );
    eprintln!(
        "  {} nodes, {} edges ({} pruned)",
        stats.nodes, stats.edges, stats.pruned
    );
    eprintln!(
        "  {} ignored entries, {} manifest dependencies",
        stats.ignored, stats.manifest_dependencies
    );

    if stats.parse_failures > 0 {
        eprintln!("  {} files had syntax errors", stats.parse_failures);
    }
    if stats.unreadable > 0 {
        eprintln!("  {} entries could not be read", stats.unreadable);
    }
    if stats.revisits_skipped > 0 {
        eprintln!(
            "  {} symlinked directories already visited",
            stats.revisits_skipped
        );
    }
    if stats.manifest_malformed {
        eprintln!("  package.json could not be parsed; dependencies not injected");
    }
}
