//! `spellbook` command line: download the entry cache and parse it into
//! record files.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rs_spellbook::{download, run_parse, DownloadOutcome, FieldRules, Options};

#[derive(Parser)]
#[command(name = "spellbook", about = "Spell card pipeline", version)]
struct Cli {
    /// Raw entry cache file
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Output directory for records and the facet catalog
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all entries into the cache (no-op if the cache exists)
    Download,
    /// Parse the cache into record files and the facet catalog
    Parse,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let defaults = Options::default();
    let options = Options {
        cache_path: cli.cache.unwrap_or(defaults.cache_path),
        output_dir: cli.output.unwrap_or(defaults.output_dir),
        ..defaults
    };

    match cli.command {
        Commands::Download => {
            match download(&options).context("download failed")? {
                DownloadOutcome::Cached(path) => {
                    println!("Cache already present at {}", path.display());
                }
                DownloadOutcome::Downloaded { path, documents } => {
                    println!("Downloaded {documents} entries to {}", path.display());
                }
            }
        }
        Commands::Parse => {
            let summary = run_parse(&options, &FieldRules::default()).with_context(|| {
                format!("parsing {} failed", options.cache_path.display())
            })?;
            println!(
                "Parsed {} entries: {} written, {} already present, {} skipped",
                summary.parsed, summary.written, summary.existing, summary.skipped
            );
        }
    }

    tracing::debug!(elapsed = ?t0.elapsed(), "done");
    Ok(())
}
