//! filter-lab CLI: decode an image, apply one filter, write the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use filter_lab::{Filter, Session};

#[derive(Parser)]
#[command(name = "filter-lab")]
#[command(about = "Apply one of five fixed pixel filters to a JPEG or PNG image")]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available filters.
    List,

    /// Apply a filter to an image.
    Apply {
        /// Filter display name or short name (smoothing, sharpening, contrast, edges, log).
        #[arg(short, long)]
        filter: Filter,

        /// Path to the input image (JPEG or PNG).
        input: PathBuf,

        /// Path to write the result; format follows the extension.
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::List => {
            for filter in Filter::ALL {
                println!("{:<12} {:<28} {}", filter.slug(), filter.name(), filter.icon());
            }
            Ok(())
        }
        Commands::Apply { filter, input, out } => run_apply(filter, &input, &out),
    }
}

fn run_apply(filter: Filter, input: &Path, out: &Path) -> Result<()> {
    let data = std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;

    let mut session = Session::new();
    session
        .load_bytes(&data)
        .with_context(|| format!("failed to load {}", input.display()))?;
    session.select(filter);
    tracing::debug!(
        caption = session.original_caption(),
        "loaded {}",
        input.display()
    );

    let rendered = session.apply_selected()?;
    rendered
        .raster
        .save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    tracing::info!(
        caption = %rendered.caption,
        mode = rendered.raster.mode(),
        "result written to {}",
        out.display()
    );
    Ok(())
}
