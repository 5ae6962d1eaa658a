// Command-line entry point. The library (lib.rs) is the public API; this
// binary maps arguments onto a BatchRequest and runs it with the libvips codec.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use image_compressor_lib::{AppState, BatchRequest, ProgressStage, process_images};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Folder to scan recursively; its directory layout is kept under the destination
    #[arg(short, long, conflicts_with = "files")]
    source: Option<PathBuf>,

    /// Folder receiving the compressed images
    #[arg(short, long)]
    destination: PathBuf,

    /// Output format: jpeg, png, webp or avif
    #[arg(short, long, default_value = "webp")]
    format: String,

    /// Maximum size of each output file, in KB (10-10000)
    #[arg(short, long = "max-size", default_value_t = 500)]
    max_size_kb: u32,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Explicit files to compress (written flat into the destination)
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)       // Remove module path
        .with_thread_ids(false)   // Remove thread IDs
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    info!("=== Image compressor starting ===");

    let state = AppState::new().context("failed to initialize the image codec")?;
    let request = BatchRequest {
        source_path: cli.source,
        destination_path: cli.destination,
        target_format: cli.format,
        max_size_kb: cli.max_size_kb,
        files: (!cli.files.is_empty()).then_some(cli.files),
    };

    let summary = process_images(&state, request, |event| match event.stage {
        ProgressStage::Scanning if event.total > 0 => info!("Found {} images", event.total),
        ProgressStage::Scanning => info!("Scanning for images..."),
        ProgressStage::Processing => {
            let file = event
                .current_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            info!("[{}/{}] {file}", event.current, event.total);
        }
        ProgressStage::Complete => info!("Done ({}%)", event.percentage()),
    })
    .await?;

    for entry in summary.detailed_results.iter().filter(|e| !e.result.is_processed()) {
        warn!(
            "{} skipped: {}",
            entry.filename,
            entry.result.reason.as_deref().unwrap_or("unknown reason")
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Processed {} of {} images ({} skipped)",
            summary.processed_count, summary.total_files, summary.skipped_count
        );
    }
    Ok(())
}
