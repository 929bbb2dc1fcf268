//! PixelCut CLI - batch crop, mask and resize from the command line
//!
//! `pixelcut export` applies one crop, one mask and one output size to every
//! image in a folder. `pixelcut list` shows which files an export would pick
//! up. Ctrl-C stops an export after the file in progress.

mod config;
mod discover;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pixelcut_core::{BatchExporter, ExportSummary};
use tracing_subscriber::EnvFilter;

use config::{build_plan, ExportArgs};
use discover::list_images;

#[derive(Parser, Debug)]
#[command(name = "pixelcut", author, version, about = "Batch crop, mask and resize images")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every image in a folder with the same crop, mask and size
    Export(ExportArgs),

    /// List the images an export of DIR would process
    List {
        /// Folder to scan
        dir: PathBuf,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Command::Export(args) => export(args).await,
        Command::List { dir, json } => list(&dir, json),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn export(args: ExportArgs) -> Result<ExitCode> {
    let json = args.json;
    let plan = build_plan(&args)?;
    tracing::info!(
        input = %plan.request.input_dir.display(),
        files = plan.entries.len(),
        "starting export"
    );

    let exporter = BatchExporter::new();
    let handle = exporter.spawn(plan.request, plan.entries)?;

    let cancel = handle.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping after the current file");
            cancel.cancel();
        }
    });

    let summary = tokio::task::spawn_blocking(move || {
        for progress in handle.progress() {
            eprintln!(
                "[{}/{}] {}",
                progress.current_index, progress.total, progress.file_name
            );
        }
        handle.join()
    })
    .await
    .context("export task failed")??;
    interrupt.abort();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(exit_code(&summary))
}

fn list(dir: &std::path::Path, json: bool) -> Result<ExitCode> {
    let images = list_images(dir)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&images)?);
    } else {
        for image in &images {
            println!("{}", image.name);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(summary: &ExportSummary) {
    let mut line = format!("Exported {}, skipped {}", summary.exported, summary.skipped);
    if !summary.errors.is_empty() {
        line.push_str(&format!(", errors {}", summary.errors.len()));
    }
    if summary.is_cancelled() {
        line.push_str(" (cancelled)");
    }
    println!("{line}");
    for error in &summary.errors {
        println!("  {error}");
    }
}

/// Failure when the run was rejected or nothing it attempted succeeded.
fn exit_code(summary: &ExportSummary) -> ExitCode {
    if summary.is_rejected() || (summary.attempted() > 0 && summary.exported == 0) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
