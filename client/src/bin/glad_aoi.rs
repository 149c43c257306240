//! Run a GLAD alert action against a backend service for a file-supplied AOI.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use client::aoi_file;
use client::domain::ports::{
    AlertSummary, AnalysisPresenter, DOWNLOAD_FILENAME, FixtureOverlayLayer,
};
use client::domain::{AoiWorkflow, AoiWorkflowPorts, WorkflowError};
use client::outbound::fs_sink::DirFileSink;
use client::outbound::glad::GladHttpFeed;
use reqwest::Url;
use tokio::runtime::Builder;
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `glad-aoi` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "glad-aoi",
    about = "Run GLAD alert analysis or point downloads for a GeoJSON AOI",
    version
)]
struct CliArgs {
    /// Path to a GeoJSON file holding the AOI polygon.
    #[arg(long = "aoi", value_name = "path")]
    aoi_path: PathBuf,
    /// Base URL of the GLAD alert service.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Url,
    #[command(subcommand)]
    action: Action,
}

/// Action run once the AOI is registered.
#[derive(Debug, Clone, Subcommand)]
enum Action {
    /// POST the AOI to the count endpoint and print the summary.
    Count,
    /// POST the AOI to the download endpoint and save the points file.
    Download {
        /// Directory the points file is saved into.
        #[arg(long = "out-dir", value_name = "path", default_value = ".")]
        out_dir: PathBuf,
    },
}

/// Presenter that prints summaries to stdout.
///
/// Errors are not printed here: in this binary they surface through the
/// process exit path instead, so printing both would duplicate them.
struct StdoutPresenter;

impl AnalysisPresenter for StdoutPresenter {
    fn show_summary(&self, summary: &AlertSummary) {
        println!("{summary}");
    }

    fn show_error(&self, _error: &WorkflowError) {}
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let polygon = aoi_file::load_polygon(&args.aoi_path).map_err(io::Error::other)?;

    let feed = GladHttpFeed::new(&args.base_url)
        .map_err(|error| io::Error::other(format!("build alert feed: {error}")))?;
    let out_dir = match &args.action {
        Action::Download { out_dir } => out_dir.clone(),
        Action::Count => PathBuf::from("."),
    };
    let ports = AoiWorkflowPorts::new(
        Arc::new(FixtureOverlayLayer),
        Arc::new(feed),
        Arc::new(DirFileSink::new(out_dir.clone())),
        Arc::new(StdoutPresenter),
    );
    let workflow = AoiWorkflow::new(ports);

    let popup = workflow
        .on_polygon_drawn(polygon)
        .map_err(|error| io::Error::other(format!("register AOI: {error}")))?;
    debug!(title = %popup.title, actions = popup.actions.len(), "AOI registered");

    match args.action {
        Action::Count => {
            workflow
                .run_analysis()
                .await
                .map_err(|error| io::Error::other(format!("analysis failed: {error}")))?;
        }
        Action::Download { .. } => {
            workflow
                .download_points()
                .await
                .map_err(|error| io::Error::other(format!("download failed: {error}")))?;
            println!("saved={}", out_dir.join(DOWNLOAD_FILENAME).display());
        }
    }

    Ok(())
}
