use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tripcop::api::TripApiClient;
use tripcop::config::{ApiConfig, MapConfig};
use tripcop::controller::{PageController, PageView, RequestState};
use tripcop::report;
use tripcop::traits::Notifier;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate ELD logs and a route map for a trip", long_about = None)]
struct Cli {
    /// Current location, e.g. "Los Angeles, CA"
    #[arg(long)]
    current: String,

    /// Pickup location
    #[arg(long)]
    pickup: String,

    /// Dropoff location
    #[arg(long)]
    dropoff: String,

    /// Hours already used in the current cycle
    #[arg(long, default_value = "0")]
    cycle_used: String,

    /// Trip API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Output directory for the report, GeoJSON and per-day SVGs
    #[arg(short, long, default_value = "trip-report", value_hint = ValueHint::DirPath)]
    out: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Prints alerts to stderr; the CLI has no dialog to block on.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let mut api_config = ApiConfig::default();
    if let Some(url) = cli.api_url {
        api_config.base_url = url;
    }
    if let Some(timeout) = cli.timeout_secs {
        api_config.timeout_secs = timeout;
    }
    let client = TripApiClient::new(api_config).context("building HTTP client")?;

    let mut controller = PageController::with_map_config(client, StderrNotifier, MapConfig::default());
    controller.set_field("current_location", &cli.current)?;
    controller.set_field("pickup_location", &cli.pickup)?;
    controller.set_field("dropoff_location", &cli.dropoff)?;
    controller.set_field("current_cycle_used_hours", &cli.cycle_used)?;

    let failed = matches!(controller.submit(), RequestState::Failure);
    let view = controller.view();

    fs::create_dir_all(&cli.out)
        .with_context(|| format!("creating output directory {}", cli.out.display()))?;
    let report_path = cli.out.join("report.html");
    let html = report::to_html(controller.form(), &view).context("rendering report")?;
    fs::write(&report_path, html)
        .with_context(|| format!("writing {}", report_path.display()))?;

    if let PageView::Ready { map, panels } = &view {
        if let Some(scene) = map {
            let geojson_path = cli.out.join("route.geojson");
            fs::write(&geojson_path, serde_json::to_string_pretty(&scene.to_geojson())?)
                .with_context(|| format!("writing {}", geojson_path.display()))?;
        } else {
            warn!("response carried no route path; map skipped");
        }
        for panel in panels {
            let svg_path = cli.out.join(format!("day-{}.svg", panel.day));
            fs::write(&svg_path, &panel.svg)
                .with_context(|| format!("writing {}", svg_path.display()))?;
            if panel.has_warning {
                warn!(day = panel.day, "duty hours do not add up to 24");
            }
        }
        info!(
            days = panels.len(),
            markers = view.marker_count(),
            out = %cli.out.display(),
            "trip report written"
        );
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
