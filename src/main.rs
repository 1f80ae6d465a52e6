//! Entry point for the `plotview` console snapshot.

use std::{path::Path, time::Duration};

use plotview::cli::{self, CliOptions};
use plotview::config::{self, ViewConfig};
use plotview::drives::count_plot_files;
use plotview::logging;
use plotview::probe::{Console, LocalClock, StdoutConsole, SystemProbe};
use plotview::snapshot;
use plotview::view::{ViewController, ViewInputs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let Some(options) = cli::parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = load_config(&options)?;
    let snapshot_path = match options.snapshot.clone().or_else(|| config.snapshot_path.clone()) {
        Some(path) => path,
        None => config::default_snapshot_path()?,
    };
    tracing::info!(
        snapshot = %snapshot_path.display(),
        refresh_seconds = config.refresh_seconds,
        drives = config.drives.len(),
        "Starting viewer"
    );

    let probe = SystemProbe::new(config.manager_process_marker.clone());
    let clock = LocalClock;
    let mut console = StdoutConsole;
    let view = ViewController::new(&probe, &probe, &probe, &clock);

    loop {
        if let Err(err) = render_once(&view, &mut console, &config, &snapshot_path) {
            tracing::error!("Render failed: {err}");
            if options.once {
                return Err(err);
            }
            eprintln!("{err}");
        }
        if options.once {
            return Ok(());
        }
        std::thread::sleep(Duration::from_secs(config.refresh_seconds));
    }
}

fn load_config(options: &CliOptions) -> Result<ViewConfig, config::ConfigError> {
    match &options.config {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
}

fn render_once(
    view: &ViewController<'_>,
    console: &mut dyn Console,
    config: &ViewConfig,
    snapshot_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = snapshot::load(snapshot_path)?;
    let plot_counts = count_plot_files(&config.drives, &config.plot_extension);
    let inputs = ViewInputs {
        jobs: &snapshot.jobs,
        running_work: &snapshot.running_work,
        summary: &snapshot.summary,
        drives: &config.drives,
        plot_counts: &plot_counts,
        next_log_check: snapshot.next_log_check,
    };
    view.print_view(console, &inputs)?;
    Ok(())
}
