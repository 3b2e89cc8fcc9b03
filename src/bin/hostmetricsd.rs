//! hostmetricsd - host metrics collector daemon.
//!
//! Runs one collection pass per interval and logs (or prints as JSON) the
//! resulting metrics.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use hostmetrics::collector::HostCollector;
use hostmetrics::config::HostConfig;
use hostmetrics::storage::Snapshot;
use hostmetrics::storage::Storage;
use hostmetrics::storage::host::{CPU, DISK, LOAD, SWAP};

/// Host metrics collector daemon.
#[derive(Parser)]
#[command(name = "hostmetricsd", about = "Host metrics collector daemon", version)]
struct Args {
    /// JSON settings file. Command line options override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Collection interval in seconds.
    #[arg(short, long)]
    interval: Option<u32>,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long)]
    proc_path: Option<PathBuf>,

    /// Read `df`-formatted disk usage from this file instead of running df.
    #[arg(long, value_name = "PATH")]
    disk_path: Option<PathBuf>,

    /// Print every snapshot as a JSON line on stdout.
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("hostmetricsd={}", level).parse().unwrap())
        .add_directive(format!("hostmetrics={}", level).parse().unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Merges the settings file (if any) with command line overrides.
fn load_config(args: &Args) -> Result<HostConfig, hostmetrics::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => HostConfig::from_file(path)?,
        None => HostConfig::default(),
    };
    if let Some(interval) = args.interval {
        config.interval_secs = interval;
    }
    if let Some(ref proc_path) = args.proc_path {
        config.proc_path = proc_path.clone();
    }
    if let Some(ref disk_path) = args.disk_path {
        config.disk_path = Some(disk_path.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Describes the contents of a snapshot for logging.
fn describe_snapshot(snapshot: &Snapshot) -> String {
    let show = |family: &str, submetric: &str| -> String {
        snapshot
            .get(family, submetric)
            .and_then(|m| m.display.clone())
            .unwrap_or_else(|| "-".to_string())
    };
    let disks = snapshot
        .metrics
        .iter()
        .filter(|m| m.family == DISK && m.current.is_some())
        .count();

    format!(
        "load {}/{}/{}, swap {}, cpu {}, {} disks",
        show(LOAD, "1"),
        show(LOAD, "5"),
        show(LOAD, "15"),
        show(SWAP, ""),
        show(CPU, ""),
        disks
    )
}

fn main() {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    info!("hostmetricsd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, proc={}, disk={}",
        config.interval_secs,
        config.proc_path.display(),
        config
            .disk_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "df".to_string())
    );

    let store = match Storage::host(config.interval_secs) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to build metric store: {}", e);
            std::process::exit(1);
        }
    };
    let mut collector = HostCollector::from_config(&config);

    let interval = Duration::from_secs(u64::from(config.interval_secs));

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    info!("Starting collection loop");
    let mut pass_count: u64 = 0;

    while running.load(Ordering::SeqCst) {
        pass_count += 1;

        match collector.collect_pass(&store) {
            Ok(()) => {
                let snapshot = store.snapshot();
                info!("Pass #{}: {}", pass_count, describe_snapshot(&snapshot));
                if let Some(timing) = collector.last_timing() {
                    debug!("Pass #{} took {:?}", pass_count, timing.total);
                }

                if args.json {
                    match serde_json::to_string(&snapshot) {
                        Ok(line) => println!("{}", line),
                        Err(e) => error!("Failed to serialize snapshot: {}", e),
                    }
                }
            }
            Err(e) => {
                warn!("Collection pass #{} failed: {}", pass_count, e);
            }
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Shutdown complete");
}
