//! darter binary entry point.
//!
//! Wires the CLI surface to the scan pipeline: resolves defaults from the
//! settings file, installs the Ctrl-C handler that raises cancellation, and
//! drives the event stream to the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use darter::cli::{self, Cli};
use darter::config::AppSettings;
use darter::output;
use darter::scanner::{self, ScanEvent, ScanJob};
use darter::types::PortRangeSpec;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match AppSettings::load() {
        Ok(settings) => settings,
        Err(err) => {
            warn!(%err, "could not load settings, using built-in defaults");
            AppSettings::default()
        }
    };

    let range = cli
        .range
        .clone()
        .unwrap_or_else(|| settings.default_range.clone());
    let concurrency = cli.concurrency.unwrap_or(settings.default_concurrency).max(1);
    let timeout = Duration::from_millis(cli.timeout.unwrap_or(settings.default_timeout_ms).max(1));

    if !cli.quiet {
        output::print_banner();
    }

    let targets = match &cli.file {
        Some(path) => cli::read_target_file(path)
            .with_context(|| format!("failed to read target list {}", path.display()))?,
        None => vec![cli.host.clone()],
    };
    if targets.is_empty() {
        return Ok(());
    }

    let ports = PortRangeSpec::new(&range);
    let jobs: Vec<ScanJob> = targets
        .into_iter()
        .map(|target| ScanJob {
            target,
            ports: ports.clone(),
            concurrency,
            timeout,
        })
        .collect();

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        eprintln!("\nInterrupted, stopping scan...");
        signal_cancel.cancel();
    });

    let (events, mut rx) = mpsc::channel(64);
    let scan = tokio::spawn(scanner::run_scan(jobs, events, cancel));

    let mut spinner = None;
    while let Some(event) = rx.recv().await {
        match event {
            ScanEvent::TargetStarted { address } => {
                if !cli.quiet {
                    output::print_target_started(&address, &range);
                }
                if cli.verbose {
                    spinner = Some(output::scan_spinner(&address));
                }
            }
            ScanEvent::PortOpen { outcome, .. } => {
                let line = output::open_port_line(&outcome);
                match &spinner {
                    Some(bar) => bar.println(line),
                    None => println!("{line}"),
                }
            }
            ScanEvent::TargetCompleted { open_ports, .. } => {
                if let Some(bar) = spinner.take() {
                    bar.finish_and_clear();
                }
                if !cli.quiet {
                    output::print_target_completed(open_ports);
                }
            }
        }
    }

    scan.await.context("scan task failed")?;
    Ok(())
}
