//! Scan pipeline coordination.
//!
//! Wires the producer, worker pool, and aggregator together and owns the
//! sequencing rules: targets run strictly one after another, while
//! production, probing, and aggregation overlap within a target. A single
//! cancellation token is shared by every stage of an invocation.

pub mod pool;
pub mod probe;
pub mod producer;

pub use probe::{PortState, Probe, ProbeOutcome, TcpProbe};

use crate::types::{expand, PortRangeSpec};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// The unit of work for one target token.
#[derive(Debug, Clone)]
pub struct ScanJob {
    /// Host, IP literal, or CIDR block.
    pub target: String,
    /// Ports to probe, in spec order.
    pub ports: PortRangeSpec,
    /// Number of concurrent probe workers.
    pub concurrency: usize,
    /// Per-probe connect timeout.
    pub timeout: Duration,
}

/// Progress events emitted while a scan runs.
///
/// Per address the stream is a `TargetStarted` marker, the open ports in
/// completion order, then a `TargetCompleted` marker. Closed ports are never
/// reported.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum ScanEvent {
    TargetStarted {
        address: String,
    },
    PortOpen {
        address: String,
        outcome: ProbeOutcome,
    },
    TargetCompleted {
        address: String,
        open_ports: usize,
    },
}

/// Run a sequence of scan jobs to completion or cancellation.
///
/// Targets are scanned in arrival order with no overlap between them, so the
/// concurrency bound of the job at hand is also the system-wide bound.
/// Cancellation short-circuits whatever remains; results already delivered
/// through `events` stay valid.
pub async fn run_scan(
    jobs: Vec<ScanJob>,
    events: mpsc::Sender<ScanEvent>,
    cancel: CancellationToken,
) {
    for job in jobs {
        if cancel.is_cancelled() {
            break;
        }
        scan_target(&job, &events, &cancel).await;
    }
}

/// Scan every address a single target token expands to.
async fn scan_target(job: &ScanJob, events: &mpsc::Sender<ScanEvent>, cancel: &CancellationToken) {
    for address in expand(&job.target) {
        if cancel.is_cancelled() {
            break;
        }
        scan_address(job, address, events, cancel).await;
    }
}

/// One full producer -> pool -> aggregator pipeline for one address.
async fn scan_address(
    job: &ScanJob,
    address: String,
    events: &mpsc::Sender<ScanEvent>,
    cancel: &CancellationToken,
) {
    debug!(%address, range = %job.ports, "scanning");

    let ports = producer::produce(&job.ports, cancel.clone());
    let prober: Arc<dyn Probe> = Arc::new(TcpProbe::new(address.clone(), job.timeout));
    let (outcomes, workers) = pool::run(prober, ports, job.concurrency, cancel.clone());

    collect(outcomes, events, address).await;

    // The outcome stream has closed, so every worker is already on its way
    // out; joining here keeps the task set bounded per address.
    let _ = workers.await;
}

/// Filter-and-forward aggregation for one address.
///
/// Brackets the open-port stream with start/completion markers regardless of
/// how many ports were open. Closed outcomes are discarded, not counted.
async fn collect(
    mut outcomes: mpsc::Receiver<ProbeOutcome>,
    events: &mpsc::Sender<ScanEvent>,
    address: String,
) {
    let _ = events
        .send(ScanEvent::TargetStarted {
            address: address.clone(),
        })
        .await;

    let mut open_ports = 0;
    while let Some(outcome) = outcomes.recv().await {
        if outcome.state == PortState::Open {
            open_ports += 1;
            let _ = events
                .send(ScanEvent::PortOpen {
                    address: address.clone(),
                    outcome,
                })
                .await;
        }
    }

    let _ = events
        .send(ScanEvent::TargetCompleted { address, open_ports })
        .await;
}
