//! Bounded probe worker pool.
//!
//! Exactly `concurrency` workers share one consumption point over the port
//! sequence, so the in-flight probe count is a hard invariant rather than an
//! emergent property of scheduler timing. The outcome channel closes only
//! once every worker has exited, which guarantees no outcome is lost and no
//! task outlives the pool.

use crate::scanner::probe::{Probe, ProbeOutcome};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

/// Spawn `concurrency` probe workers over `ports`.
///
/// Returns the outcome stream and a handle that resolves once every worker
/// has exited. Outcomes arrive in completion order, not port order; one
/// outcome is produced per consumed port, no retries.
pub fn run(
    prober: Arc<dyn Probe>,
    ports: mpsc::Receiver<u32>,
    concurrency: usize,
    cancel: CancellationToken,
) -> (mpsc::Receiver<ProbeOutcome>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(1);
    let ports = Arc::new(Mutex::new(ports));

    let mut workers = JoinSet::new();
    for _ in 0..concurrency {
        let prober = Arc::clone(&prober);
        let ports = Arc::clone(&ports);
        let tx = tx.clone();
        let cancel = cancel.clone();
        workers.spawn(async move {
            loop {
                // Hold the lock only for the claim so the other workers stay
                // free to probe. A worker mid-probe is not interrupted; it
                // observes cancellation at the next hand-off.
                let claimed = {
                    let mut ports = ports.lock().await;
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => None,
                        port = ports.recv() => port,
                    }
                };
                let Some(port) = claimed else { break };

                let outcome = prober.probe(port).await;

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    sent = tx.send(outcome) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }
    // Workers hold the only senders; the outcome channel closes when the
    // last of them exits.
    drop(tx);

    let drained = tokio::spawn(async move { while workers.join_next().await.is_some() {} });
    (rx, drained)
}
