//! Port sequence production.
//!
//! Feeds parsed port numbers one at a time into a capacity-1 channel: the
//! producer cannot run ahead of the worker pool's consumption rate, which is
//! what bounds memory for arbitrarily large specs. Every hand-off races
//! cancellation, with cancellation preferred once raised.

use crate::types::{PortBlock, PortRangeSpec};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Spawn the port producer for one target scan.
///
/// Blocks that fail to parse are logged and skipped; an inverted span is
/// silently empty. The returned receiver yields ports in spec order and
/// closes when the spec is exhausted or `cancel` fires.
pub fn produce(spec: &PortRangeSpec, cancel: CancellationToken) -> mpsc::Receiver<u32> {
    let (tx, rx) = mpsc::channel(1);
    let spec = spec.clone();
    tokio::spawn(async move {
        for block in spec.blocks() {
            let block = match PortBlock::parse(block) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(%err, "skipping unparseable range block");
                    continue;
                }
            };
            for port in block.iter() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    sent = tx.send(port) => {
                        if sent.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn drain(mut rx: mpsc::Receiver<u32>) -> Vec<u32> {
        let mut ports = Vec::new();
        while let Some(port) = rx.recv().await {
            ports.push(port);
        }
        ports
    }

    #[tokio::test]
    async fn emits_blocks_in_declared_order() {
        let rx = produce(&"80,443,1000-1002".into(), CancellationToken::new());
        assert_eq!(drain(rx).await, vec![80, 443, 1000, 1001, 1002]);
    }

    #[tokio::test]
    async fn bad_block_is_skipped_not_fatal() {
        let rx = produce(&"abc,22".into(), CancellationToken::new());
        assert_eq!(drain(rx).await, vec![22]);
    }

    #[tokio::test]
    async fn inverted_span_emits_nothing() {
        let rx = produce(&"10-5".into(), CancellationToken::new());
        assert_eq!(drain(rx).await, Vec::<u32>::new());
    }

    #[tokio::test]
    async fn cancellation_stops_production() {
        let cancel = CancellationToken::new();
        let mut rx = produce(&"1-65535".into(), cancel.clone());

        assert_eq!(rx.recv().await, Some(1));
        cancel.cancel();

        // At most the one already-buffered port can still arrive; after that
        // the channel must close rather than keep producing.
        let mut late = 0;
        while rx.recv().await.is_some() {
            late += 1;
        }
        assert!(late <= 1, "producer kept emitting after cancellation");
    }
}
