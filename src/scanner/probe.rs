//! Connect probes.
//!
//! A probe is one bounded-time TCP connection attempt against a single
//! `address:port`, used purely as a reachability test. Success means
//! something completed the handshake; every failure mode (refused, timeout,
//! unreachable, resolution failure, unrepresentable port) collapses into
//! `Closed`.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Observed state of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    /// Something accepted a TCP connection.
    Open,
    /// The connection attempt failed, for whatever reason.
    Closed,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    pub port: u32,
    pub state: PortState,
}

/// A single-port reachability check.
///
/// The worker pool depends only on this trait, so tests can substitute an
/// instrumented prober.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, port: u32) -> ProbeOutcome;
}

/// TCP connect prober.
///
/// Each attempt owns its socket for the duration of the probe and drops it
/// before reporting. Hostname resolution happens inside the connect and is
/// covered by the same timeout.
pub struct TcpProbe {
    host: String,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    /// Format `host:port`, bracketing IPv6 literals.
    fn endpoint(&self, port: u32) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", self.host, port)
        } else {
            format!("{}:{}", self.host, port)
        }
    }
}

#[async_trait]
impl Probe for TcpProbe {
    async fn probe(&self, port: u32) -> ProbeOutcome {
        let state = match timeout(self.timeout, TcpStream::connect(self.endpoint(port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                PortState::Open
            }
            Ok(Err(_)) | Err(_) => PortState::Closed,
        };
        ProbeOutcome { port, state }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn endpoint_formatting() {
        let probe = TcpProbe::new("10.0.0.1", Duration::from_secs(1));
        assert_eq!(probe.endpoint(80), "10.0.0.1:80");

        let probe = TcpProbe::new("example.com", Duration::from_secs(1));
        assert_eq!(probe.endpoint(443), "example.com:443");

        let probe = TcpProbe::new("::1", Duration::from_secs(1));
        assert_eq!(probe.endpoint(22), "[::1]:22");
    }

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = u32::from(listener.local_addr().unwrap().port());

        let probe = TcpProbe::new("127.0.0.1", Duration::from_secs(1));
        let outcome = probe.probe(port).await;

        assert_eq!(outcome, ProbeOutcome { port, state: PortState::Open });
    }

    #[tokio::test]
    async fn refused_port_is_closed() {
        // Bind and immediately drop to get a port with nothing listening.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            u32::from(listener.local_addr().unwrap().port())
        };

        let probe = TcpProbe::new("127.0.0.1", Duration::from_secs(1));
        let outcome = probe.probe(port).await;

        assert_eq!(outcome.state, PortState::Closed);
    }

    #[tokio::test]
    async fn unreachable_host_is_closed_within_the_timeout() {
        // 10.255.255.1 either blackholes (timeout) or errors fast; both
        // collapse to Closed without exceeding the configured bound by much.
        let probe = TcpProbe::new("10.255.255.1", Duration::from_millis(200));
        let start = Instant::now();
        let outcome = probe.probe(80).await;

        assert_eq!(outcome.state, PortState::Closed);
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn unrepresentable_port_is_closed() {
        let probe = TcpProbe::new("127.0.0.1", Duration::from_secs(1));
        let outcome = probe.probe(70000).await;

        assert_eq!(outcome.state, PortState::Closed);
    }
}
