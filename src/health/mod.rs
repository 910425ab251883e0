//! Pre-flight availability probing
//!
//! A probe is a plain TCP connect followed by an immediate close. No data is
//! exchanged, so the probe never authenticates and never reaches the RCON
//! handler. The result is advisory: the server may go away between the probe
//! and the session, and the session handles that on its own.

mod types;

pub use types::ProbeStatus;

use crate::types::{HostName, Port, ProbeTimeout};
use async_trait::async_trait;
use std::time::Instant;
use tokio::net::TcpStream;
use tokio::time;
use tracing::debug;

/// Availability check seam used by the whitelist client
///
/// The TCP implementation is [`TcpProber`]; tests substitute their own.
#[async_trait]
pub trait AvailabilityCheck: Send + Sync + std::fmt::Debug {
    /// Probe `host:port` and report what happened
    async fn check(&self, host: &HostName, port: Port) -> ProbeStatus;

    /// Probe `host:port`; `true` iff a TCP connection was accepted
    async fn probe(&self, host: &HostName, port: Port) -> bool {
        self.check(host, port).await.is_available()
    }
}

/// TCP connect prober with a bounded wait
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber {
    timeout: ProbeTimeout,
}

impl TcpProber {
    /// Create a prober with the given connect bound
    #[must_use]
    pub const fn new(timeout: ProbeTimeout) -> Self {
        Self { timeout }
    }

    /// Connect bound used by this prober
    #[must_use]
    pub const fn timeout(&self) -> ProbeTimeout {
        self.timeout
    }
}

#[async_trait]
impl AvailabilityCheck for TcpProber {
    async fn check(&self, host: &HostName, port: Port) -> ProbeStatus {
        let started = Instant::now();
        let connect = TcpStream::connect((host.as_str(), port.get()));

        let status = match time::timeout(self.timeout.as_duration(), connect).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeStatus::Reachable {
                    elapsed: started.elapsed(),
                }
            }
            Ok(Err(e)) => {
                debug!("Probe of {}:{} failed: {}", host, port, e);
                ProbeStatus::Refused
            }
            Err(_) => ProbeStatus::TimedOut,
        };

        debug!("Probe of {}:{}: {}", host, port, status);
        status
    }
}

/// Probe `host:port` once with the given bound
pub async fn probe(host: &HostName, port: Port, timeout: ProbeTimeout) -> bool {
    TcpProber::new(timeout).probe(host, port).await
}
