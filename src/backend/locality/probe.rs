/**
 * Direct-Address Reachability Probe
 *
 * Before recommending that a client switch to the server's LAN address, the
 * classifier checks that the address actually answers. The probe is a trait
 * so tests can substitute a fixed answer.
 */

use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::time::Duration;

/// Checks whether the server answers on a given address
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// `true` when `http://ip:port` responded in time
    async fn probe(&self, ip: Ipv4Addr, port: u16) -> bool;
}

/// Probe that issues `GET /health` with a short timeout
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn probe(&self, ip: Ipv4Addr, port: u16) -> bool {
        let url = format!("http://{}:{}/health", ip, port);
        match self.client.get(&url).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                tracing::debug!("[Locality] Probe {} -> {}", url, response.status());
                ok
            }
            Err(e) => {
                tracing::debug!("[Locality] Probe {} failed: {}", url, e);
                false
            }
        }
    }
}

/// Probe with a predetermined answer
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub bool);

#[async_trait]
impl ReachabilityProbe for FixedProbe {
    async fn probe(&self, _ip: Ipv4Addr, _port: u16) -> bool {
        self.0
    }
}
