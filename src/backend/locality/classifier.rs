/**
 * Locality Classifier
 *
 * Decides whether a client reached the server through a name (a domain,
 * usually via a proxy or tunnel) while sitting on the same network, in which
 * case the UI offers to switch to the faster direct LAN address.
 *
 * # Stages
 *
 * 1. Server address discovery ([`AddressDiscovery`])
 * 2. Access mode: a literal IP in `Host` is direct access, anything else is
 *    named access
 * 3. Client address: forwarding headers, then proxy headers, then the
 *    transport peer. Loopback, the server's own address and CDN-internal
 *    addresses are discarded; a private survivor beats a public one
 * 4. Same network: the client is private, or access is by name, or the
 *    client and server share their first three octets
 * 5. Prompt: named access on the same network, with a real LAN server
 *    address. A loopback fallback never prompts, whatever the probe says,
 *    and is never probed. A failed probe still prompts, since firewalls
 *    often block the probe itself
 *
 * Named access counts as same-network unconditionally: a proxy can hide the
 * real client address, and an unneeded prompt costs less than a missed one.
 *
 * Stages 2-5 are pure functions over a [`LocalityRequest`]; only discovery
 * and the probe touch the network.
 */

use axum::http::{HeaderMap, Uri};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use crate::backend::locality::address::{
    header_value, is_cdn_internal, is_ip_literal, is_loopback, is_private, is_routable_v4,
    parse_forwarded, request_host, same_subnet_24, FORWARDED_FOR, PROXY_HEADERS, UNKNOWN_CLIENT,
};
use crate::backend::locality::discovery::{AddressDiscovery, ServerAddress};
use crate::backend::locality::probe::ReachabilityProbe;

/// Request facts the classifier looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalityRequest {
    /// Host as addressed by the client, port included
    pub host: String,
    /// Raw `X-Forwarded-For` value
    pub forwarded_for: Option<String>,
    /// Single-value proxy headers in priority order, as `(name, value)`
    pub proxy_headers: Vec<(&'static str, String)>,
    /// Transport-level peer
    pub peer: Option<SocketAddr>,
}

impl LocalityRequest {
    pub fn from_headers(headers: &HeaderMap, uri: &Uri, peer: Option<SocketAddr>) -> Self {
        Self {
            host: request_host(headers, uri),
            forwarded_for: header_value(headers, FORWARDED_FOR).map(str::to_string),
            proxy_headers: PROXY_HEADERS
                .iter()
                .filter_map(|name| header_value(headers, name).map(|v| (*name, v.to_string())))
                .collect(),
            peer,
        }
    }

    /// Every parseable candidate address, highest priority first
    ///
    /// IPv4-mapped IPv6 addresses (a dual-stack listener's view of an IPv4
    /// peer) come back as plain IPv4.
    pub fn candidates(&self) -> Vec<IpAddr> {
        let forwarded = self
            .forwarded_for
            .iter()
            .flat_map(|value| value.split(','))
            .filter_map(parse_forwarded);
        let proxied = self
            .proxy_headers
            .iter()
            .filter_map(|(_, value)| parse_forwarded(value));
        let peer = self.peer.map(|p| p.ip());
        forwarded
            .chain(proxied)
            .chain(peer)
            .map(|ip| ip.to_canonical())
            .collect()
    }
}

/// Per-request locality judgment
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocalitySignal {
    #[serde(rename = "client_ip")]
    pub client_address: String,
    #[serde(rename = "local_ip")]
    pub server_address: String,
    #[serde(rename = "is_ip_access")]
    pub is_direct_address_access: bool,
    #[serde(rename = "is_client_in_lan")]
    pub is_client_same_network: bool,
    #[serde(rename = "need_switch_prompt")]
    pub should_prompt_switch: bool,
    /// `http://<server>:<port>`
    pub lan_url: String,
    /// Probe result, when a probe was needed
    pub probe_reachable: Option<bool>,
    /// Server address is the loopback fallback
    pub server_address_degraded: bool,
}

/// Chosen client address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress {
    /// Address as reported
    pub text: String,
    /// Parsed form, absent for the unknown sentinel
    pub ip: Option<IpAddr>,
}

/// Stage 3: pick the most plausible client address
pub fn select_client_address(request: &LocalityRequest, server: Ipv4Addr) -> ClientAddress {
    let server = IpAddr::V4(server);
    let kept: Vec<IpAddr> = request
        .candidates()
        .into_iter()
        .filter(|ip| !is_loopback(ip) && *ip != server && !is_cdn_internal(ip) && !ip.is_unspecified())
        .collect();

    let chosen = kept
        .iter()
        .find(|ip| is_private(ip))
        .or_else(|| kept.first())
        .copied()
        .or_else(|| request.peer.map(|p| p.ip().to_canonical()));

    match chosen {
        Some(ip) => ClientAddress {
            text: ip.to_string(),
            ip: Some(ip),
        },
        None => ClientAddress {
            text: UNKNOWN_CLIENT.to_string(),
            ip: None,
        },
    }
}

/// Stage 4
pub fn judge_same_network(client: Option<IpAddr>, server: Ipv4Addr, named_access: bool) -> bool {
    if named_access {
        return true;
    }
    match client {
        Some(ip) => is_private(&ip) || same_subnet_24(&ip, &IpAddr::V4(server)),
        None => false,
    }
}

/// Stage 5
///
/// The probe outcome is reported alongside but cannot veto the prompt; only
/// a loopback fallback address can.
pub fn decide_prompt(named_access: bool, same_network: bool, server: &ServerAddress) -> bool {
    named_access && same_network && !server.degraded && is_routable_v4(&server.ip)
}

/// Whether stage 5 probes the server address
pub fn needs_probe(named_access: bool, same_network: bool, server: &ServerAddress) -> bool {
    decide_prompt(named_access, same_network, server)
}

/// Stages 2-5 with a known server address and probe outcome
pub fn classify(
    request: &LocalityRequest,
    server: &ServerAddress,
    port: u16,
    probe_reachable: Option<bool>,
) -> LocalitySignal {
    let direct = is_ip_literal(&request.host);
    let client = select_client_address(request, server.ip);
    let same_network = judge_same_network(client.ip, server.ip, !direct);
    let prompt = decide_prompt(!direct, same_network, server);

    LocalitySignal {
        client_address: client.text,
        server_address: server.ip.to_string(),
        is_direct_address_access: direct,
        is_client_same_network: same_network,
        should_prompt_switch: prompt,
        lan_url: format!("http://{}:{}", server.ip, port),
        probe_reachable,
        server_address_degraded: server.degraded,
    }
}

/// Discovery plus probe, wired for request handling
#[derive(Clone)]
pub struct LocalityService {
    discovery: Arc<AddressDiscovery>,
    probe: Arc<dyn ReachabilityProbe>,
    port: u16,
}

impl std::fmt::Debug for LocalityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalityService")
            .field("discovery", &self.discovery)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl LocalityService {
    pub fn new(discovery: AddressDiscovery, probe: Arc<dyn ReachabilityProbe>, port: u16) -> Self {
        Self {
            discovery: Arc::new(discovery),
            probe,
            port,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run discovery off the async runtime
    pub async fn server_address(&self) -> ServerAddress {
        let discovery = Arc::clone(&self.discovery);
        match tokio::task::spawn_blocking(move || discovery.discover()).await {
            Ok(address) => address,
            Err(e) => {
                tracing::error!("[Locality] Discovery task failed: {}", e);
                ServerAddress {
                    ip: Ipv4Addr::LOCALHOST,
                    source: ServerAddress::LOOPBACK_SOURCE,
                    degraded: true,
                }
            }
        }
    }

    /// Full classification for one request
    pub async fn classify(&self, request: &LocalityRequest) -> LocalitySignal {
        let server = self.server_address().await;
        let direct = is_ip_literal(&request.host);
        let client = select_client_address(request, server.ip);
        let same_network = judge_same_network(client.ip, server.ip, !direct);

        let probe_reachable = if needs_probe(!direct, same_network, &server) {
            Some(self.probe.probe(server.ip, self.port).await)
        } else {
            None
        };

        let signal = classify(request, &server, self.port, probe_reachable);
        tracing::info!(
            "[Locality] host={} client={} direct={} same_network={} prompt={}",
            request.host,
            signal.client_address,
            signal.is_direct_address_access,
            signal.is_client_same_network,
            signal.should_prompt_switch
        );
        signal
    }
}
