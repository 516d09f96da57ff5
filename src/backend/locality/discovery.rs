/**
 * Server Address Discovery
 *
 * Finds the IPv4 address other devices on the LAN should use to reach this
 * server. Discovery is an ordered chain of [`AddressStrategy`]
 * implementations; the first one that yields an address wins:
 *
 * 1. [`OutboundDial`] - connect a UDP socket toward a public address (no
 *    packet is sent) and read the local endpoint; accepted only when private
 * 2. [`InterfaceScan`] - enumerate interfaces, preferring 192.168, then 10,
 *    then 172.16-31, then any other non-loopback address
 * 3. [`ShellTools`] - `hostname -I`, then `ip route get` (Linux only)
 *
 * When every strategy fails the result is loopback, flagged as degraded.
 *
 * Strategies do blocking I/O; async callers go through
 * `tokio::task::spawn_blocking`.
 */

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use crate::backend::locality::address::is_private;

/// One way of finding the server's LAN address
pub trait AddressStrategy: Send + Sync {
    /// Short label used in logs and in [`ServerAddress::source`]
    fn name(&self) -> &'static str;

    /// Attempt discovery; `None` passes to the next strategy
    fn discover(&self) -> Option<Ipv4Addr>;
}

/// Result of running the strategy chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerAddress {
    pub ip: Ipv4Addr,
    /// Name of the strategy that produced `ip`
    pub source: &'static str,
    /// True when no strategy succeeded and `ip` is loopback
    pub degraded: bool,
}

impl ServerAddress {
    pub const LOOPBACK_SOURCE: &'static str = "loopback-fallback";

    fn fallback() -> Self {
        Self {
            ip: Ipv4Addr::LOCALHOST,
            source: Self::LOOPBACK_SOURCE,
            degraded: true,
        }
    }
}

/// Ordered, first-success-wins strategy chain
pub struct AddressDiscovery {
    strategies: Vec<Box<dyn AddressStrategy>>,
}

impl std::fmt::Debug for AddressDiscovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("AddressDiscovery").field("strategies", &names).finish()
    }
}

impl AddressDiscovery {
    /// The production chain: outbound dial, interface scan, shell tools
    pub fn standard(dial_target: impl Into<String>) -> Self {
        Self::with_strategies(vec![
            Box::new(OutboundDial::new(dial_target)),
            Box::new(InterfaceScan),
            Box::new(ShellTools),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn AddressStrategy>>) -> Self {
        Self { strategies }
    }

    /// Run the chain
    pub fn discover(&self) -> ServerAddress {
        for strategy in &self.strategies {
            if let Some(ip) = strategy.discover() {
                tracing::debug!("[Locality] {} found server address {}", strategy.name(), ip);
                return ServerAddress {
                    ip,
                    source: strategy.name(),
                    degraded: false,
                };
            }
            tracing::debug!("[Locality] {} found nothing", strategy.name());
        }
        tracing::warn!("[Locality] Could not determine a LAN address, using loopback");
        ServerAddress::fallback()
    }
}

/// Learn the outbound interface by connecting a UDP socket
#[derive(Debug, Clone)]
pub struct OutboundDial {
    target: String,
}

impl OutboundDial {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl AddressStrategy for OutboundDial {
    fn name(&self) -> &'static str {
        "outbound-dial"
    }

    fn discover(&self) -> Option<Ipv4Addr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
        socket.connect(self.target.as_str()).ok()?;
        match socket.local_addr().ok()?.ip() {
            IpAddr::V4(ip) if is_private(&IpAddr::V4(ip)) => Some(ip),
            _ => None,
        }
    }
}

/// Pick a LAN address from the host's interfaces
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceScan;

impl AddressStrategy for InterfaceScan {
    fn name(&self) -> &'static str {
        "interface-scan"
    }

    fn discover(&self) -> Option<Ipv4Addr> {
        pick_preferred(&interface_addresses())
    }
}

/// Parse the output of OS networking tools
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellTools;

impl AddressStrategy for ShellTools {
    fn name(&self) -> &'static str {
        "shell-tools"
    }

    #[cfg(target_os = "linux")]
    fn discover(&self) -> Option<Ipv4Addr> {
        run_tool("hostname", &["-I"])
            .as_deref()
            .and_then(parse_hostname_output)
            .or_else(|| {
                run_tool("ip", &["route", "get", "8.8.8.8"])
                    .as_deref()
                    .and_then(parse_ip_route_output)
            })
    }

    #[cfg(not(target_os = "linux"))]
    fn discover(&self) -> Option<Ipv4Addr> {
        None
    }
}

#[cfg(target_os = "linux")]
fn run_tool(program: &str, args: &[&str]) -> Option<String> {
    let output = std::process::Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

/// Choose the preferred LAN address among `candidates`
///
/// 192.168/16 beats 10/8 beats 172.16/12 beats any other non-loopback,
/// non-unspecified address. Order within a tier is preserved.
pub fn pick_preferred(candidates: &[Ipv4Addr]) -> Option<Ipv4Addr> {
    let usable = || {
        candidates
            .iter()
            .copied()
            .filter(|ip| !ip.is_loopback() && !ip.is_unspecified())
    };
    let tiers: [fn(&Ipv4Addr) -> bool; 4] = [
        |ip| ip.octets()[..2] == [192, 168],
        |ip| ip.octets()[0] == 10,
        |ip| ip.octets()[0] == 172 && (16..=31).contains(&ip.octets()[1]),
        |_| true,
    ];
    tiers
        .iter()
        .find_map(|tier| usable().find(|ip| tier(ip)))
}

/// First non-loopback IPv4 address in `hostname -I` output
pub fn parse_hostname_output(output: &str) -> Option<Ipv4Addr> {
    output
        .split_whitespace()
        .filter_map(|field| field.parse::<Ipv4Addr>().ok())
        .find(|ip| !ip.is_loopback())
}

/// The `src` address in `ip route get` output
pub fn parse_ip_route_output(output: &str) -> Option<Ipv4Addr> {
    output.lines().find_map(|line| {
        let mut fields = line.split_whitespace();
        fields.by_ref().find(|field| *field == "src")?;
        fields
            .next()?
            .parse::<Ipv4Addr>()
            .ok()
            .filter(|ip| !ip.is_loopback())
    })
}

/// IPv4 addresses of every local interface
pub fn interface_addresses() -> Vec<Ipv4Addr> {
    match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces
            .into_iter()
            .filter_map(|iface| match iface.ip() {
                IpAddr::V4(ip) => Some(ip),
                IpAddr::V6(_) => None,
            })
            .collect(),
        Err(e) => {
            tracing::debug!("[Locality] Interface enumeration failed: {}", e);
            Vec::new()
        }
    }
}
