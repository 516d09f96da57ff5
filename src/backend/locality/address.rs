/**
 * Address Classification Helpers
 *
 * Pure functions over IP addresses and request headers used by the locality
 * classifier and by handlers that record who sent or received a file.
 */

use axum::http::{header, HeaderMap, Uri};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Sentinel used when no client address can be determined
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Multi-value forwarding header
pub const FORWARDED_FOR: &str = "x-forwarded-for";

/// Single-value proxy headers, highest priority first
pub const PROXY_HEADERS: &[&str] = &["x-real-ip", "cf-connecting-ip", "true-client-ip"];

/// Whether `ip` is in a non-globally-routable private block
///
/// IPv4: 10/8, 172.16/12, 192.168/16. IPv6: unique-local fc00::/7.
pub fn is_private(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

/// Whether `ip` is in the shared address space (100.64.0.0/10) used inside
/// CDNs and carrier-grade NAT
pub fn is_cdn_internal(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, ..] = v4.octets();
            a == 100 && (64..=127).contains(&b)
        }
        IpAddr::V6(_) => false,
    }
}

/// Whether two IPv4 addresses agree in their first three octets
pub fn same_subnet_24(a: &IpAddr, b: &IpAddr) -> bool {
    match (a, b) {
        (IpAddr::V4(a), IpAddr::V4(b)) => a.octets()[..3] == b.octets()[..3],
        _ => false,
    }
}

/// Strip an optional port from a `Host` header value
///
/// Handles `name:port`, `1.2.3.4:port`, `[v6]:port`, and bare IPv6 literals.
pub fn strip_port(host: &str) -> &str {
    let host = host.trim();
    if let Some(rest) = host.strip_prefix('[') {
        return rest.split_once(']').map(|(inner, _)| inner).unwrap_or(rest);
    }
    if host.parse::<IpAddr>().is_ok() {
        return host;
    }
    match host.rsplit_once(':') {
        Some((name, _port)) => name,
        None => host,
    }
}

/// Whether the declared host (with or without port) is a literal IP address
pub fn is_ip_literal(host: &str) -> bool {
    strip_port(host).parse::<IpAddr>().is_ok()
}

/// First value of a header as trimmed text
pub fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Host the client addressed: the `Host` header, else the URI authority
/// (HTTP/2 sends `:authority` instead of `Host`), else empty
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    header_value(headers, header::HOST.as_str())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
        .unwrap_or_default()
}

/// Parse an address as it appears in a forwarding header
///
/// Accepts a bare address or a socket address (`1.2.3.4:5678`, `[::1]:80`).
pub fn parse_forwarded(value: &str) -> Option<IpAddr> {
    let value = value.trim();
    value
        .parse::<IpAddr>()
        .ok()
        .or_else(|| value.parse::<SocketAddr>().ok().map(|s| s.ip()))
}

/// Address recorded as a file's sender or receiver
///
/// First `X-Forwarded-For` value, else `X-Real-IP`, else the transport peer,
/// else [`UNKNOWN_CLIENT`].
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(first) = header_value(headers, FORWARDED_FOR)
        .and_then(|v| v.split(',').next())
        .and_then(parse_forwarded)
    {
        return first.to_string();
    }
    if let Some(real) = header_value(headers, "x-real-ip").and_then(parse_forwarded) {
        return real.to_string();
    }
    peer.map(|p| p.ip().to_canonical().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Whether the address is loopback, including IPv4-mapped IPv6 loopback
pub fn is_loopback(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.to_ipv4_mapped().is_some_and(|v4| v4.is_loopback()),
    }
}

/// Usable as a direct server address (IPv4, not loopback or unspecified)
pub fn is_routable_v4(ip: &Ipv4Addr) -> bool {
    !ip.is_loopback() && !ip.is_unspecified() && !ip.is_link_local()
}
