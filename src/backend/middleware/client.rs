/**
 * Client Address Extraction
 *
 * Handlers that record who sent or acknowledged a file, and the locality
 * endpoint, need the transport peer and the request headers. The peer comes
 * from `ConnectInfo<SocketAddr>`, which is only present when the server is
 * started with `into_make_service_with_connect_info`; under test harnesses
 * that skip it the peer is simply `None`.
 */

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::convert::Infallible;
use std::net::SocketAddr;

use crate::backend::locality::address::client_ip;

/// Transport peer plus the resolved client IP
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientAddr {
    /// Raw transport peer, when known
    pub peer: Option<SocketAddr>,
    /// `X-Forwarded-For` first value, else `X-Real-IP`, else the peer
    pub ip: String,
}

impl ClientAddr {
    pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self {
            peer,
            ip: client_ip(headers, peer),
        }
    }
}

/// Read the transport peer from request extensions
pub fn peer_addr(parts: &Parts) -> Option<SocketAddr> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::resolve(&parts.headers, peer_addr(parts)))
    }
}
