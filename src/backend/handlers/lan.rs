/**
 * LAN Detection Handlers
 *
 * - `GET /api/lan-check` - the full `LocalitySignal` plus the raw proxy
 *   headers it was derived from
 * - `GET /api/server-info` - the URL a share code should carry and whether
 *   the visitor came in over a literal IP
 */

use axum::{
    extract::State,
    http::{header, HeaderMap, Uri},
    response::Json,
};

use crate::backend::handlers::types::{HeaderEcho, LanCheckResponse, ServerInfoResponse};
use crate::backend::locality::address::{header_value, is_ip_literal, request_host};
use crate::backend::locality::{LocalityRequest, LocalityService};
use crate::backend::middleware::ClientAddr;

fn owned(headers: &HeaderMap, name: &str) -> Option<String> {
    header_value(headers, name).map(str::to_string)
}

/// Classify the caller's network position
pub async fn lan_check(
    State(locality): State<LocalityService>,
    client: ClientAddr,
    uri: Uri,
    headers: HeaderMap,
) -> Json<LanCheckResponse> {
    let request = LocalityRequest::from_headers(&headers, &uri, client.peer);
    let signal = locality.classify(&request).await;

    Json(LanCheckResponse {
        success: true,
        current_host: request.host,
        signal,
        user_agent: owned(&headers, header::USER_AGENT.as_str()).unwrap_or_default(),
        referrer: owned(&headers, header::REFERER.as_str()).unwrap_or_default(),
        headers: HeaderEcho {
            x_forwarded_for: owned(&headers, "x-forwarded-for"),
            x_real_ip: owned(&headers, "x-real-ip"),
            cf_connecting_ip: owned(&headers, "cf-connecting-ip"),
            true_client_ip: owned(&headers, "true-client-ip"),
        },
    })
}

/// Share-code payload for the current visitor
///
/// Literal-IP visits are served over plain HTTP on the LAN; named visits
/// are assumed to come through an HTTPS front end.
pub async fn server_info(
    State(locality): State<LocalityService>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<ServerInfoResponse> {
    let server = locality.server_address().await;
    let lan_url = format!("http://{}:{}", server.ip, locality.port());

    let host = request_host(&headers, &uri);
    let host = host.as_str();
    let is_ip_access = host.is_empty() || is_ip_literal(host);
    let server_url = match (host.is_empty(), is_ip_access) {
        (true, _) => lan_url.clone(),
        (false, true) => format!("http://{}", host),
        (false, false) => format!("https://{}", host),
    };

    Json(ServerInfoResponse {
        server_url,
        network_type: if is_ip_access { "LAN" } else { "WAN" }.to_string(),
        is_ip_access,
        lan_url,
    })
}
