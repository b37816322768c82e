//! Client IP resolution.
//!
//! Deployments terminating TLS at a reverse proxy see the proxy's address
//! as the socket peer; the originating client is carried in forwarding
//! headers instead. Resolution order behind a proxy: X-Forwarded-For,
//! X-Real-IP, then the peer address.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Resolve the source identity of a request
pub fn resolve_client_ip(headers: &HeaderMap, peer: IpAddr, behind_proxy: bool) -> IpAddr {
	if behind_proxy {
		extract_from_xff(headers)
			.or_else(|| extract_from_x_real_ip(headers))
			.unwrap_or(peer)
	} else {
		peer
	}
}

/// Extract IP from X-Forwarded-For header
fn extract_from_xff(headers: &HeaderMap) -> Option<IpAddr> {
	headers.get("x-forwarded-for").and_then(|h| h.to_str().ok()).and_then(|s| {
		// X-Forwarded-For can contain multiple IPs: "client, proxy1, proxy2"
		// Take the first (leftmost) IP as the original client
		s.split(',').next().map(|ip| ip.trim()).and_then(|ip| ip.parse().ok())
	})
}

/// Extract IP from X-Real-IP header
fn extract_from_x_real_ip(headers: &HeaderMap) -> Option<IpAddr> {
	headers.get("x-real-ip").and_then(|h| h.to_str().ok()).and_then(|s| s.trim().parse().ok())
}


// vim: ts=4
