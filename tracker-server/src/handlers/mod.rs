//! HTTP handlers, one module per concern.

mod generate;
mod health;
mod pixel;
mod tracking;

pub use generate::generate_pixel;
pub use health::health;
pub use pixel::{pixel_response, serve_pixel};
pub use tracking::{delete_tracking, get_tracking, list_all, remove_self_opens};

use std::net::SocketAddr;

use axum::http::HeaderMap;
use tracker_core::ClientIpSources;

/// Resolves the caller's IP from proxy headers, falling back to the peer address.
pub(crate) fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    ClientIpSources {
        forwarded_for: header_str(headers, "x-forwarded-for"),
        real_ip: header_str(headers, "x-real-ip"),
        peer,
    }
    .resolve()
}

pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("5.5.5.5, 10.0.0.1"));
        headers.insert("x-real-ip", HeaderValue::from_static("7.7.7.7"));
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(client_ip(&headers, Some(peer)), "5.5.5.5");
    }

    #[test]
    fn test_client_ip_uses_peer() {
        let peer: SocketAddr = "192.168.1.20:5000".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), Some(peer)), "192.168.1.20");
        assert_eq!(client_ip(&HeaderMap::new(), None), tracker_core::UNKNOWN);
    }
}
