//! Client IP resolution and the self-open rule.
//!
//! The resolved IP is a plain string; it is compared verbatim against the
//! sender IP captured when the pixel was generated. There is no subnet or NAT
//! awareness, so senders behind a shared address show up as self-opens and
//! senders whose address changed show up as recipient opens.

use std::net::SocketAddr;

/// Sentinel stored when no IP (or user agent) could be determined.
pub const UNKNOWN: &str = "unknown";

/// Returns the first entry of a proxy chain (`client, proxy1, proxy2`), trimmed.
pub fn first_forwarded(value: &str) -> Option<String> {
    value
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Every place an originating IP can come from, in priority order.
#[derive(Debug, Clone, Default)]
pub struct ClientIpSources<'a> {
    /// Raw `X-Forwarded-For` header value.
    pub forwarded_for: Option<&'a str>,
    /// Raw `X-Real-IP` header value.
    pub real_ip: Option<&'a str>,
    /// Transport-level peer address.
    pub peer: Option<SocketAddr>,
}

impl ClientIpSources<'_> {
    /// Resolves `X-Forwarded-For` (first entry) → `X-Real-IP` → peer → [`UNKNOWN`].
    ///
    /// Blank header values fall through to the next source.
    pub fn resolve(&self) -> String {
        self.forwarded_for
            .and_then(first_forwarded)
            .or_else(|| self.real_ip.and_then(first_forwarded))
            .or_else(|| self.peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Maps the [`UNKNOWN`] sentinel to `None`.
pub fn known_ip(ip: &str) -> Option<String> {
    if ip.is_empty() || ip == UNKNOWN {
        None
    } else {
        Some(ip.to_string())
    }
}

/// True iff the sender IP is known and equals the fetching IP exactly.
pub fn is_self_open(sender_ip: Option<&str>, ip: &str) -> bool {
    match sender_ip {
        Some(sender) if sender != UNKNOWN => sender == ip,
        _ => false,
    }
}
