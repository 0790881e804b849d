//! Best-effort client identifier used to key rate limits and cooldowns.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

/// Value used when no header or peer address identifies the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Client identifier derived from, in order: the first `X-Forwarded-For`
/// entry, `X-Real-IP`, the peer address, or [`UNKNOWN_CLIENT`].
///
/// The headers are client-controlled, so the key is trivially spoofable
/// when the server is not behind a proxy that overwrites them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientKey(pub String);

impl ClientKey {
    pub fn from_http_request(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let forwarded = header("x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let key = forwarded
            .or_else(|| header("x-real-ip"))
            .map(str::to_owned)
            .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

        ClientKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for ClientKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_http_request(req)))
    }
}
