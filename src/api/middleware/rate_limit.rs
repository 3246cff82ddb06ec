//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Applies the public rate limit to a router.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Per client IP. With `behind_proxy`, the IP comes from
/// `X-Forwarded-For` / `X-Real-IP` headers (only correct behind a trusted
/// reverse proxy); otherwise from the socket peer address.
pub fn public(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(smart_layer(2, 100))
    } else {
        router.layer(peer_layer(2, 100))
    }
}

/// Applies the stricter rate limit for authenticated endpoints.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
///
/// Share creation and copying are user-initiated actions; anything faster
/// than this is a stuck client or abuse.
pub fn secure(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(smart_layer(1, 10))
    } else {
        router.layer(peer_layer(1, 10))
    }
}

/// Token bucket keyed by the socket peer address.
fn peer_layer(
    per_second: u64,
    burst_size: u32,
) -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("governor config is valid"),
    );

    GovernorLayer::new(governor_conf)
}

/// Token bucket keyed by forwarded-for headers, falling back to the peer
/// address when absent.
fn smart_layer(
    per_second: u64,
    burst_size: u32,
) -> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(per_second)
            .burst_size(burst_size)
            .finish()
            .expect("governor config is valid"),
    );

    GovernorLayer::new(governor_conf)
}
