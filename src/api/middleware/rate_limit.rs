//! Rate limiting middleware using token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Sustained request rate per client IP.
const PER_SECOND: u64 = 2;
/// Requests a client may make in a burst before being throttled.
const BURST_SIZE: u32 = 50;

/// Applies per-IP rate limiting to the given routes.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 50 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. This mainly
/// slows down password guessing against `POST /login`.
///
/// # Key Extraction
///
/// - `behind_proxy = false`: the socket peer address
/// - `behind_proxy = true`: `X-Forwarded-For` / `X-Real-IP` / `Forwarded`,
///   falling back to the peer address
///
/// The peer address requires serving with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn apply(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(GovernorLayer::new(config(SmartIpKeyExtractor)))
    } else {
        router.layer(GovernorLayer::new(config(PeerIpKeyExtractor)))
    }
}

fn config<K: KeyExtractor>(key_extractor: K) -> Arc<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>> {
    let mut builder = GovernorConfigBuilder::default().key_extractor(key_extractor);
    builder.per_second(PER_SECOND).burst_size(BURST_SIZE);

    Arc::new(
        builder
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    )
}
