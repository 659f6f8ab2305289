use std::time::Duration;

use axum::{
    response::{IntoResponse, Response},
    Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
    GovernorError, GovernorLayer,
};

use crate::{config::RateLimitConfig, error::ApiError};

const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Limits each client IP to `max_requests` per `window`.
///
/// Clients are keyed on the peer address, so the server must be started with
/// connect info. With `trust_proxy` set, forwarding headers take precedence.
pub fn apply<S>(router: Router<S>, config: &RateLimitConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if !config.is_enabled() {
        return router;
    }

    let replenish_every = config.window / config.max_requests;
    let limited = if config.trust_proxy {
        let Some(governor_conf) = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .period(replenish_every)
            .burst_size(config.max_requests)
            .finish()
        else {
            return unlimited(router, config);
        };
        let limiter = governor_conf.limiter().clone();
        spawn_cleanup(move || limiter.retain_recent());
        router.layer(GovernorLayer::new(governor_conf).error_handler(rate_limit_error))
    } else {
        let Some(governor_conf) = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .period(replenish_every)
            .burst_size(config.max_requests)
            .finish()
        else {
            return unlimited(router, config);
        };
        let limiter = governor_conf.limiter().clone();
        spawn_cleanup(move || limiter.retain_recent());
        router.layer(GovernorLayer::new(governor_conf).error_handler(rate_limit_error))
    };

    tracing::info!(
        "Rate limiting {} requests per {:?} per client (trust proxy: {})",
        config.max_requests,
        config.window,
        config.trust_proxy
    );
    limited
}

fn unlimited<S>(router: Router<S>, config: &RateLimitConfig) -> Router<S> {
    tracing::warn!(
        "Invalid rate limit ({} per {:?}); requests are not limited",
        config.max_requests,
        config.window
    );
    router
}

fn spawn_cleanup(prune: impl Fn() + Send + 'static) {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
                loop {
                    interval.tick().await;
                    prune();
                }
            });
        }
        Err(_) => tracing::debug!("No runtime; rate limiter entries are not pruned"),
    }
}

/// Renders limiter rejections in the API error shape, keeping any headers
/// governor attaches.
fn rate_limit_error(err: GovernorError) -> Response {
    match err {
        GovernorError::TooManyRequests { headers, .. } => {
            let mut response = ApiError::TooManyRequests.into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            ApiError::Internal("Unable to identify the client for rate limiting".to_string())
                .into_response()
        }
        other => ApiError::Internal(other.to_string()).into_response(),
    }
}
