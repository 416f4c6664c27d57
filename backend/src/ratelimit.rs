//! Per-client request limiting
//!
//! A fixed-window counter keyed by client address. The limiter is an
//! explicitly-owned value injected through application state, not a global;
//! the core logic behind it stays completely stateless. Expired windows are
//! evicted opportunistically once the map grows past a sweep threshold.

use crate::config::RateLimitConfig;
use axum::{async_trait, extract::ConnectInfo, extract::FromRequestParts, http::request::Parts};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Map size at which a check also sweeps out expired windows
const SWEEP_THRESHOLD: usize = 1024;

struct Window {
    count: u32,
    started: Instant,
}

/// Fixed-window rate limiter keyed by client IP
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_window(
            config.max_requests,
            Duration::from_secs(config.window_secs),
        )
    }

    pub fn with_window(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count a request against the client's current window
    ///
    /// Returns the seconds until the window resets when the client is over
    /// its budget.
    pub fn check(&self, client: IpAddr) -> Result<(), u64> {
        let now = Instant::now();
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if windows.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(client).or_insert(Window {
            count: 0,
            started: now,
        });
        if now.duration_since(entry.started) >= self.window {
            entry.count = 0;
            entry.started = now;
        }

        if entry.count >= self.max_requests {
            let elapsed = now.duration_since(entry.started);
            let retry_after = self.window.saturating_sub(elapsed).as_secs().max(1);
            return Err(retry_after);
        }

        entry.count += 1;
        Ok(())
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Client address extractor
///
/// Prefers the first hop of `x-forwarded-for` (the deployment sits behind a
/// proxy), then the socket peer address, then loopback.
#[derive(Debug, Clone, Copy)]
pub struct ClientIp(pub IpAddr);

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(forwarded) = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
        {
            if let Some(ip) = forwarded
                .split(',')
                .next()
                .and_then(|hop| hop.trim().parse().ok())
            {
                return Ok(ClientIp(ip));
            }
        }

        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(ClientIp(addr.ip()));
        }

        Ok(ClientIp(IpAddr::V4(Ipv4Addr::LOCALHOST)))
    }
}
