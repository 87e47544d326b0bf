//! Per-IP rate limiting middleware
//!
//! A best-effort perimeter guard, not a core concern: a fixed-window
//! token bucket per client IP, 100 req/s with a burst of 200, held in a
//! single process-local map. No cross-process sharing, no persistence of
//! bucket state: restarting the service resets every client's budget.

use crate::error::ApiError;
use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Instant;

const REFILL_PER_SECOND: f64 = 100.0;
const BURST: f64 = 200.0;

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn new() -> Self {
        Self {
            tokens: BURST,
            last_refill: Instant::now(),
        }
    }

    fn try_take(&mut self) -> bool {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * REFILL_PER_SECOND).min(BURST);
        self.last_refill = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

/// Process-local per-IP bucket store.
pub struct RateLimiter {
    buckets: parking_lot::Mutex<HashMap<IpAddr, Bucket>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            buckets: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    fn allow(&self, ip: IpAddr) -> bool {
        let mut buckets = self.buckets.lock();
        buckets.entry(ip).or_insert_with(Bucket::new).try_take()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !limiter.allow(addr.ip()) {
        log::warn!("429 rate_limit_exceeded: {}", addr.ip());
        return Err(ApiError::rate_limit_exceeded());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_allows_up_to_burst_then_denies() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        let mut allowed = 0;
        for _ in 0..(BURST as usize + 10) {
            if limiter.allow(ip) {
                allowed += 1;
            }
        }

        assert_eq!(allowed, BURST as usize);
    }

    #[test]
    fn distinct_ips_have_independent_buckets() {
        let limiter = RateLimiter::new();
        let a: IpAddr = "127.0.0.1".parse().unwrap();
        let b: IpAddr = "127.0.0.2".parse().unwrap();

        for _ in 0..(BURST as usize) {
            assert!(limiter.allow(a));
        }
        assert!(!limiter.allow(a));
        assert!(limiter.allow(b));
    }
}
