//! Fixed-window request limiter keyed by client address.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Allows `max_requests` per client in each window. Clones share state.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    windows: Arc<RwLock<HashMap<String, Window>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
    }

    /// Count this request against `key`'s window and report whether it may
    /// proceed.
    pub async fn is_allowed(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.write().await;

        // Drop windows that have closed.
        windows.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });
        if window.count >= self.max_requests {
            warn!(client = key, limit = self.max_requests, "rate limit exceeded");
            return false;
        }
        window.count += 1;
        debug!(client = key, count = window.count, "request admitted");
        true
    }

    /// Whole seconds until `key`'s window reopens; at least 1 while limited.
    pub async fn retry_after(&self, key: &str) -> u64 {
        let windows = self.windows.read().await;
        let Some(window) = windows.get(key) else {
            return 0;
        };
        let remaining = self.window.saturating_sub(window.started.elapsed());
        if remaining.is_zero() {
            0
        } else {
            remaining.as_secs_f64().ceil().max(1.0) as u64
        }
    }
}
