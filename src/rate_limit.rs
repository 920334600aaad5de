use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::error::AppError;
use crate::AppState;

const WINDOW_SECS: u64 = 60;
const CLEANUP_INTERVAL_SECS: u64 = 300;

/// Fixed-window request counter per key, held in process memory.
#[derive(Clone, Default)]
pub struct RateLimitState {
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

struct Window {
    count: u32,
    started: Instant,
}

impl RateLimitState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ok(remaining) while under `max_requests` per `window`, else Err(retry_after).
    pub async fn check(&self, key: &str, max_requests: u32, window: Duration) -> Result<u32, Duration> {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        let entry = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(entry.started) > window {
            entry.count = 0;
            entry.started = now;
        }

        if entry.count >= max_requests {
            return Err(window.saturating_sub(now.duration_since(entry.started)));
        }

        entry.count += 1;
        Ok(max_requests - entry.count)
    }

    /// Drops windows idle for more than two window lengths.
    pub async fn cleanup(&self) {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();
        let keep_for = Duration::from_secs(WINDOW_SECS * 2);
        windows.retain(|_, w| now.duration_since(w.started) < keep_for);
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.windows.lock().await.len()
    }
}

pub fn spawn_cleanup_worker(limiter: RateLimitState) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(CLEANUP_INTERVAL_SECS));
        loop {
            interval.tick().await;
            limiter.cleanup().await;
            tracing::debug!("Rate limit windows pruned");
        }
    });
}

/// Caps calls to the LLM-backed endpoints per client IP and path.
pub async fn rate_limit_llm(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = addr.ip().to_string();
    let path = req.uri().path().to_string();
    let key = format!("llm:{}:{}", ip, path);

    let max = state.config.llm_rate_limit_per_minute;
    match state
        .rate_limiter
        .check(&key, max, Duration::from_secs(WINDOW_SECS))
        .await
    {
        Ok(remaining) => {
            tracing::debug!(ip = %ip, path = %path, remaining = remaining, "LLM rate limit check passed");
            Ok(next.run(req).await)
        }
        Err(retry_after) => {
            tracing::warn!(
                ip = %ip,
                path = %path,
                retry_after_secs = retry_after.as_secs(),
                "LLM rate limit exceeded"
            );
            Err(AppError::RateLimited)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_allows_up_to_limit_then_blocks() {
        let limiter = RateLimitState::new();
        for expected_remaining in (0..3).rev() {
            assert_eq!(limiter.check("k", 3, WINDOW).await, Ok(expected_remaining));
        }
        assert!(limiter.check("k", 3, WINDOW).await.is_err());
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let limiter = RateLimitState::new();
        for _ in 0..2 {
            let _ = limiter.check("a", 2, WINDOW).await;
        }
        assert!(limiter.check("a", 2, WINDOW).await.is_err());
        assert!(limiter.check("b", 2, WINDOW).await.is_ok());
    }

    #[tokio::test]
    async fn test_expired_window_resets() {
        let limiter = RateLimitState::new();
        let tiny = Duration::from_millis(10);
        assert!(limiter.check("k", 1, tiny).await.is_ok());
        assert!(limiter.check("k", 1, tiny).await.is_err());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(limiter.check("k", 1, tiny).await.is_ok());
    }

    #[tokio::test]
    async fn test_cleanup_keeps_fresh_windows() {
        let limiter = RateLimitState::new();
        let _ = limiter.check("k", 1, WINDOW).await;
        limiter.cleanup().await;
        assert_eq!(limiter.tracked_keys().await, 1);
    }
}
