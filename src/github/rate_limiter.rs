use chrono::Utc;
use reqwest::header::HeaderMap;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

const WINDOW: Duration = Duration::from_secs(60);

/// Tracks GitHub's primary rate limit from response headers and, optionally,
/// a soft per-minute request budget (the search API allows 30 per minute).
pub struct RateLimiter {
    state: Mutex<RateLimitState>,
    per_minute: Option<u32>,
}

struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<Instant>,
    requests_in_window: u32,
    window_start: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_budget(per_minute: u32) -> Self {
        Self::build(Some(per_minute.max(1)))
    }

    fn build(per_minute: Option<u32>) -> Self {
        Self {
            state: Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
                requests_in_window: 0,
                window_start: Instant::now(),
            }),
            per_minute,
        }
    }

    pub async fn wait(&self) {
        let delay = self.reserve().await;
        if !delay.is_zero() {
            tracing::info!("Rate limited, waiting {:?}", delay);
            sleep(delay).await;
        }
    }

    /// Claims a request slot and returns how long to hold off before using it.
    async fn reserve(&self) -> Duration {
        let mut state = self.state.lock().await;
        let now = Instant::now();
        let mut delay = Duration::ZERO;

        if state.remaining == Some(0) {
            if let Some(reset_at) = state.reset_at {
                delay = reset_at.saturating_duration_since(now);
            }
            state.remaining = None;
        }

        if let Some(budget) = self.per_minute {
            let elapsed = now.saturating_duration_since(state.window_start);
            if elapsed >= WINDOW {
                state.window_start = now;
                state.requests_in_window = 0;
            } else if state.requests_in_window >= budget {
                let until_next = (state.window_start + WINDOW).saturating_duration_since(now);
                delay = delay.max(until_next);
                state.window_start += WINDOW;
                state.requests_in_window = 0;
            }
            state.requests_in_window += 1;
        }

        delay
    }

    pub async fn record(&self, headers: &HeaderMap) {
        let Some(remaining) = header_value(headers, "x-ratelimit-remaining") else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = Some(remaining as u32);
        state.reset_at = Some(Instant::now() + Duration::from_secs(seconds_until_reset(headers)));
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Seconds until the primary limit resets, zero when unknown or past.
pub fn seconds_until_reset(headers: &HeaderMap) -> u64 {
    header_value(headers, "x-ratelimit-reset")
        .map(|reset| reset.saturating_sub(Utc::now().timestamp().max(0) as u64))
        .unwrap_or(0)
}

/// True when the response says the primary limit is used up.
pub fn is_exhausted(headers: &HeaderMap) -> bool {
    header_value(headers, "x-ratelimit-remaining") == Some(0)
}
