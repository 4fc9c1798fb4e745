use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use reqwest::Response;
use tokio::time::sleep;

// Soft ceiling below GitHub's secondary limits.
const SOFT_LIMIT_PER_MINUTE: u32 = 30;

pub struct RateLimiter {
    state: Mutex<State>,
}

struct State {
    remaining: u32,
    reset_at: Option<Instant>,
    window_requests: u32,
    window_start: Instant,
}

impl State {
    /// Returns how long the caller must wait before sending, or `None` if a
    /// request slot was claimed.
    fn next_delay(&mut self) -> Option<Duration> {
        let now = Instant::now();

        if self.remaining == 0 {
            match self.reset_at {
                Some(reset_at) if reset_at > now => return Some(reset_at - now),
                _ => {
                    // Reset window has passed; let one request probe.
                    self.remaining = 1;
                    self.reset_at = None;
                }
            }
        }

        if now.duration_since(self.window_start) >= Duration::from_secs(60) {
            self.window_start = now;
            self.window_requests = 0;
        }

        if self.window_requests >= SOFT_LIMIT_PER_MINUTE {
            return Some(Duration::from_secs(60) - now.duration_since(self.window_start));
        }

        self.window_requests += 1;
        None
    }
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                remaining: 5000,
                reset_at: None,
                window_requests: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Waits until a request may be sent without tripping the API limit.
    pub async fn acquire(&self) {
        loop {
            let delay = self.state.lock().unwrap().next_delay();
            match delay {
                Some(delay) => {
                    tracing::debug!("Rate limited, waiting {:?}", delay);
                    sleep(delay).await;
                }
                None => return,
            }
        }
    }

    /// Records the rate-limit headers of a completed response.
    pub fn observe(&self, response: &Response) {
        let headers = response.headers();

        let remaining: Option<u32> = headers
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let Some(remaining) = remaining else { return };

        let reset_at = headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .and_then(|reset_timestamp| {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap()
                    .as_secs();
                (reset_timestamp > now)
                    .then(|| Instant::now() + Duration::from_secs(reset_timestamp - now))
            });

        let mut state = self.state.lock().unwrap();
        state.remaining = remaining;
        if remaining == 0 {
            state.reset_at = reset_at;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
