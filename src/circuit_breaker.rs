//! Three-state circuit breaker gating upstream calls (§4.2).

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

struct Inner {
    state: BreakerState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    half_open_successes: u32,
}

pub struct CircuitBreaker {
    inner: Mutex<Inner>,
    failure_threshold: u32,
    recovery_timeout: Duration,
    half_open_max_calls: u32,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, recovery_timeout: Duration, half_open_max_calls: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                failure_count: 0,
                last_failure_time: None,
                half_open_successes: 0,
            }),
            failure_threshold,
            recovery_timeout,
            half_open_max_calls,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(5, Duration::from_secs(60), 3)
    }

    /// Performs the lazy `open -> half_open` transition, then reports
    /// whether a call may proceed.
    pub async fn can_execute(&self) -> bool {
        let mut inner = self.inner.lock().await;
        match inner.state {
            BreakerState::Closed => true,
            BreakerState::HalfOpen => inner.half_open_successes < self.half_open_max_calls,
            BreakerState::Open => {
                let elapsed = inner
                    .last_failure_time
                    .map(|t| t.elapsed())
                    .unwrap_or(Duration::ZERO);
                if elapsed >= self.recovery_timeout {
                    inner.state = BreakerState::HalfOpen;
                    inner.half_open_successes = 0;
                    true
                } else {
                    false
                }
            }
        }
    }

    pub async fn record_success(&self) {
        let mut inner = self.inner.lock().await;
        match inner.state {
            BreakerState::Closed => {
                inner.failure_count = 0;
            }
            BreakerState::HalfOpen => {
                inner.half_open_successes += 1;
                if inner.half_open_successes >= self.half_open_max_calls {
                    inner.state = BreakerState::Closed;
                    inner.failure_count = 0;
                }
            }
            BreakerState::Open => {}
        }
    }

    pub async fn record_failure(&self) {
        let mut inner = self.inner.lock().await;
        inner.last_failure_time = Some(Instant::now());
        match inner.state {
            BreakerState::Closed => {
                inner.failure_count += 1;
                if inner.failure_count >= self.failure_threshold {
                    inner.state = BreakerState::Open;
                }
            }
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Open;
                inner.half_open_successes = 0;
            }
            BreakerState::Open => {}
        }
    }

    pub async fn state(&self) -> BreakerState {
        self.inner.lock().await.state
    }
}
