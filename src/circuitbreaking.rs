//! Rate-based circuit breaker for outbound integrations.
//!
//! Outcomes are counted in a rolling, time-bucketed window. The breaker opens once the window
//! holds at least `minimum_sample_threshold` outcomes and the failure percentage reaches
//! `error_rate`. An open breaker refuses calls until `reset_timeout` has elapsed, then closes
//! with an empty window.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Deserialize;

use crate::config::ConfigError;

pub const DEFAULT_ERROR_RATE: f64 = 200.0;
pub const DEFAULT_MINIMUM_SAMPLE_THRESHOLD: u64 = 1_000_000;

const DEFAULT_WINDOW: Duration = Duration::from_secs(10);
const DEFAULT_BUCKETS: usize = 10;
const DEFAULT_RESET_TIMEOUT: Duration = Duration::from_secs(10);

/// Returned by integration wrappers instead of making a call the breaker refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("service circuit broken")]
pub struct CircuitBrokenError;

pub trait CircuitBreaker: Send + Sync {
    fn failed(&self);
    fn succeeded(&self);
    fn can_proceed(&self) -> bool;

    fn cannot_proceed(&self) -> bool {
        !self.can_proceed()
    }
}

/// Never trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCircuitBreaker;

impl CircuitBreaker for NoopCircuitBreaker {
    fn failed(&self) {}

    fn succeeded(&self) {}

    fn can_proceed(&self) -> bool {
        true
    }
}

/// Substitutes a [`NoopCircuitBreaker`] when none is supplied.
pub fn ensure_circuit_breaker(breaker: Option<Arc<dyn CircuitBreaker>>) -> Arc<dyn CircuitBreaker> {
    breaker.unwrap_or_else(|| Arc::new(NoopCircuitBreaker))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub name: String,
    /// Failure percentage at which the breaker opens.
    pub error_rate: f64,
    pub minimum_sample_threshold: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: String::new(),
            error_rate: DEFAULT_ERROR_RATE,
            minimum_sample_threshold: DEFAULT_MINIMUM_SAMPLE_THRESHOLD,
        }
    }
}

impl Config {
    /// Reads `<PREFIX>_CIRCUIT_BREAKER_{NAME,ERROR_RATE,MINIMUM_SAMPLE_THRESHOLD}`.
    /// Unset variables keep their defaults.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(name) = env::var(format!("{prefix}_CIRCUIT_BREAKER_NAME")) {
            config.name = name;
        }

        let key = format!("{prefix}_CIRCUIT_BREAKER_ERROR_RATE");
        if let Ok(raw) = env::var(&key) {
            config.error_rate = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: key.clone(), value: raw })?;
        }

        let key = format!("{prefix}_CIRCUIT_BREAKER_MINIMUM_SAMPLE_THRESHOLD");
        if let Ok(raw) = env::var(&key) {
            config.minimum_sample_threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key: key.clone(), value: raw })?;
        }

        Ok(config)
    }

    pub fn provide(&self) -> Arc<dyn CircuitBreaker> {
        Arc::new(RateBreaker::new(self.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    epoch: u64,
    successes: u64,
    failures: u64,
}

struct Window {
    started: Instant,
    buckets: Vec<Bucket>,
    opened_at: Option<Instant>,
}

pub struct RateBreaker {
    config: Config,
    bucket_width: Duration,
    reset_timeout: Duration,
    window: Mutex<Window>,
}

impl fmt::Debug for RateBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateBreaker")
            .field("config", &self.config)
            .field("state", &self.state())
            .finish()
    }
}

impl RateBreaker {
    pub fn new(config: Config) -> Self {
        Self::with_window(config, DEFAULT_WINDOW, DEFAULT_BUCKETS, DEFAULT_RESET_TIMEOUT)
    }

    /// `window` is split into `buckets` equal slices; the oldest slice is dropped as time moves on.
    pub fn with_window(config: Config, window: Duration, buckets: usize, reset_timeout: Duration) -> Self {
        if config.error_rate > 100.0 {
            tracing::warn!(
                "Circuit breaker {:?} has error rate {} above 100%; it will never open",
                config.name,
                config.error_rate
            );
        }

        let buckets = buckets.max(1);
        let bucket_width = (window / buckets as u32).max(Duration::from_millis(1));

        Self {
            config,
            bucket_width,
            reset_timeout,
            window: Mutex::new(Window {
                started: Instant::now(),
                buckets: vec![Bucket::default(); buckets],
                opened_at: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn state(&self) -> CircuitState {
        self.state_at(Instant::now())
    }

    fn epoch(&self, window: &Window, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(window.started);
        (elapsed.as_nanos() / self.bucket_width.as_nanos()) as u64
    }

    fn record_at(&self, now: Instant, failed: bool) {
        let mut window = self.window.lock();
        self.close_if_reset(&mut window, now);

        let epoch = self.epoch(&window, now);
        let slots = window.buckets.len() as u64;
        let bucket = &mut window.buckets[(epoch % slots) as usize];
        if bucket.epoch != epoch {
            *bucket = Bucket {
                epoch,
                ..Bucket::default()
            };
        }

        if failed {
            bucket.failures += 1;
        } else {
            bucket.successes += 1;
        }

        if window.opened_at.is_none() && self.should_trip(&window, epoch) {
            tracing::warn!("Circuit breaker {:?} opened", self.config.name);
            window.opened_at = Some(now);
        }
    }

    fn should_trip(&self, window: &Window, epoch: u64) -> bool {
        let slots = window.buckets.len() as u64;
        let (successes, failures) = window
            .buckets
            .iter()
            .filter(|b| epoch.saturating_sub(b.epoch) < slots)
            .fold((0u64, 0u64), |(s, f), b| (s + b.successes, f + b.failures));

        let total = successes + failures;
        if total == 0 || total < self.config.minimum_sample_threshold {
            return false;
        }

        let rate = failures as f64 * 100.0 / total as f64;
        rate >= self.config.error_rate
    }

    fn close_if_reset(&self, window: &mut Window, now: Instant) {
        if let Some(opened) = window.opened_at {
            if now.saturating_duration_since(opened) >= self.reset_timeout {
                tracing::info!("Circuit breaker {:?} closed", self.config.name);
                window.opened_at = None;
                window.buckets.iter_mut().for_each(|b| *b = Bucket::default());
                window.started = now;
            }
        }
    }

    fn state_at(&self, now: Instant) -> CircuitState {
        let mut window = self.window.lock();
        self.close_if_reset(&mut window, now);

        match window.opened_at {
            Some(_) => CircuitState::Open,
            None => CircuitState::Closed,
        }
    }
}

impl CircuitBreaker for RateBreaker {
    fn failed(&self) {
        self.record_at(Instant::now(), true);
    }

    fn succeeded(&self) {
        self.record_at(Instant::now(), false);
    }

    fn can_proceed(&self) -> bool {
        self.state() == CircuitState::Closed
    }
}
