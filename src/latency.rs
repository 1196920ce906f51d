//! Simulated round-trip latency and wall-clock access.
//!
//! Services never sleep or read the time directly; they go through [`Delay`]
//! and [`Clock`] so tests can run without waiting and with a frozen date.

use {
    chrono::{DateTime, NaiveDate, Utc},
    std::{sync::Mutex, time::Duration},
};

#[async_trait::async_trait]
pub trait Delay: Send + Sync {
    /// Suspends the calling task for `duration`.
    async fn pause(&self, duration: Duration);
}

/// Real delay backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait::async_trait]
impl Delay for TokioDelay {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Resolves immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait::async_trait]
impl Delay for NoDelay {
    async fn pause(&self, _duration: Duration) {}
}

/// Resolves immediately and remembers every requested pause.
#[derive(Debug, Default)]
pub struct RecordingDelay {
    requested: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    pub fn requested(&self) -> Vec<Duration> {
        self.requested
            .lock()
            .map(|requested| requested.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Delay for RecordingDelay {
    async fn pause(&self, duration: Duration) {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(duration);
        }
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Per-operation simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub search: Duration,
    pub get: Duration,
    pub list: Duration,
    pub create: Duration,
    pub update: Duration,
    pub toggle: Duration,
    pub stats: Duration,
    pub sign_in: Duration,
    pub sign_in_federated: Duration,
    pub sign_out: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Latency {
            search: Duration::from_millis(500),
            get: Duration::from_millis(300),
            list: Duration::from_millis(500),
            create: Duration::from_millis(300),
            update: Duration::from_millis(300),
            toggle: Duration::from_millis(300),
            stats: Duration::from_millis(300),
            sign_in: Duration::from_millis(500),
            sign_in_federated: Duration::from_millis(500),
            sign_out: Duration::from_millis(300),
        }
    }
}
