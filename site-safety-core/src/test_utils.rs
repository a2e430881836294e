//! Test helpers
//!
//! Mock collaborators with call counters and a manually driven clock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tokio::sync::Mutex;

use crate::error::{EvaluatorError, EvaluatorResult};
use crate::traits::{Clock, ReachabilityProbe, RegistrationSource};

// ===== ManualClock =====

/// Clock that only moves when told to. Starts at 2024-06-01T00:00:00Z.
pub struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: StdMutex::new(
                Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
                    .single()
                    .unwrap_or_default(),
            ),
        }
    }
}

impl ManualClock {
    pub fn advance(&self, delta: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += delta;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|now| *now).unwrap_or_default()
    }
}

// ===== MockRegistrationSource =====

/// Scripted reply for one registration lookup.
#[derive(Debug, Clone, Copy)]
pub enum RegistrationReply {
    Created(DateTime<Utc>),
    NoDate,
    Error,
}

/// Replies are consumed in order; once exhausted every call fails.
pub struct MockRegistrationSource {
    replies: Mutex<VecDeque<RegistrationReply>>,
    delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl MockRegistrationSource {
    pub fn replying(replies: Vec<RegistrationReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl RegistrationSource for MockRegistrationSource {
    async fn fetch_created_date(&self, _domain: &str) -> EvaluatorResult<Option<DateTime<Utc>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.lock().await.pop_front();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match reply {
            Some(RegistrationReply::Created(date)) => Ok(Some(date)),
            Some(RegistrationReply::NoDate) => Ok(None),
            Some(RegistrationReply::Error) | None => Err(EvaluatorError::NetworkError(
                "mock registration failure".to_string(),
            )),
        }
    }
}

// ===== MockReachabilityProbe =====

pub struct MockReachabilityProbe {
    status: Option<u16>,
    delay: Option<Duration>,
    domains: Mutex<Vec<String>>,
    pub calls: AtomicUsize,
}

impl MockReachabilityProbe {
    /// Probe that answers with `status`.
    pub fn status(status: u16) -> Self {
        Self {
            status: Some(status),
            delay: None,
            domains: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Probe that fails like an unreachable host.
    pub fn failing() -> Self {
        Self {
            status: None,
            ..Self::status(0)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub async fn domains(&self) -> Vec<String> {
        self.domains.lock().await.clone()
    }
}

#[async_trait]
impl ReachabilityProbe for MockReachabilityProbe {
    async fn probe(&self, domain: &str) -> EvaluatorResult<u16> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.domains.lock().await.push(domain.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.status.ok_or_else(|| {
            EvaluatorError::NetworkError("mock connection refused".to_string())
        })
    }
}
