//! Bounded retry policy for the request/extract cycle.
//!
//! Transport failures and extraction misses share one attempt budget but
//! back off on independent schedules: a failed request deserves a growing
//! delay, while an unparseable response just needs a fresh sample.

use std::time::Duration;

/// Exponential backoff schedule.
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Delay before the second attempt
    pub initial: Duration,

    /// Growth factor applied per additional attempt
    pub multiplier: f64,

    /// Upper bound on any single delay
    pub max: Duration,
}

impl Backoff {
    /// Create a backoff schedule.
    pub fn new(initial: Duration, multiplier: f64, max: Duration) -> Self {
        Self {
            initial,
            multiplier,
            max,
        }
    }

    /// No delay between attempts.
    pub const fn none() -> Self {
        Self {
            initial: Duration::ZERO,
            multiplier: 1.0,
            max: Duration::ZERO,
        }
    }

    /// Delay to wait after the given 1-based attempt number.
    pub fn delay(&self, attempt: usize) -> Duration {
        if self.initial.is_zero() {
            return Duration::ZERO;
        }
        let exponent = attempt.saturating_sub(1).min(i32::MAX as usize) as i32;
        let scaled = self.initial.mul_f64(self.multiplier.powi(exponent));
        scaled.min(self.max)
    }
}

/// Retry policy for one question.
///
/// The attempt budget covers the first request; `max_attempts = 1` means
/// no retries. Exhausting the budget without a bedroom count surfaces
/// [`EstimatorError::ExtractionExhausted`](crate::EstimatorError::ExtractionExhausted).
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Attempts per question, including the first
    pub max_attempts: usize,

    /// Backoff after a transport or API failure
    pub transport_backoff: Backoff,

    /// Backoff after a response that lacked a bedroom count
    pub miss_backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            transport_backoff: Backoff::new(
                Duration::from_millis(500),
                2.0,
                Duration::from_secs(30),
            ),
            miss_backoff: Backoff::none(),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with default backoff schedules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the transport-failure backoff.
    pub fn with_transport_backoff(mut self, backoff: Backoff) -> Self {
        self.transport_backoff = backoff;
        self
    }

    /// Set the extraction-miss backoff.
    pub fn with_miss_backoff(mut self, backoff: Backoff) -> Self {
        self.miss_backoff = backoff;
        self
    }
}
