use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ConfigError, TimeRegression};
use crate::ledger::ClientLedger;
use crate::limiter::RateLimiter;
use crate::types::{Count, Tick};

/// Sliding window log limiter.
///
/// Each client carries an ordered log of admission timestamps, oldest first.
/// A request at tick `t` is admitted while fewer than `limit` admissions
/// remain inside the half-open span `(t − window, t]`; on admission, `t` is
/// appended to the log. Expired timestamps are evicted from the front of
/// the log, which suffices because both admission order and time are
/// non-decreasing, so the log itself is always sorted.
///
/// This gives an exact sliding-window count, free of the fixed window's
/// epoch-boundary burst artifacts, at the cost of O(window occupancy)
/// memory per client and O(expired entries) work per step.
///
/// # Example
///
/// ```rust
/// use admission_core::RateLimiter;
/// use admission_core::limiters::SlidingLog;
///
/// let mut limiter = SlidingLog::new(5, 5).unwrap();
///
/// limiter.tick(0).unwrap();
/// for _ in 0..5 {
///     assert_eq!(limiter.check("client-1", 0), Ok(true));
/// }
/// assert_eq!(limiter.check("client-1", 0), Ok(false));
///
/// // The tick-0 admissions leave the window at tick 5
/// limiter.tick(5).unwrap();
/// assert_eq!(limiter.check("client-1", 5), Ok(true));
/// ```
#[derive(Debug)]
pub struct SlidingLog {
    /// Span of the sliding window in ticks
    window: Tick,
    /// Maximum admissions per client within any window-sized span
    limit: Count,
    /// Most recent tick observed, for regression detection
    last_seen: Tick,
    /// Per-client admission timestamp logs, oldest first
    ledger: ClientLedger<VecDeque<Tick>>,
}

impl SlidingLog {
    /// Creates a new sliding log limiter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `window` is non-positive or `limit` is
    /// zero.
    pub fn new(window: Tick, limit: Count) -> Result<Self, ConfigError> {
        if window <= 0 {
            return Err(ConfigError::NonPositiveWindow(window));
        }
        if limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(SlidingLog {
            window,
            limit,
            last_seen: 0,
            ledger: ClientLedger::new(),
        })
    }

    /// Current log length for `client_id`, for display.
    ///
    /// Read-only; reflects the log as of the last mutating call, so entries
    /// that have expired since then are still counted until the next `tick`
    /// or `check`. An untracked client reports 0.
    pub fn log_len(&self, client_id: &str) -> usize {
        self.ledger.peek(client_id).map_or(0, VecDeque::len)
    }

    fn guard(&mut self, now: Tick) -> Result<(), TimeRegression> {
        if now < self.last_seen {
            return Err(TimeRegression {
                now,
                last_seen: self.last_seen,
            });
        }
        self.last_seen = now;
        Ok(())
    }

    fn evict_expired(log: &mut VecDeque<Tick>, now: Tick, window: Tick) {
        // Timestamps at or before now - window have left the span
        // (now - window, now]. The log is sorted, so only the front expires.
        while log.front().map_or(false, |&stamp| stamp <= now - window) {
            log.pop_front();
        }
    }
}

impl RateLimiter for SlidingLog {
    fn tick(&mut self, now: Tick) -> Result<(), TimeRegression> {
        self.guard(now)?;

        let window = self.window;
        for log in self.ledger.values_mut() {
            Self::evict_expired(log, now, window);
        }
        Ok(())
    }

    fn check(&mut self, client_id: &str, now: Tick) -> Result<bool, TimeRegression> {
        self.guard(now)?;

        let window = self.window;
        let limit = self.limit;
        let log = self.ledger.entry_or_insert_with(client_id, VecDeque::new);
        // Evict here as well, so the decision stays exact even when the
        // driver skipped tick calls for steps with no requests.
        Self::evict_expired(log, now, window);

        if (log.len() as Count) < limit {
            log.push_back(now);
            Ok(true)
        } else {
            trace!(client_id, tick = now, in_window = log.len(), "request denied");
            Ok(false)
        }
    }

    fn capacity_remaining(&self, client_id: &str) -> Count {
        self.limit.saturating_sub(self.log_len(client_id) as Count)
    }
}

/// Configuration structure for creating a [`SlidingLog`] limiter.
///
/// Defaults to 5 admissions per sliding span of 5 ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlidingLogConfig {
    /// Span of the sliding window in ticks.
    pub window: Tick,
    /// Maximum admissions per client within any window-sized span.
    pub limit: Count,
}

impl Default for SlidingLogConfig {
    fn default() -> Self {
        SlidingLogConfig { window: 5, limit: 5 }
    }
}

impl TryFrom<SlidingLogConfig> for SlidingLog {
    type Error = ConfigError;

    /// Validates the configuration and builds the limiter.
    fn try_from(config: SlidingLogConfig) -> Result<Self, Self::Error> {
        SlidingLog::new(config.window, config.limit)
    }
}
