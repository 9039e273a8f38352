use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{ConfigError, TimeRegression};
use crate::ledger::ClientLedger;
use crate::limiter::RateLimiter;
use crate::types::{Count, Tick};

/// Fixed window counter limiter.
///
/// Time is divided into fixed windows of `window` ticks. Each client carries
/// one counter, and a request is admitted while the client's counter is
/// below `limit`. When a window boundary is crossed the counters of **all**
/// clients reset together: the epoch is shared, not per-client-since-first-
/// request. The shared epoch is a deliberate property of the algorithm; it
/// keeps bookkeeping trivial at the cost of permitting bursts that straddle
/// a boundary (up to `2 × limit` admissions inside one window-sized span).
///
/// # Window boundaries
///
/// The reset fires on `tick(t)` whenever `t` is a multiple of `window`
/// (for `window == 1`, on every tick). Boundaries are therefore aligned to
/// multiples of `window`:
/// - Window 0: \[0, window-1\]
/// - Window 1: \[window, 2·window-1\]
/// - And so on...
///
/// # Example
///
/// ```rust
/// use admission_core::RateLimiter;
/// use admission_core::limiters::FixedWindow;
///
/// // Allow 5 requests per client per window of 5 ticks
/// let mut limiter = FixedWindow::new(5, 5).unwrap();
///
/// limiter.tick(0).unwrap();
/// for _ in 0..5 {
///     assert_eq!(limiter.check("client-1", 0), Ok(true));
/// }
/// assert_eq!(limiter.check("client-1", 0), Ok(false));
///
/// // Epoch boundary at tick 5: every counter resets
/// limiter.tick(5).unwrap();
/// assert_eq!(limiter.check("client-1", 5), Ok(true));
/// ```
#[derive(Debug)]
pub struct FixedWindow {
    /// Duration of each window in ticks
    window: Tick,
    /// Maximum admissions per client per window
    limit: Count,
    /// Most recent tick observed, for regression detection
    last_seen: Tick,
    /// Per-client admission counters for the current window
    ledger: ClientLedger<Count>,
}

impl FixedWindow {
    /// Creates a new fixed window limiter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `window` is non-positive or `limit` is
    /// zero, since either would make the window arithmetic meaningless.
    pub fn new(window: Tick, limit: Count) -> Result<Self, ConfigError> {
        if window <= 0 {
            return Err(ConfigError::NonPositiveWindow(window));
        }
        if limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(FixedWindow {
            window,
            limit,
            last_seen: 0,
            ledger: ClientLedger::new(),
        })
    }

    /// Current window counter for `client_id`, for display.
    ///
    /// Read-only; an untracked client reports 0.
    pub fn count(&self, client_id: &str) -> Count {
        self.ledger.peek(client_id).copied().unwrap_or(0)
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
}

impl RateLimiter for FixedWindow {
    fn tick(&mut self, now: Tick) -> Result<(), TimeRegression> {
        self.guard(now)?;

        if self.window == 1 || now % self.window == 0 {
            for count in self.ledger.values_mut() {
                *count = 0;
            }
            debug!(tick = now, clients = self.ledger.len(), "fixed window epoch reset");
        }
        Ok(())
    }

    fn check(&mut self, client_id: &str, now: Tick) -> Result<bool, TimeRegression> {
        self.guard(now)?;

        let limit = self.limit;
        let count = self.ledger.entry_or_insert_with(client_id, || 0);
        if *count < limit {
            *count += 1;
            Ok(true)
        } else {
            trace!(client_id, tick = now, count = *count, "request denied");
            Ok(false)
        }
    }

    fn capacity_remaining(&self, client_id: &str) -> Count {
        self.limit.saturating_sub(self.count(client_id))
    }
}

/// Configuration structure for creating a [`FixedWindow`] limiter.
///
/// Defaults to 5 admissions per window of 5 ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedWindowConfig {
    /// Duration of each window in ticks.
    pub window: Tick,
    /// Maximum admissions per client per window.
    pub limit: Count,
}

impl Default for FixedWindowConfig {
    fn default() -> Self {
        FixedWindowConfig { window: 5, limit: 5 }
    }
}

impl TryFrom<FixedWindowConfig> for FixedWindow {
    type Error = ConfigError;

    /// Validates the configuration and builds the limiter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use admission_core::limiters::{FixedWindow, FixedWindowConfig};
    ///
    /// let limiter = FixedWindow::try_from(FixedWindowConfig::default()).unwrap();
    /// ```
    fn try_from(config: FixedWindowConfig) -> Result<Self, Self::Error> {
        FixedWindow::new(config.window, config.limit)
    }
}
