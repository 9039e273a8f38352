//! Shared contract implemented by all limiter algorithms.
//!
//! This module defines the unified trait used by every limiter in this
//! crate. It allows the driving host to be written against the abstraction
//! only, with fixed window, sliding log, and token bucket interchangeable
//! behind it.

use crate::error::TimeRegression;
use crate::types::{Count, Tick};

/// The contract implemented by all admission-control limiters.
///
/// A limiter is driven by an external time source: the host advances the
/// discrete time axis by calling [`tick`](Self::tick) once per step, then
/// evaluates zero or more admission decisions at that step through
/// [`check`](Self::check). The engine never reads wall-clock time.
///
/// # Tick ordering
///
/// Ticks must be non-decreasing across the limiter's lifetime, counting
/// `check` calls as observations too. A regressed tick is rejected with
/// [`TimeRegression`] and leaves ledger state untouched.
///
/// # Thread safety
///
/// Implementations take `&mut self` and perform no internal locking:
/// `check`'s read-then-mutate sequence is only atomic within one exclusive
/// borrow. A concurrent host must wrap each limiter in its own
/// mutual-exclusion boundary (the trait is `Send` so instances can move
/// into one).
///
/// # Example
///
/// ```rust
/// use admission_core::RateLimiter;
/// use admission_core::limiters::SlidingLog;
///
/// let mut limiter: Box<dyn RateLimiter> = Box::new(SlidingLog::new(5, 5).unwrap());
/// limiter.tick(0).unwrap();
/// assert_eq!(limiter.check("client-1", 0), Ok(true));
/// ```
pub trait RateLimiter: Send {
    /// Advances internal bookkeeping to `now`.
    ///
    /// Safe to call repeatedly with an unchanged `now`: the call is a no-op
    /// guard, not an error, and in particular the token bucket never
    /// double-refills.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRegression`] if `now` is older than a previously seen
    /// tick.
    fn tick(&mut self, now: Tick) -> Result<(), TimeRegression>;

    /// Evaluates one admission decision for `client_id` at `now`.
    ///
    /// Returns `Ok(true)` to admit, consuming the corresponding capacity
    /// (a counter increment, a log append, or a token decrement) before
    /// returning. Returns `Ok(false)` to deny; a denial never reduces
    /// accounted capacity. An unseen client is not an error: it is tracked
    /// lazily and starts with the strategy's full default capacity.
    /// Calling `check` before any `tick` behaves as the time-zero state.
    ///
    /// # Errors
    ///
    /// Returns [`TimeRegression`] if `now` is older than a previously seen
    /// tick.
    fn check(&mut self, client_id: &str, now: Tick) -> Result<bool, TimeRegression>;

    /// Number of permits the client could still be granted, as of the last
    /// mutating call.
    ///
    /// Read-only: performs no refill or eviction and never creates a ledger
    /// entry, so display layers can poll it freely. An untracked client
    /// reports the capacity of a freshly created ledger entry.
    fn capacity_remaining(&self, client_id: &str) -> Count;
}
