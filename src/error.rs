//! error.rs
//! Construction-time and tick-ordering error types.

use crate::types::Tick;
use thiserror::Error;

/// Error type for invalid limiter configurations.
///
/// Returned by limiter constructors. A non-positive window or a zero limit
/// would make the window arithmetic undefined, so construction fails fast
/// rather than producing a limiter with silent incorrect behavior.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `limit` must allow at least one admission per accounting unit.
    #[error("limit must be greater than 0")]
    ZeroLimit,

    /// Window length drives modulo/division arithmetic and must be positive.
    #[error("window must be greater than 0, got {0}")]
    NonPositiveWindow(Tick),

    /// Refill interval drives division arithmetic and must be positive.
    #[error("refill_window must be greater than 0, got {0}")]
    NonPositiveRefillWindow(Tick),

    /// A bucket that never gains tokens can never admit anything.
    #[error("refill_tokens must be greater than 0")]
    ZeroRefillTokens,
}

/// Error returned when a supplied tick is older than one already seen.
///
/// The engine requires non-decreasing ticks across `tick` and `check` calls.
/// A regressed tick is rejected before any ledger mutation: silently
/// computing a negative elapsed interval would desynchronize refill and
/// window arithmetic.
///
/// # Example
///
/// ```rust
/// use admission_core::{RateLimiter, TimeRegression};
/// use admission_core::limiters::FixedWindow;
///
/// let mut limiter = FixedWindow::new(5, 5).unwrap();
/// limiter.tick(7).unwrap();
/// assert_eq!(
///     limiter.tick(3),
///     Err(TimeRegression { now: 3, last_seen: 7 })
/// );
/// ```
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("time went backwards: tick {now} is older than last seen tick {last_seen}")]
pub struct TimeRegression {
    /// The regressed tick supplied by the caller.
    pub now: Tick,
    /// The most recent tick the limiter has observed.
    pub last_seen: Tick,
}
