use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ConfigError, TimeRegression};
use crate::ledger::ClientLedger;
use crate::limiter::RateLimiter;
use crate::types::{Count, Tick};

/// Token bucket limiter with batched periodic refill.
///
/// Each client carries a bucket of tokens, capped at `limit`. Every
/// `refill_window` ticks the bucket gains `refill_tokens` tokens, and each
/// admitted request consumes one. Buckets start empty with their refill
/// reference one window before time zero, so the first refill lands exactly
/// at tick 0.
///
/// # Refill arithmetic
///
/// Refill is computed from whole elapsed windows:
/// `windows = (now − last_refill) / refill_window`, then
/// `tokens += windows × refill_tokens` clamped to `limit`, and
/// `last_refill` advances by `windows × refill_window` — by the multiple,
/// not to `now`. Advancing by the multiple preserves fractional progress
/// toward the next refill boundary, keeping refill exact and drift-free
/// under irregular tick cadence.
///
/// Refill runs for every known client on [`tick`](RateLimiter::tick) and
/// again, lazily, for the addressed client inside
/// [`check`](RateLimiter::check). The in-check refill keeps decisions
/// correct even when the driver skipped `tick` for steps that carried no
/// requests; a tick-only refill would under-credit idle clients.
///
/// # Example
///
/// ```rust
/// use admission_core::RateLimiter;
/// use admission_core::limiters::TokenBucket;
///
/// // 2 tokens every 2 ticks, bucket capped at 5
/// let mut bucket = TokenBucket::new(2, 2, 5).unwrap();
///
/// bucket.tick(0).unwrap();
/// assert_eq!(bucket.tokens("client-1"), 0); // untracked until first check
/// assert_eq!(bucket.check("client-1", 0), Ok(true));
/// assert_eq!(bucket.check("client-1", 0), Ok(true));
/// assert_eq!(bucket.check("client-1", 0), Ok(false)); // bucket empty
///
/// bucket.tick(2).unwrap();
/// assert_eq!(bucket.tokens("client-1"), 2);
/// ```
#[derive(Debug)]
pub struct TokenBucket {
    /// Tokens added per elapsed refill window
    refill_tokens: Count,
    /// Number of ticks between refill boundaries
    refill_window: Tick,
    /// Maximum tokens a bucket can hold
    limit: Count,
    /// Most recent tick observed, for regression detection
    last_seen: Tick,
    /// Per-client bucket state
    ledger: ClientLedger<Bucket>,
}

/// Per-client bucket state.
#[derive(Debug, Clone, Copy)]
struct Bucket {
    /// Tokens currently available
    tokens: Count,
    /// Tick of the last refill boundary; only advances in multiples of the
    /// refill window
    last_refill: Tick,
}

impl TokenBucket {
    /// Creates a new token bucket limiter with no pre-tracked clients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `refill_window` is non-positive or
    /// `refill_tokens`/`limit` is zero.
    pub fn new(refill_tokens: Count, refill_window: Tick, limit: Count) -> Result<Self, ConfigError> {
        Self::with_clients(refill_tokens, refill_window, limit, std::iter::empty::<&str>())
    }

    /// Creates a new token bucket limiter pre-tracking the listed clients.
    ///
    /// Listed clients get their empty bucket immediately, so a global
    /// [`tick`](RateLimiter::tick) credits them from time zero onward even
    /// before their first request. Unlisted clients are still tracked
    /// lazily on first [`check`](RateLimiter::check).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `refill_window` is non-positive or
    /// `refill_tokens`/`limit` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use admission_core::RateLimiter;
    /// use admission_core::limiters::TokenBucket;
    ///
    /// let mut bucket = TokenBucket::with_clients(2, 2, 5, ["client-1"]).unwrap();
    /// bucket.tick(0).unwrap();
    /// assert_eq!(bucket.tokens("client-1"), 2);
    /// ```
    pub fn with_clients<I>(
        refill_tokens: Count,
        refill_window: Tick,
        limit: Count,
        clients: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if refill_window <= 0 {
            return Err(ConfigError::NonPositiveRefillWindow(refill_window));
        }
        if refill_tokens == 0 {
            return Err(ConfigError::ZeroRefillTokens);
        }
        if limit == 0 {
            return Err(ConfigError::ZeroLimit);
        }

        Ok(TokenBucket {
            refill_tokens,
            refill_window,
            limit,
            last_seen: 0,
            ledger: ClientLedger::with_clients(clients, || Bucket::empty(refill_window)),
        })
    }

    /// Current token count for `client_id`, for display.
    ///
    /// Read-only: does not apply pending refills, so the value reflects the
    /// bucket as of the last `tick` or `check`. An untracked client
    /// reports 0.
    pub fn tokens(&self, client_id: &str) -> Count {
        self.ledger.peek(client_id).map_or(0, |bucket| bucket.tokens)
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

    /// Credits a bucket with all refill windows that elapsed up to `now`.
    fn refill(bucket: &mut Bucket, now: Tick, refill_window: Tick, refill_tokens: Count, limit: Count) {
        // guard() has already rejected regressed ticks, and last_refill
        // never runs ahead of the newest observed tick.
        let elapsed = now - bucket.last_refill;
        let windows = elapsed / refill_window;
        if windows > 0 {
            let credited = (windows as Count).saturating_mul(refill_tokens);
            bucket.tokens = bucket.tokens.saturating_add(credited).min(limit);
            bucket.last_refill += windows * refill_window;
        }
    }
}

impl Bucket {
    /// An empty bucket whose refill reference sits one window before time
    /// zero, so the first refill computation at tick 0 credits one window.
    fn empty(refill_window: Tick) -> Self {
        Bucket {
            tokens: 0,
            last_refill: -refill_window,
        }
    }
}

impl RateLimiter for TokenBucket {
    fn tick(&mut self, now: Tick) -> Result<(), TimeRegression> {
        self.guard(now)?;

        let (refill_window, refill_tokens, limit) = (self.refill_window, self.refill_tokens, self.limit);
        for bucket in self.ledger.values_mut() {
            Self::refill(bucket, now, refill_window, refill_tokens, limit);
        }
        Ok(())
    }

    fn check(&mut self, client_id: &str, now: Tick) -> Result<bool, TimeRegression> {
        self.guard(now)?;

        let (refill_window, refill_tokens, limit) = (self.refill_window, self.refill_tokens, self.limit);
        let bucket = self
            .ledger
            .entry_or_insert_with(client_id, || Bucket::empty(refill_window));
        // Lazy refill: correct even if tick(now) was never issued.
        Self::refill(bucket, now, refill_window, refill_tokens, limit);

        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            Ok(true)
        } else {
            trace!(client_id, tick = now, "request denied, bucket empty");
            Ok(false)
        }
    }

    fn capacity_remaining(&self, client_id: &str) -> Count {
        self.tokens(client_id)
    }
}

/// Configuration structure for creating a [`TokenBucket`] limiter.
///
/// Defaults to 2 tokens every 2 ticks with a bucket cap of 5 and no
/// pre-tracked clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenBucketConfig {
    /// Tokens added per elapsed refill window.
    pub refill_tokens: Count,
    /// Number of ticks between refill boundaries.
    pub refill_window: Tick,
    /// Maximum tokens a bucket can hold.
    pub limit: Count,
    /// Clients tracked from construction rather than lazily.
    #[serde(default)]
    pub clients: Vec<String>,
}

impl Default for TokenBucketConfig {
    fn default() -> Self {
        TokenBucketConfig {
            refill_tokens: 2,
            refill_window: 2,
            limit: 5,
            clients: Vec::new(),
        }
    }
}

impl TryFrom<TokenBucketConfig> for TokenBucket {
    type Error = ConfigError;

    /// Validates the configuration and builds the limiter.
    ///
    /// # Example
    ///
    /// ```rust
    /// use admission_core::limiters::{TokenBucket, TokenBucketConfig};
    ///
    /// let bucket = TokenBucket::try_from(TokenBucketConfig {
    ///     clients: vec!["client-1".to_owned()],
    ///     ..TokenBucketConfig::default()
    /// }).unwrap();
    /// ```
    fn try_from(config: TokenBucketConfig) -> Result<Self, Self::Error> {
        TokenBucket::with_clients(
            config.refill_tokens,
            config.refill_window,
            config.limit,
            config.clients,
        )
    }
}
