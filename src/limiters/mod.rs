//! The limiter family: one module per admission-control strategy.
//!
//! Each limiter tracks state per client, is driven by externally supplied
//! integer ticks, and implements the shared [`RateLimiter`] contract, so a
//! host can swap strategies behind the trait.
//!
//! # Available Strategies
//!
//! - **[`FixedWindow`]** - per-client counters with a shared epoch reset at
//!   window boundaries
//! - **[`SlidingLog`]** - exact per-client admission-timestamp log over a
//!   sliding span
//! - **[`TokenBucket`]** - per-client buckets with batched periodic refill
//!
//! # Strategy Comparison
//!
//! | Strategy | Memory per client | Accuracy | Boundary behavior |
//! |----------|-------------------|----------|-------------------|
//! | Fixed Window | O(1) | Medium | Bursts may straddle epoch boundaries |
//! | Sliding Log | O(window occupancy) | Exact | Smooth |
//! | Token Bucket | O(1) | Exact | Bursts up to bucket capacity |
//!
//! [`RateLimiter`]: crate::RateLimiter

pub mod fixed_window;
pub use fixed_window::FixedWindow;
pub use fixed_window::FixedWindowConfig;

pub mod sliding_log;
pub use sliding_log::SlidingLog;
pub use sliding_log::SlidingLogConfig;

pub mod token_bucket;
pub use token_bucket::TokenBucket;
pub use token_bucket::TokenBucketConfig;
