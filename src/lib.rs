//! A per-client request admission-control engine for Rust applications.
//!
//! This library provides a family of rate-limiting strategies that decide,
//! per discrete time step and per client identity, whether an incoming
//! request may proceed. All strategies share one contract and track state
//! independently per client.
//!
//! # Quick Start
//!
//! ```rust
//! use admission_core::RateLimiter;
//! use admission_core::limiters::TokenBucket;
//!
//! // 2 tokens every 2 ticks, bucket capped at 5
//! let mut limiter = TokenBucket::new(2, 2, 5).unwrap();
//!
//! // Advance time, then evaluate requests at that step
//! limiter.tick(0).unwrap();
//! if limiter.check("client-1", 0).unwrap() {
//!     println!("Request admitted");
//! } else {
//!     println!("Request denied");
//! }
//! ```
//!
//! # Available Strategies
//!
//! ## [Fixed Window](limiters::FixedWindow)
//! Per-client counters, reset together at every window boundary:
//! ```rust
//! # use admission_core::limiters::FixedWindow;
//! let limiter = FixedWindow::new(5, 5).unwrap(); // 5 requests per 5 ticks
//! ```
//!
//! ## [Sliding Log](limiters::SlidingLog)
//! Exact sliding-window accounting from per-client timestamp logs:
//! ```rust
//! # use admission_core::limiters::SlidingLog;
//! let limiter = SlidingLog::new(5, 5).unwrap(); // 5 requests per sliding 5 ticks
//! ```
//!
//! ## [Token Bucket](limiters::TokenBucket)
//! Per-client buckets refilled in batches every few ticks:
//! ```rust
//! # use admission_core::limiters::TokenBucket;
//! let limiter = TokenBucket::new(2, 2, 5).unwrap(); // +2 tokens every 2 ticks
//! ```
//!
//! # Core Concepts
//!
//! ## The clock-step protocol
//! The engine never reads wall-clock time. The host advances a non-negative
//! integer time axis by calling [`RateLimiter::tick`] once per step, in
//! non-decreasing order, then issues zero or more
//! [`RateLimiter::check`] calls for requests arriving at that step. Any
//! time unit works (seconds, frames, test steps) as long as the host maps
//! its time source to ticks.
//!
//! ## Per-client ledgers
//! Every strategy keys its state by an opaque client identity. Unseen
//! clients are never an error: a ledger entry with full default capacity is
//! created lazily on the first `check`. Read accessors
//! ([`RateLimiter::capacity_remaining`] and the per-strategy ones) never
//! create entries and never mutate state, so they are safe to poll from a
//! display layer.
//!
//! ## Error Handling
//! Denial is a regular outcome (`Ok(false)`), not an error. The only
//! runtime failure is [`TimeRegression`], returned when a supplied tick is
//! older than one already seen; invalid construction parameters fail fast
//! with [`ConfigError`].
//!
//! # Strategy Selection Guide
//!
//! - **Simplest bookkeeping**: use [`FixedWindow`](limiters::FixedWindow),
//!   accepting bursts that straddle window boundaries
//! - **Exact sliding window**: use [`SlidingLog`](limiters::SlidingLog),
//!   paying memory proportional to window occupancy
//! - **Smoothed average rate with controlled bursts**: use
//!   [`TokenBucket`](limiters::TokenBucket)

pub mod error;
pub mod ledger;
pub mod limiter;
pub mod limiters;
pub mod types;

pub use error::{ConfigError, TimeRegression};
pub use limiter::RateLimiter;
pub use types::{Count, Tick};
