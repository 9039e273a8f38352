//! Integer type aliases for time ticks and permit counts.
//!
//! This module defines `Tick` as the signed integer type used for positions
//! on the engine's discrete time axis, and `Count` as the unsigned type used
//! for limits, counters, and token counts. The tick width is determined at
//! compile time via feature flags.
//!
//! # Features
//! - `tick-i64` (default): uses [`i64`] as `Tick`
//! - `tick-i128`: uses [`i128`] as `Tick`
//!   (Both features cannot be enabled at the same time.)
//! - If neither feature is enabled, `i64` is used as the default type.
//!
//! Ticks supplied by callers are non-negative; the alias is signed because
//! token-bucket ledger entries start with a `last_refill` one refill window
//! *before* time zero, so the very first refill computation sees a
//! well-defined non-negative elapsed interval.

/// Alias for the signed integer type used for time ticks.
///
/// The type is selected at compile time using feature flags:
/// - **`tick-i64`** (default): uses [`i64`]
/// - **`tick-i128`**: uses [`i128`]
///
/// > **Note:** Enabling both `tick-i64` and `tick-i128` at the same time
///   will result in a compile error. If neither is enabled, [`i64`] is used.
#[cfg(all(feature = "tick-i64", feature = "tick-i128"))]
compile_error!("You cannot enable both `tick-i64` and `tick-i128` features at the same time");

#[cfg(all(feature = "tick-i64", not(feature = "tick-i128")))]
pub type Tick = i64;

#[cfg(all(feature = "tick-i128", not(feature = "tick-i64")))]
pub type Tick = i128;

#[cfg(not(any(feature = "tick-i64", feature = "tick-i128")))]
pub type Tick = i64;

/// Alias for the unsigned integer type used for limits and permit counts.
pub type Count = u64;
