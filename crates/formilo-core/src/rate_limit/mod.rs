//! Source-identity rate limiting.
//!
//! The pipeline only depends on the boolean [`RateLimitPolicy`] contract;
//! the concrete algorithm lives in [`limiter`] and is swappable.

pub mod config;
pub mod limiter;

pub use config::RateLimitConfig;
pub use limiter::{GcraRateLimiter, RateLimitPolicy};

// vim: ts=4
