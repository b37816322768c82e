//! Core infrastructure for the Formilo contact relay.
//!
//! This crate contains the infrastructure modules consumed by the server
//! crate: source-identity rate limiting, the telemetry collaborator, and
//! client IP resolution for proxied deployments.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod client_ip;
pub mod prelude;
pub mod rate_limit;
pub mod telemetry;

pub use client_ip::resolve_client_ip;
pub use rate_limit::{GcraRateLimiter, RateLimitConfig, RateLimitPolicy};
pub use telemetry::{Telemetry, TelemetryEvent, TelemetrySnapshot};

// vim: ts=4
