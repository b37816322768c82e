//! Keyed rate limiter implementation using the governor crate's GCRA algorithm.
//!
//! One quota cell is tracked per source IP address. Concurrent checks for
//! different addresses are independent; checks for the same address are
//! serialized by the underlying keyed state store, so parallel requests
//! cannot undercount. Denied checks do not consume quota.

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use tracing::debug;

use super::config::RateLimitConfig;

/// Type alias for a keyed rate limiter
type KeyedLimiter = RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock>;

/// Decides, per source identity, whether a new request may proceed.
///
/// The submission pipeline depends only on this boolean contract; the
/// throttling algorithm behind it is an implementation detail.
pub trait RateLimitPolicy: Send + Sync {
	fn should_allow(&self, addr: IpAddr) -> bool;
}

/// GCRA-based limiter allowing `max_requests` per `window_secs` per address,
/// with the full quota available as an initial burst.
pub struct GcraRateLimiter {
	limiter: KeyedLimiter,
	total_limited: AtomicU64,
}

impl GcraRateLimiter {
	pub fn new(config: &RateLimitConfig) -> Self {
		let period = Duration::from_secs(config.window_secs)
			.checked_div(config.max_requests.get())
			.unwrap_or(Duration::ZERO);
		let quota = Quota::with_period(period)
			.unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
			.allow_burst(config.max_requests);

		Self { limiter: RateLimiter::keyed(quota), total_limited: AtomicU64::new(0) }
	}

	/// Number of requests denied since startup
	pub fn total_limited(&self) -> u64 {
		self.total_limited.load(Ordering::Relaxed)
	}
}

impl Default for GcraRateLimiter {
	fn default() -> Self {
		Self::new(&RateLimitConfig::default())
	}
}

impl RateLimitPolicy for GcraRateLimiter {
	fn should_allow(&self, addr: IpAddr) -> bool {
		match self.limiter.check_key(&addr) {
			Ok(()) => true,
			Err(_not_until) => {
				self.total_limited.fetch_add(1, Ordering::Relaxed);
				debug!("Request quota exhausted for {}", addr);
				false
			}
		}
	}
}


// vim: ts=4
