//! Rate limiting configuration.

use serde::Deserialize;
use std::num::NonZeroU32;

/// Quota for a single source identity: `max_requests` per `window_secs`.
#[derive(Clone, Debug, Deserialize)]
pub struct RateLimitConfig {
	/// Requests allowed per window
	#[serde(default = "default_max_requests")]
	pub max_requests: NonZeroU32,
	/// Window length in seconds
	#[serde(default = "default_window_secs")]
	pub window_secs: u64,
}

fn default_max_requests() -> NonZeroU32 {
	const FIVE: NonZeroU32 = match NonZeroU32::new(5) {
		Some(v) => v,
		None => unreachable!(),
	};
	FIVE
}

fn default_window_secs() -> u64 {
	60
}

impl Default for RateLimitConfig {
	fn default() -> Self {
		Self { max_requests: default_max_requests(), window_secs: default_window_secs() }
	}
}


// vim: ts=4
