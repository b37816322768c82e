//! Request telemetry collaborator.
//!
//! A plain counter set owned by the application state and passed to the
//! pipeline explicitly. Counters are monotonic and safe to bump from any
//! number of in-flight requests.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Pipeline outcome categories worth counting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TelemetryEvent {
	/// A request entered the pipeline
	Received,
	/// Every delivery backend completed
	Accepted,
	/// Rejected before dispatch for a client-caused reason
	Rejected,
	/// Denied by the rate limiter
	Throttled,
	/// A delivery backend failed mid fan-out
	DeliveryFailed,
}

#[derive(Debug, Default)]
pub struct Telemetry {
	received: AtomicU64,
	accepted: AtomicU64,
	rejected: AtomicU64,
	throttled: AtomicU64,
	delivery_failed: AtomicU64,
}

/// Point-in-time copy of the counters
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
	pub received: u64,
	pub accepted: u64,
	pub rejected: u64,
	pub throttled: u64,
	pub delivery_failed: u64,
}

impl Telemetry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&self, event: TelemetryEvent) {
		let counter = match event {
			TelemetryEvent::Received => &self.received,
			TelemetryEvent::Accepted => &self.accepted,
			TelemetryEvent::Rejected => &self.rejected,
			TelemetryEvent::Throttled => &self.throttled,
			TelemetryEvent::DeliveryFailed => &self.delivery_failed,
		};
		counter.fetch_add(1, Ordering::Relaxed);
	}

	pub fn snapshot(&self) -> TelemetrySnapshot {
		TelemetrySnapshot {
			received: self.received.load(Ordering::Relaxed),
			accepted: self.accepted.load(Ordering::Relaxed),
			rejected: self.rejected.load(Ordering::Relaxed),
			throttled: self.throttled.load(Ordering::Relaxed),
			delivery_failed: self.delivery_failed.load(Ordering::Relaxed),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_counters_start_at_zero() {
		let telemetry = Telemetry::new();
		let snapshot = telemetry.snapshot();

		assert_eq!(snapshot.received, 0);
		assert_eq!(snapshot.accepted, 0);
		assert_eq!(snapshot.rejected, 0);
		assert_eq!(snapshot.throttled, 0);
		assert_eq!(snapshot.delivery_failed, 0);
	}

	#[test]
	fn test_record_bumps_the_matching_counter() {
		let telemetry = Telemetry::new();

		telemetry.record(TelemetryEvent::Received);
		telemetry.record(TelemetryEvent::Received);
		telemetry.record(TelemetryEvent::Rejected);
		telemetry.record(TelemetryEvent::Throttled);
		telemetry.record(TelemetryEvent::Accepted);

		let snapshot = telemetry.snapshot();
		assert_eq!(snapshot.received, 2);
		assert_eq!(snapshot.rejected, 1);
		assert_eq!(snapshot.throttled, 1);
		assert_eq!(snapshot.accepted, 1);
		assert_eq!(snapshot.delivery_failed, 0);
	}
}

// vim: ts=4
