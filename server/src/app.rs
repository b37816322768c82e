//! App state type

use std::sync::Arc;
use std::time::Duration;

use formilo_core::rate_limit::{GcraRateLimiter, RateLimitPolicy};
use formilo_core::telemetry::Telemetry;
use formilo_types::client::ClientRegistry;

use crate::config::AppConfig;
use crate::delivery::HandlerSet;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	/// Registered clients, read-only after startup
	pub clients: ClientRegistry,
	/// Per-IP throttling policy
	pub limiter: Arc<dyn RateLimitPolicy>,
	/// Delivery backends, dispatched in registration order
	pub handlers: HandlerSet,
	/// Request outcome counters
	pub telemetry: Telemetry,
	/// Trust forwarding headers when resolving the client IP
	pub behind_proxy: bool,
	/// Upper bound on a single backend's delivery attempt
	pub delivery_timeout: Duration,
}

pub type App = Arc<AppState>;

impl AppState {
	pub fn from_config(config: &AppConfig) -> Self {
		Self {
			clients: ClientRegistry::new(config.clients.iter().cloned()),
			limiter: Arc::new(GcraRateLimiter::new(&config.rate_limit)),
			handlers: HandlerSet::new(),
			telemetry: Telemetry::new(),
			behind_proxy: config.behind_proxy,
			delivery_timeout: Duration::from_secs(config.delivery_timeout_secs),
		}
	}
}

// vim: ts=4
