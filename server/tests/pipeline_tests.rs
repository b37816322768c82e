//! Integration tests for the submission pipeline.
//!
//! These drive `contact::handler::process` directly with plain field maps,
//! using recording delivery backends in place of real transports.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use formilo::app::AppState;
use formilo::contact::handler::process;
use formilo::contact::Message;
use formilo::delivery::{HandlerSet, MessageHandler};
use formilo_core::rate_limit::{GcraRateLimiter, RateLimitConfig, RateLimitPolicy};
use formilo_core::telemetry::Telemetry;
use formilo_types::client::{ClientConfig, ClientRegistry};
use formilo_types::error::{Error, FlResult};

type CallLog = Arc<Mutex<Vec<&'static str>>>;

struct RecordingHandler {
	label: &'static str,
	log: CallLog,
	fail: bool,
}

#[async_trait]
impl MessageHandler for RecordingHandler {
	fn name(&self) -> &'static str {
		self.label
	}

	async fn send(&self, _message: &Message, _client: &ClientConfig) -> FlResult<()> {
		self.log.lock().push(self.label);
		if self.fail {
			Err(Error::DeliveryFailed("backend refused the message".into()))
		} else {
			Ok(())
		}
	}
}

struct SlowHandler;

#[async_trait]
impl MessageHandler for SlowHandler {
	fn name(&self) -> &'static str {
		"slow"
	}

	async fn send(&self, _message: &Message, _client: &ClientConfig) -> FlResult<()> {
		tokio::time::sleep(Duration::from_secs(30)).await;
		Ok(())
	}
}

struct AllowAll;

impl RateLimitPolicy for AllowAll {
	fn should_allow(&self, _addr: IpAddr) -> bool {
		true
	}
}

struct DenyAll;

impl RateLimitPolicy for DenyAll {
	fn should_allow(&self, _addr: IpAddr) -> bool {
		false
	}
}

fn test_state(limiter: Arc<dyn RateLimitPolicy>) -> AppState {
	AppState {
		clients: ClientRegistry::new([ClientConfig {
			public_key: "tenantKey123".into(),
			display_name: Some("Acme Shop".into()),
			recipient: "sales@acme.example".into(),
		}]),
		limiter,
		handlers: HandlerSet::new(),
		telemetry: Telemetry::new(),
		behind_proxy: false,
		delivery_timeout: Duration::from_secs(5),
	}
}

fn valid_fields() -> HashMap<String, String> {
	[
		("name", "Ann"),
		("message", "Hello"),
		("email", "ann@example.com"),
		("email_h_v", ""),
		("realm", "tenantKey123"),
	]
	.into_iter()
	.map(|(k, v)| (k.to_string(), v.to_string()))
	.collect()
}

fn ip() -> IpAddr {
	IpAddr::V4(Ipv4Addr::new(203, 0, 113, 9))
}

fn add_recorder(state: &AppState, label: &'static str, log: &CallLog, fail: bool) {
	state.handlers.add(Arc::new(RecordingHandler { label, log: log.clone(), fail }));
}

#[tokio::test]
async fn test_valid_submission_is_accepted() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	let result = process(&state, &valid_fields(), ip()).await;

	assert!(result.is_ok());
	assert_eq!(*log.lock(), ["primary"]);

	let snapshot = state.telemetry.snapshot();
	assert_eq!(snapshot.received, 1);
	assert_eq!(snapshot.accepted, 1);
	assert_eq!(snapshot.rejected, 0);
}

#[tokio::test]
async fn test_missing_fields_reject_without_dispatch() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	for field in ["name", "message", "email", "email_h_v", "realm"] {
		let mut fields = valid_fields();
		fields.remove(field);

		let result = process(&state, &fields, ip()).await;
		assert!(
			matches!(result, Err(Error::MissingField(_))),
			"removing '{}' should reject the request",
			field
		);
	}

	assert!(log.lock().is_empty());
	assert_eq!(state.telemetry.snapshot().rejected, 5);
}

#[tokio::test]
async fn test_filled_honeypot_rejects_without_dispatch() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	let mut fields = valid_fields();
	fields.insert("email_h_v".into(), "spam".into());

	let result = process(&state, &fields, ip()).await;

	assert!(matches!(result, Err(Error::BotDetected)));
	assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_honeypot_is_checked_before_realm() {
	let state = test_state(Arc::new(AllowAll));

	// Both the honeypot and the realm are bad; the honeypot verdict wins
	let mut fields = valid_fields();
	fields.insert("email_h_v".into(), "spam".into());
	fields.insert("realm".into(), "noSuchKey".into());

	let result = process(&state, &fields, ip()).await;
	assert!(matches!(result, Err(Error::BotDetected)));
}

#[tokio::test]
async fn test_unknown_realm_rejects() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	for realm in ["noSuchKey", "tenantKey", "tenantKey1234", ""] {
		let mut fields = valid_fields();
		fields.insert("realm".into(), realm.into());

		let result = process(&state, &fields, ip()).await;
		assert!(
			matches!(result, Err(Error::UnknownClient)),
			"realm '{}' should not resolve",
			realm
		);
	}

	assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_invalid_sender_rejects_without_dispatch() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	let mut fields = valid_fields();
	fields.insert("email".into(), "not-an-address".into());

	let result = process(&state, &fields, ip()).await;

	assert!(matches!(result, Err(Error::ValidationError(_))));
	assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_validation_runs_before_rate_limiting() {
	// A malformed request from a throttled source is still a 400, not a 429
	let state = test_state(Arc::new(DenyAll));

	let mut fields = valid_fields();
	fields.insert("email".into(), "not-an-address".into());

	let result = process(&state, &fields, ip()).await;
	assert!(matches!(result, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_all_handlers_run_in_registration_order() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "first", &log, false);
	add_recorder(&state, "second", &log, false);
	add_recorder(&state, "third", &log, false);

	let result = process(&state, &valid_fields(), ip()).await;

	assert!(result.is_ok());
	assert_eq!(*log.lock(), ["first", "second", "third"]);
}

#[tokio::test]
async fn test_first_handler_failure_stops_the_fanout() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "first", &log, false);
	add_recorder(&state, "second", &log, true);
	add_recorder(&state, "third", &log, false);

	let result = process(&state, &valid_fields(), ip()).await;

	assert!(matches!(result, Err(Error::DeliveryFailed(_))));
	assert_eq!(*log.lock(), ["first", "second"]);
	assert_eq!(state.telemetry.snapshot().delivery_failed, 1);
}

#[tokio::test]
async fn test_rate_limit_denies_after_quota() {
	let config = RateLimitConfig {
		max_requests: NonZeroU32::new(2).unwrap(),
		window_secs: 60,
	};
	let state = test_state(Arc::new(GcraRateLimiter::new(&config)));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	assert!(process(&state, &valid_fields(), ip()).await.is_ok());
	assert!(process(&state, &valid_fields(), ip()).await.is_ok());

	let result = process(&state, &valid_fields(), ip()).await;
	assert!(matches!(result, Err(Error::RateLimited)));
	// The throttled request never reached a backend
	assert_eq!(log.lock().len(), 2);

	// A different source identity in the same window is unaffected
	let other = IpAddr::V4(Ipv4Addr::new(198, 51, 100, 70));
	assert!(process(&state, &valid_fields(), other).await.is_ok());

	assert_eq!(state.telemetry.snapshot().throttled, 1);
}

#[tokio::test]
async fn test_rejection_is_idempotent() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "primary", &log, false);

	let mut fields = valid_fields();
	fields.remove("name");

	assert!(matches!(process(&state, &fields, ip()).await, Err(Error::MissingField("name"))));
	assert!(matches!(process(&state, &fields, ip()).await, Err(Error::MissingField("name"))));

	// Rejected requests leave no state behind; a valid one still goes through
	assert!(process(&state, &valid_fields(), ip()).await.is_ok());
	assert_eq!(*log.lock(), ["primary"]);
}

#[tokio::test]
async fn test_handler_timeout_is_a_delivery_failure() {
	let mut state = test_state(Arc::new(AllowAll));
	state.delivery_timeout = Duration::from_millis(50);

	let log: CallLog = Arc::default();
	state.handlers.add(Arc::new(SlowHandler));
	add_recorder(&state, "after-slow", &log, false);

	let result = process(&state, &valid_fields(), ip()).await;

	assert!(matches!(result, Err(Error::DeliveryFailed(_))));
	assert!(log.lock().is_empty());
}

#[tokio::test]
async fn test_replacing_handlers_swaps_the_whole_set() {
	let state = test_state(Arc::new(AllowAll));
	let log: CallLog = Arc::default();
	add_recorder(&state, "old", &log, false);

	state.handlers.replace(vec![
		Arc::new(RecordingHandler { label: "new-a", log: log.clone(), fail: false }),
		Arc::new(RecordingHandler { label: "new-b", log: log.clone(), fail: false }),
	]);

	assert!(process(&state, &valid_fields(), ip()).await.is_ok());
	assert_eq!(*log.lock(), ["new-a", "new-b"]);
}

#[tokio::test]
async fn test_no_handlers_still_accepts() {
	// An empty fan-out set means nothing can fail
	let state = test_state(Arc::new(AllowAll));
	assert!(process(&state, &valid_fields(), ip()).await.is_ok());
	assert_eq!(state.telemetry.snapshot().accepted, 1);
}

// vim: ts=4
