//! Contact submission pipeline.
//!
//! A submission passes through ordered gates: required-field presence,
//! honeypot, client resolution, message validation, rate limiting, and
//! finally sequential fan-out to the registered delivery backends. The
//! first failing gate ends processing. Cheap structural checks run before
//! anything identity-sensitive, so bot traffic is turned away with as
//! little work as possible.

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Form;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use formilo_core::client_ip::resolve_client_ip;
use formilo_core::telemetry::TelemetryEvent;

use crate::app::AppState;
use crate::contact::message::Message;
use crate::prelude::*;

const NAME: &str = "name";
const MESSAGE: &str = "message";
const EMAIL: &str = "email";
const HONEYPOT: &str = "email_h_v";
const CLIENT_ID: &str = "realm";

const REQUIRED_FIELDS: [&str; 5] = [NAME, MESSAGE, EMAIL, HONEYPOT, CLIENT_ID];

/// POST /api/contact
pub async fn post_contact(
	State(app): State<App>,
	ConnectInfo(peer): ConnectInfo<SocketAddr>,
	headers: HeaderMap,
	Form(fields): Form<HashMap<String, String>>,
) -> FlResult<StatusCode> {
	let ip = resolve_client_ip(&headers, peer.ip(), app.behind_proxy);
	process(&app, &fields, ip).await.map(|()| StatusCode::OK)
}

/// Run one submission through every gate.
///
/// Kept independent of the HTTP extractors so tests and alternative
/// transports can drive it with a plain field map.
pub async fn process(
	app: &AppState,
	fields: &HashMap<String, String>,
	ip: IpAddr,
) -> FlResult<()> {
	app.telemetry.record(TelemetryEvent::Received);
	debug!("New request from IP {}", ip);

	if let Some(missing) = REQUIRED_FIELDS.into_iter().find(|field| !fields.contains_key(*field)) {
		debug!("Request missing required field '{}'", missing);
		app.telemetry.record(TelemetryEvent::Rejected);
		return Err(Error::MissingField(missing));
	}

	// A legitimate browser posts the hidden field untouched; anything that
	// filled it in is automated
	if !fields.get(HONEYPOT).is_some_and(String::is_empty) {
		warn!("Honeypot form field missing or not empty");
		app.telemetry.record(TelemetryEvent::Rejected);
		return Err(Error::BotDetected);
	}

	let realm = fields.get(CLIENT_ID).map(String::as_str).unwrap_or_default();
	let Some(client) = (!realm.is_empty()).then(|| app.clients.get(realm)).flatten() else {
		debug!("No active client for realm '{}'", realm);
		app.telemetry.record(TelemetryEvent::Rejected);
		return Err(Error::UnknownClient);
	};

	let field = |key: &str| fields.get(key).map(String::as_str).unwrap_or_default();
	let message = Message::new(field(NAME), field(MESSAGE), field(EMAIL)).inspect_err(|err| {
		debug!("Request validation failed: {}", err);
		app.telemetry.record(TelemetryEvent::Rejected);
	})?;

	if !app.limiter.should_allow(ip) {
		info!("Request from IP {} blocked, rate limit exceeded", ip);
		app.telemetry.record(TelemetryEvent::Throttled);
		return Err(Error::RateLimited);
	}

	// Fail fast: the first backend failure aborts the remaining ones
	let handlers = app.handlers.snapshot();
	for handler in handlers.iter() {
		match tokio::time::timeout(app.delivery_timeout, handler.send(&message, &client)).await {
			Ok(Ok(())) => debug!("Message forwarded to handler {}", handler.name()),
			Ok(Err(err)) => {
				error!("Handler {} failed: {}", handler.name(), err);
				app.telemetry.record(TelemetryEvent::DeliveryFailed);
				return Err(Error::DeliveryFailed(err.to_string()));
			}
			Err(_elapsed) => {
				error!("Handler {} timed out after {:?}", handler.name(), app.delivery_timeout);
				app.telemetry.record(TelemetryEvent::DeliveryFailed);
				return Err(Error::DeliveryFailed(format!(
					"handler {} timed out",
					handler.name()
				)));
			}
		}
	}

	app.telemetry.record(TelemetryEvent::Accepted);
	Ok(())
}

// vim: ts=4
