//! Formilo is a small self-hosted relay for website contact forms.
//!
//! # Features
//!
//!	- Multi-client (one instance serves any number of registered sites)
//!	- Honeypot filtering of automated submissions
//!	- Per-IP request throttling
//!	- Fan-out delivery to pluggable backends (SMTP included)
//!	- Single YAML configuration file

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod app;
pub mod config;
pub mod contact;
pub mod delivery;
pub mod prelude;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::prelude::*;

pub use crate::app::{App, AppState};
pub use crate::config::AppConfig;

/// Build the application from its configuration and serve it until the
/// listener fails.
pub async fn run(config: AppConfig) -> FlResult<()> {
	let app = Arc::new(AppState::from_config(&config));

	if let Some(smtp) = &config.smtp {
		app.handlers.add(Arc::new(delivery::smtp::SmtpDelivery::new(smtp.clone())?));
	}
	if app.handlers.snapshot().is_empty() {
		warn!("No delivery backend configured, accepted submissions will go nowhere");
	}

	let router = routes::init(app.clone());
	let listener = tokio::net::TcpListener::bind(config.listen.as_ref()).await?;
	info!("Listening on {}", config.listen);

	axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>()).await?;
	Ok(())
}

// vim: ts=4
