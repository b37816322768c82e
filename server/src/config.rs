//! Configuration file loading.
//!
//! One YAML file supplies everything the process needs: listen address,
//! throttling policy, SMTP transport settings, and the client list. Loaded
//! once at startup; nothing re-reads it afterwards.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use formilo_core::rate_limit::RateLimitConfig;
use formilo_types::client::ClientConfig;
use formilo_types::error::{Error, FlResult};

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
	#[serde(default = "default_listen")]
	pub listen: Box<str>,

	/// Trust forwarding headers from a reverse proxy in front of the relay
	#[serde(default)]
	pub behind_proxy: bool,

	#[serde(default)]
	pub rate_limit: RateLimitConfig,

	/// Upper bound in seconds on a single backend's delivery attempt
	#[serde(default = "default_delivery_timeout_secs")]
	pub delivery_timeout_secs: u64,

	/// SMTP transport settings; without them no email backend is registered
	#[serde(default)]
	pub smtp: Option<SmtpConfig>,

	#[serde(default)]
	pub clients: Vec<ClientConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SmtpConfig {
	pub host: Box<str>,
	#[serde(default = "default_smtp_port")]
	pub port: u16,
	pub username: Box<str>,
	pub password: Box<str>,
	pub from_address: Box<str>,
	#[serde(default = "default_from_name")]
	pub from_name: Box<str>,
	/// One of "none", "starttls", or "tls"
	#[serde(default = "default_tls_mode")]
	pub tls_mode: Box<str>,
	#[serde(default = "default_smtp_timeout_secs")]
	pub timeout_seconds: u64,
}

impl AppConfig {
	pub fn load(path: &Path) -> FlResult<Self> {
		let raw = fs::read_to_string(path)?;
		serde_yaml::from_str(&raw)
			.map_err(|e| Error::ConfigError(format!("Failed to parse {}: {}", path.display(), e)))
	}
}

fn default_listen() -> Box<str> {
	"127.0.0.1:8025".into()
}

fn default_delivery_timeout_secs() -> u64 {
	30
}

fn default_smtp_port() -> u16 {
	587
}

fn default_from_name() -> Box<str> {
	"Formilo".into()
}

fn default_tls_mode() -> Box<str> {
	"starttls".into()
}

fn default_smtp_timeout_secs() -> u64 {
	10
}


// vim: ts=4
