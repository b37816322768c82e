//! SMTP delivery backend using lettre
//!
//! Forwards accepted submissions to the client's configured recipient
//! address, with the visitor's address as Reply-To so the recipient can
//! answer directly.

use async_trait::async_trait;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::SmtpTransport;
use lettre::Transport;
use std::time::Duration;

use formilo_types::client::ClientConfig;

use crate::config::SmtpConfig;
use crate::contact::message::Message;
use crate::delivery::MessageHandler;
use crate::prelude::*;

pub struct SmtpDelivery {
	mailer: SmtpTransport,
	from: Mailbox,
}

impl SmtpDelivery {
	/// Build the transport from startup configuration
	pub fn new(config: SmtpConfig) -> FlResult<Self> {
		let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
			.parse()
			.map_err(|_| Error::ConfigError("Invalid from email format".into()))?;

		let tls = match config.tls_mode.as_ref() {
			"tls" => lettre::transport::smtp::client::Tls::Wrapper(
				lettre::transport::smtp::client::TlsParameters::builder(config.host.to_string())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			),
			"starttls" => lettre::transport::smtp::client::Tls::Opportunistic(
				lettre::transport::smtp::client::TlsParameters::builder(config.host.to_string())
					.build()
					.map_err(|e| Error::ConfigError(format!("TLS configuration error: {}", e)))?,
			),
			"none" => lettre::transport::smtp::client::Tls::None,
			other => {
				return Err(Error::ConfigError(format!(
					"Invalid TLS mode: {}. Must be 'none', 'starttls', or 'tls'",
					other
				)))
			}
		};

		let credentials =
			Credentials::new(config.username.to_string(), config.password.to_string());
		let mailer = SmtpTransport::builder_dangerous(config.host.as_ref())
			.port(config.port)
			.timeout(Some(Duration::from_secs(config.timeout_seconds)))
			.tls(tls)
			.credentials(credentials)
			.build();

		Ok(Self { mailer, from })
	}

	fn build_email(&self, message: &Message, client: &ClientConfig) -> FlResult<lettre::Message> {
		let site = client.display_name.as_deref().unwrap_or(client.public_key.as_ref());
		let to: Mailbox = client.recipient.parse().map_err(|_| {
			Error::ConfigError(format!(
				"Invalid recipient address for client '{}'",
				client.public_key
			))
		})?;
		let reply_to = Mailbox::new(Some(message.name().to_string()), message.sender().clone());

		lettre::Message::builder()
			.from(self.from.clone())
			.reply_to(reply_to)
			.to(to)
			.subject(format!("[{}] New message from {}", site, message.name()))
			.singlepart(SinglePart::plain(message.body().to_string()))
			.map_err(|e| Error::DeliveryFailed(format!("Failed to build email: {}", e)))
	}
}

#[async_trait]
impl MessageHandler for SmtpDelivery {
	fn name(&self) -> &'static str {
		"smtp"
	}

	async fn send(&self, message: &Message, client: &ClientConfig) -> FlResult<()> {
		let email = self.build_email(message, client)?;
		debug!("Sending email to {} for client {}", client.recipient, client.public_key);

		match self.mailer.send(&email) {
			Ok(response) => {
				info!("Email sent to {} (response: {:?})", client.recipient, response);
				Ok(())
			}
			Err(e) => {
				warn!("Failed to send email to {}: {}", client.recipient, e);
				Err(Error::DeliveryFailed(format!("SMTP send failed: {}", e)))
			}
		}
	}
}


// vim: ts=4
