//! Error taxonomy for the submission pipeline.
//!
//! Two families of failures exist: client-caused rejections (malformed
//! requests, tripped honeypot, unknown tenant, failed validation) surfaced
//! as 4xx, and backend delivery failures surfaced as 500. Throttling is a
//! distinguished 429 case. The pipeline never retries; it returns exactly
//! one of these per request.

use axum::{http::StatusCode, response::IntoResponse};

pub type FlResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// A required form field was absent from the request
	MissingField(&'static str),
	/// The honeypot field was absent or carried a value
	BotDetected,
	/// The submitted realm does not resolve to a registered client
	UnknownClient,
	/// Message construction failed; carries the human-readable reason
	ValidationError(String),
	/// The source identity exceeded its request quota
	RateLimited,
	/// A delivery backend failed; aborts the fan-out
	DeliveryFailed(String),
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::MissingField(field) => write!(f, "missing required field '{}'", field),
			Error::BotDetected => write!(f, "honeypot field missing or not empty"),
			Error::UnknownClient => write!(f, "unknown client realm"),
			Error::ValidationError(reason) => write!(f, "{}", reason),
			Error::RateLimited => write!(f, "rate limit exceeded"),
			Error::DeliveryFailed(reason) => write!(f, "delivery failed: {}", reason),
			Error::ConfigError(reason) => write!(f, "configuration error: {}", reason),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		match self {
			Error::MissingField(_) | Error::BotDetected | Error::UnknownClient => {
				StatusCode::BAD_REQUEST.into_response()
			}
			Error::ValidationError(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
			Error::RateLimited => {
				(StatusCode::TOO_MANY_REQUESTS, "Rate Limit Exceeded").into_response()
			}
			Error::DeliveryFailed(_) | Error::ConfigError(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR.into_response()
			}
		}
	}
}


// vim: ts=4
