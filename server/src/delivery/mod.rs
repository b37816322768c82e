//! Delivery backends and their registration.

pub mod smtp;

pub use smtp::SmtpDelivery;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use formilo_types::client::ClientConfig;

use crate::contact::message::Message;
use crate::prelude::*;

/// A delivery backend. Anything implementing `send` qualifies; backends are
/// independent of each other and of the pipeline that invokes them.
#[async_trait]
pub trait MessageHandler: Send + Sync {
	/// Short identifier used in logs
	fn name(&self) -> &'static str;

	/// Deliver one validated message on behalf of a client
	async fn send(&self, message: &Message, client: &ClientConfig) -> FlResult<()>;
}

type HandlerList = Arc<[Arc<dyn MessageHandler>]>;

/// Registered delivery backends, dispatched in registration order.
///
/// Readers take a snapshot of the whole list; `replace` and `add` swap the
/// list as a unit, so a request in flight sees either the old or the new
/// set in full, never a mix.
pub struct HandlerSet {
	handlers: RwLock<HandlerList>,
}

impl HandlerSet {
	pub fn new() -> Self {
		Self { handlers: RwLock::new(Vec::new().into()) }
	}

	/// Replace the current handler list with the ones specified
	pub fn replace(&self, handlers: Vec<Arc<dyn MessageHandler>>) {
		debug!("Setting new message handlers");
		*self.handlers.write() = handlers.into();
	}

	/// Append a handler to the list
	pub fn add(&self, handler: Arc<dyn MessageHandler>) {
		debug!("Adding message handler {}", handler.name());
		let mut guard = self.handlers.write();
		let mut list: Vec<Arc<dyn MessageHandler>> = guard.iter().cloned().collect();
		list.push(handler);
		*guard = list.into();
	}

	/// Current handler list; stable for the lifetime of the returned Arc
	pub fn snapshot(&self) -> HandlerList {
		self.handlers.read().clone()
	}
}

impl Default for HandlerSet {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4
