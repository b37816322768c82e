//! Client (tenant) configuration model.
//!
//! Each registered client is identified by a public realm key submitted
//! with every form post. The registry is built once from configuration at
//! process start and is read-only afterwards; requests only ever look
//! clients up by exact key match.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::prelude::*;

/// Configuration of one registered client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
	/// Public realm key the client embeds in its form
	pub public_key: Box<str>,

	/// Display name used in delivered messages (e.g., the client's site name)
	pub display_name: Option<Box<str>>,

	/// Address submissions for this client are delivered to
	pub recipient: Box<str>,
}

/// Immutable lookup table of registered clients, keyed by realm public key
#[derive(Debug, Default)]
pub struct ClientRegistry {
	clients: HashMap<Box<str>, Arc<ClientConfig>>,
}

impl ClientRegistry {
	pub fn new(clients: impl IntoIterator<Item = ClientConfig>) -> Self {
		let mut map: HashMap<Box<str>, Arc<ClientConfig>> = HashMap::new();

		for client in clients {
			if map.contains_key(&client.public_key) {
				warn!("Duplicate client public key '{}', keeping the first entry", client.public_key);
				continue;
			}
			map.insert(client.public_key.clone(), Arc::new(client));
		}

		Self { clients: map }
	}

	/// Resolve a realm key to its client configuration. Exact match only.
	pub fn get(&self, realm: &str) -> Option<Arc<ClientConfig>> {
		self.clients.get(realm).cloned()
	}

	pub fn len(&self) -> usize {
		self.clients.len()
	}

	pub fn is_empty(&self) -> bool {
		self.clients.is_empty()
	}
}


// vim: ts=4
