//! Validated contact message construction.

use lettre::Address;

use crate::prelude::*;

/// One contact submission. An instance only exists with all fields
/// well-formed; construction fails otherwise, so everything downstream of
/// the validation gate can rely on the invariants without re-checking.
#[derive(Clone, Debug)]
pub struct Message {
	name: Box<str>,
	body: Box<str>,
	sender: Address,
}

impl Message {
	/// Build a message from raw form values.
	///
	/// Fields are checked in a fixed order (name, body, sender address) so
	/// the reported failure is deterministic when several fields are bad.
	/// Address validation is syntactic only, not a deliverability check.
	pub fn new(name: &str, body: &str, sender: &str) -> FlResult<Self> {
		if name.trim().is_empty() {
			return Err(Error::ValidationError("Name must not be empty".into()));
		}
		if body.trim().is_empty() {
			return Err(Error::ValidationError("Message must not be empty".into()));
		}
		let sender: Address = sender.parse().map_err(|_| {
			Error::ValidationError(format!("Sender address '{}' is not valid", sender))
		})?;

		Ok(Self { name: name.into(), body: body.into(), sender })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn body(&self) -> &str {
		&self.body
	}

	pub fn sender(&self) -> &Address {
		&self.sender
	}
}


// vim: ts=4
