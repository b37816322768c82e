//! Contact form submission processing

pub mod handler;
pub mod message;

pub use message::Message;

// vim: ts=4
