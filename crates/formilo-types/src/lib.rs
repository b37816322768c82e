//! Shared types for the Formilo contact relay.
//!
//! This crate contains the foundational types shared between the server
//! crate and the infrastructure crate: the error taxonomy with its HTTP
//! response mapping, and the tenant configuration model.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod prelude;

pub use client::{ClientConfig, ClientRegistry};
pub use error::{Error, FlResult};

// vim: ts=4
