//! # phpipam-core
//!
//! Core types and utilities for working with the phpIPAM REST API.
//!
//! This crate provides the error type, HTTP client settings, validated client
//! configuration and the wire-level response envelope shared by the client
//! crate.
//!
//! ## Modules
//!
//! - [`error`] - Error type and error-code mapping
//! - [`client`] - HTTP client settings and default timeouts
//! - [`config`] - Validated connection configuration (file or environment)
//! - [`types`] - Response envelope and lenient field deserializers
//! - [`query`] - Query parameter builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::Envelope;
