//! phpIPAM REST API client.
//!
//! This crate exposes typed phpIPAM entities and an asynchronous HTTP client
//! that manages the session token, unwraps the response envelope and maps
//! each API controller onto a resource binding.
//!
//! ```no_run
//! # async fn run() -> phpipam_client::Result<()> {
//! use phpipam_client::PhpIpamClient;
//!
//! let client = PhpIpamClient::new("https://ipam.example.com", "myapp", "admin", "secret", false)?;
//! for section in client.sections().list().await? {
//!     println!("{:?}", section.name);
//! }
//! let next = client.addresses().first_free("7").await?;
//! println!("next free address: {next}");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod services;
pub mod session;

pub use client::{normalize_endpoint, PhpIpamClient, PhpIpamClientBuilder};
pub use phpipam_core::{Envelope, Error};
pub use services::SearchOptions;
pub use session::{Credentials, Session};

/// Convenient result alias matching the shared phpIPAM error type.
pub type Result<T> = phpipam_core::Result<T>;
