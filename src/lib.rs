//! # Prixfixe Client Library
//!
//! A typed client for the Prixfixe recipe and meal-planning API. It consists of a few
//! cooperating pieces:
//!
//! ## Client Module
//!
//! The [`client`] module owns the authenticated HTTP runtime: URL construction, OAuth2
//! client-credentials tokens, JSON body handling, status-code mapping, the login / TOTP /
//! OAuth2-client bootstrap handshake, and a generic CRUD surface over every API resource.
//!
//! ## Models
//!
//! The [`models`] module holds the wire types exchanged with the API.
//!
//! ## Outbound integrations
//!
//! The [`circuitbreaking`] module provides the breaker consumed by the [`integrations`]
//! wrappers for analytics reporting and transactional email.
//!
//! ## Quick Start
//!
//! ```no_run
//! use prixfixe_client::{Context, PrixfixeClient};
//! use prixfixe_client::models::ValidInstrument;
//!
//! # async fn example() -> Result<(), prixfixe_client::ClientError> {
//! let base_url = url::Url::parse("https://prixfixe.app").unwrap();
//! let client = PrixfixeClient::new("client-id", "client-secret", base_url, vec!["*".to_string()])?;
//!
//! let ctx = Context::with_timeout(std::time::Duration::from_secs(5));
//! let instruments = client.list::<ValidInstrument>(&ctx, [], None).await?;
//! println!("Found {} instruments", instruments.valid_instruments.len());
//! # Ok(())
//! # }
//! ```

pub mod circuitbreaking;
pub mod client;
pub mod config;
pub mod context;
pub mod integrations;
pub mod models;

pub use client::{ClientError, ErrorKind, PrixfixeClient};
pub use context::Context;
