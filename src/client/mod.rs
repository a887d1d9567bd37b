//! # Prixfixe HTTP Client
//!
//! This module provides the HTTP runtime for the Prixfixe API: URL construction, bearer
//! tokens, body encoding, status-code mapping and the typed resource surface built on
//! top of them.
//!
//! ## Modules
//!
//! - [`client`] - [`PrixfixeClient`], its builder, URL construction and health checks
//! - [`transport`] - the default `reqwest` client settings
//! - [`token`] - OAuth2 client-credentials token sources
//! - [`codec`] - JSON request bodies and response decoding
//! - [`engine`] - request execution and status-to-error mapping
//! - [`auth`] - login, TOTP verification, user and OAuth2-client registration
//! - [`resources`] - the resource table: one endpoint description per API resource
//! - [`operations`] - the generic exists/get/list/search/create/update/archive surface
//! - [`error`] - [`ClientError`] and [`ErrorKind`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use prixfixe_client::client::PrixfixeClient;
//! use prixfixe_client::models::{UserLoginInput, OAuth2ClientCreationInput};
//! use prixfixe_client::Context;
//!
//! # async fn example() -> Result<(), prixfixe_client::ClientError> {
//! let base_url = url::Url::parse("http://localhost:8888").unwrap();
//! let client = PrixfixeClient::new_simple(base_url)?;
//! let ctx = Context::background();
//!
//! let login = UserLoginInput {
//!     username: "chef".to_string(),
//!     password: "hunter2hunter2".to_string(),
//!     totp_token: "123456".to_string(),
//! };
//! let cookie = client.login(&ctx, &login).await?;
//!
//! let input = OAuth2ClientCreationInput {
//!     login,
//!     name: "kitchen-display".to_string(),
//!     ..Default::default()
//! };
//! let registered = client.create_oauth2_client(&ctx, Some(&cookie), &input).await?;
//! println!("client id: {}", registered.client_id);
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod codec;
pub mod engine;
pub mod error;
pub mod operations;
pub mod resources;
pub mod token;
pub mod transport;

pub use auth::SessionCookie;
pub use client::{ClientBuilder, PrixfixeClient, QueryValues};
pub use engine::Via;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use resources::{Creatable, Endpoint, Existable, ParentIds, Resource, Searchable, Updatable};
pub use token::{AuthenticatedClient, ClientCredentialsTokenSource, StaticTokenSource, Token, TokenSource};
