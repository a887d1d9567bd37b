//! Wire types for the Prixfixe API.
//!
//! Field names follow the server's camelCase JSON. Entity timestamps are unix seconds,
//! as the server emits them. Creation inputs for nested resources carry their parent id
//! for the caller's convenience, but never serialise it: the parent is addressed by the
//! request path and the server ignores any body value.
//!
//! ## Key Types
//!
//! - [`ErrorResponse`] - the `{code, message}` envelope returned on 4xx/5xx
//! - [`QueryFilter`] - optional paging/time-window/sort parameters for list requests
//! - [`Pagination`] - paging metadata flattened into every list response

mod filter;
mod invitations;
mod oauth2;
mod recipes;
mod reports;
mod users;
mod valid;
mod webhooks;

use serde::{Deserialize, Serialize};

pub use filter::{QueryFilter, SortDirection, DEFAULT_LIMIT, MAX_LIMIT};
pub use invitations::*;
pub use oauth2::*;
pub use recipes::*;
pub use reports::*;
pub use users::*;
pub use valid::*;
pub use webhooks::*;

/// Error envelope the server returns alongside any status of 400 or above.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorResponse {
    /// HTTP-derived numeric code
    pub code: u16,
    /// Human-readable description
    pub message: String,
}

/// Paging metadata shared by all list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub page: u64,
    pub limit: u8,
    pub total_count: u64,
}
