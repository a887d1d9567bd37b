//! Error types for the Prixfixe client.
//!
//! Every failure surfaces as a [`ClientError`]. Callers that only care about the broad
//! category of a failure should match on [`ClientError::kind`] instead of on the variants.

use crate::models::ErrorResponse;

/// Broad classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server answered 404.
    NotFound,
    /// The server answered 401.
    Unauthorized,
    /// The TOTP verification endpoint answered 400.
    InvalidTotpToken,
    /// The server answered with a decodable `{code, message}` envelope.
    ApiError,
    /// A status code the calling flow has no mapping for.
    ErroneousResponse,
    /// A body could be parsed neither as the expected type nor as an error envelope.
    Decode,
    /// The request could not be constructed. Nothing was sent.
    Build,
    /// Login succeeded at the HTTP level but no session cookie came back.
    NoCookies,
    /// The token endpoint refused the client credentials.
    TokenAcquisition,
    /// The HTTP stack failed, or the call was cancelled or timed out.
    Transport,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("resource not found")]
    NotFound,

    #[error("not authorized")]
    Unauthorized,

    #[error("invalid TOTP token")]
    InvalidTotpToken,

    #[error("erroneous response from server: status {status}")]
    ErroneousResponse { status: u16 },

    #[error("API error: {0}")]
    Api(#[from] ErrorResponse),

    #[error("decoding response body ({} bytes): {source}", body.len())]
    Decode {
        #[source]
        source: serde_json::Error,
        body: Vec<u8>,
    },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("base URL cannot carry a path: {0}")]
    CannotBeABase(String),

    #[error("encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("required input missing: {0}")]
    MissingInput(&'static str),

    #[error("building request: {0}")]
    InvalidRequest(String),

    #[error("no cookies returned from request")]
    NoCookies,

    #[error("acquiring access token: {0}")]
    TokenAcquisition(String),

    #[error("executing request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound => ErrorKind::NotFound,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::InvalidTotpToken => ErrorKind::InvalidTotpToken,
            Self::ErroneousResponse { .. } => ErrorKind::ErroneousResponse,
            Self::Api(_) => ErrorKind::ApiError,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidUrl(_)
            | Self::CannotBeABase(_)
            | Self::Encode(_)
            | Self::MissingInput(_)
            | Self::InvalidRequest(_) => ErrorKind::Build,
            Self::NoCookies => ErrorKind::NoCookies,
            Self::TokenAcquisition(_) => ErrorKind::TokenAcquisition,
            Self::Transport(_) | Self::Cancelled | Self::DeadlineExceeded => ErrorKind::Transport,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// The decoded server envelope, when the failure carried one.
    pub fn api_error(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api(envelope) => Some(envelope),
            _ => None,
        }
    }

    pub(crate) fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        Self::Decode {
            source,
            body: body.to_vec(),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
