//! Bearer-token sources.
//!
//! [`ClientCredentialsTokenSource`] runs the OAuth2 client-credentials grant against the
//! server's token endpoint and caches the result. The cache sits behind an async mutex that
//! is held for the whole refresh, so a burst of callers arriving with an expired token
//! triggers a single POST and every caller receives the fresh token.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::Url;

use crate::client::error::{ClientError, ClientResult};
use crate::context::Context;

/// Tokens are refreshed this long before the server says they expire.
const EXPIRY_DELTA: Duration = Duration::from_secs(10);

#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    /// Wall-clock expiry as reported by the token endpoint. `None` never expires.
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "Bearer".to_string(),
            expiry: None,
        }
    }

    pub(crate) fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.access_token.chars().take(4).collect();
        f.debug_struct("Token")
            .field("access_token", &format_args!("{preview}..."))
            .field("token_type", &self.token_type)
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Hands out bearer tokens for authenticated requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn token(&self, ctx: &Context) -> ClientResult<Token>;
}

/// A fixed token, for callers that obtained one elsewhere.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: Token,
}

impl StaticTokenSource {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: Token::bearer(access_token),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self, _ctx: &Context) -> ClientResult<Token> {
        Ok(self.token.clone())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    token: Token,
    refresh_at: Option<Instant>,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        match self.refresh_at {
            Some(at) => Instant::now() < at,
            None => true,
        }
    }
}

/// OAuth2 client-credentials grant with an in-memory cache.
pub struct ClientCredentialsTokenSource {
    client_id: String,
    client_secret: String,
    token_url: Url,
    scopes: Vec<String>,
    http: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl fmt::Debug for ClientCredentialsTokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentialsTokenSource")
            .field("client_id", &self.client_id)
            .field("token_url", &self.token_url.as_str())
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

impl ClientCredentialsTokenSource {
    /// Empty credentials are accepted here; the first call to [`TokenSource::token`] fails.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: Url,
        scopes: Vec<String>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token_url,
            scopes,
            http,
            cached: Mutex::new(None),
        }
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    async fn fetch(&self, ctx: &Context) -> ClientResult<CachedToken> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ClientError::TokenAcquisition(
                "client credentials are not configured".to_string(),
            ));
        }

        let mut form = vec![("grant_type", "client_credentials".to_string())];
        if !self.scopes.is_empty() {
            form.push(("scope", self.scopes.join(" ")));
        }

        tracing::debug!("Requesting access token from: {}", self.token_url);

        let request = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&form)
            .send();

        let response = ctx.run(request).await.map_err(|e| {
            tracing::error!("Network error during token acquisition: {}", e);
            e
        })?;

        let status = response.status();
        let body = ctx.run(response.bytes()).await?;

        if !status.is_success() {
            tracing::error!("Token endpoint returned status {}", status);
            return Err(ClientError::TokenAcquisition(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            )));
        }

        let parsed: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| ClientError::TokenAcquisition(format!("unreadable token response: {e}")))?;

        if parsed.access_token.is_empty() {
            return Err(ClientError::TokenAcquisition(
                "token endpoint returned an empty access token".to_string(),
            ));
        }

        let lifetime = parsed.expires_in.map(Duration::from_secs);
        let refresh_at = lifetime.and_then(|life| {
            Instant::now().checked_add(life.saturating_sub(EXPIRY_DELTA))
        });
        let expiry = lifetime
            .and_then(|life| chrono::Duration::from_std(life).ok())
            .and_then(|life| Utc::now().checked_add_signed(life));

        tracing::info!("Acquired access token for client: {}", self.client_id);

        Ok(CachedToken {
            token: Token {
                access_token: parsed.access_token,
                token_type: parsed.token_type.unwrap_or_else(|| "Bearer".to_string()),
                expiry,
            },
            refresh_at,
        })
    }
}

#[async_trait]
impl TokenSource for ClientCredentialsTokenSource {
    async fn token(&self, ctx: &Context) -> ClientResult<Token> {
        let mut cached = self.cached.lock().await;

        if let Some(current) = cached.as_ref().filter(|c| c.is_fresh()) {
            return Ok(current.token.clone());
        }

        let fresh = self.fetch(ctx).await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);

        Ok(token)
    }
}

/// HTTP client that attaches a bearer token from its [`TokenSource`] to every request.
#[derive(Clone)]
pub struct AuthenticatedClient {
    http: reqwest::Client,
    tokens: Arc<dyn TokenSource>,
}

impl fmt::Debug for AuthenticatedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedClient").finish_non_exhaustive()
    }
}

impl AuthenticatedClient {
    pub fn new(http: reqwest::Client, tokens: Arc<dyn TokenSource>) -> Self {
        Self { http, tokens }
    }

    pub fn token_source(&self) -> Arc<dyn TokenSource> {
        Arc::clone(&self.tokens)
    }

    /// Acquires a token, sets `Authorization`, then sends the request.
    pub async fn execute(&self, ctx: &Context, mut request: Request) -> ClientResult<Response> {
        let token = self.tokens.token(ctx).await?;
        let value = HeaderValue::from_str(&token.authorization_header())
            .map_err(|e| ClientError::InvalidRequest(format!("unusable access token: {e}")))?;
        request.headers_mut().insert(AUTHORIZATION, value);

        ctx.run(self.http.execute(request)).await
    }
}
