//! Session-cookie flows.
//!
//! Logging in, verifying a TOTP secret and registering an OAuth2 client all happen before
//! the caller has a bearer token, so they go through the plain HTTP client and live on the
//! versionless paths. The session cookie returned by [`PrixfixeClient::login`] is what
//! authenticates the OAuth2-client registration that yields machine credentials.

use std::time::{Duration, SystemTime};

use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{Method, Request, StatusCode};
use serde::Serialize;

use crate::client::codec::{build_data_request, decode_error_envelope};
use crate::client::engine::Via;
use crate::client::error::{ClientError, ClientResult};
use crate::client::PrixfixeClient;
use crate::context::Context;
use crate::models::{
    OAuth2Client, OAuth2ClientCreationInput, PasswordUpdateInput, TotpSecretRefreshInput,
    TotpSecretRefreshResponse, TotpSecretVerificationInput, UserCreationInput, UserCreationResponse,
    UserLoginInput,
};

/// A cookie handed out by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
    pub expires: Option<SystemTime>,
    pub max_age: Option<Duration>,
    pub http_only: bool,
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// The `name=value` pair sent back in a `Cookie` header.
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

impl From<reqwest::cookie::Cookie<'_>> for SessionCookie {
    fn from(cookie: reqwest::cookie::Cookie<'_>) -> Self {
        Self {
            name: cookie.name().to_string(),
            value: cookie.value().to_string(),
            path: cookie.path().map(str::to_string),
            domain: cookie.domain().map(str::to_string),
            expires: cookie.expires(),
            max_age: cookie.max_age(),
            http_only: cookie.http_only(),
            secure: cookie.secure(),
        }
    }
}

fn require_cookie(cookie: Option<&SessionCookie>) -> ClientResult<&SessionCookie> {
    match cookie {
        Some(cookie) if !cookie.name.is_empty() => Ok(cookie),
        _ => Err(ClientError::MissingInput("session cookie")),
    }
}

fn with_cookie(mut request: Request, cookie: &SessionCookie) -> ClientResult<Request> {
    let value = HeaderValue::from_str(&cookie.header_value())
        .map_err(|e| ClientError::InvalidRequest(format!("unusable session cookie: {e}")))?;
    request.headers_mut().insert(COOKIE, value);
    Ok(request)
}

impl PrixfixeClient {
    fn build_versionless_data_request<T: Serialize>(
        &self,
        method: Method,
        parts: &[&str],
        body: &T,
    ) -> ClientResult<Request> {
        let url = self.build_versionless_url(None, parts)?;
        build_data_request(method, url, body)
    }

    pub fn build_login_request(&self, input: &UserLoginInput) -> ClientResult<Request> {
        self.build_versionless_data_request(Method::POST, &["users", "login"], input)
    }

    /// Logs in and returns the first cookie the server sets.
    pub async fn login(&self, ctx: &Context, input: &UserLoginInput) -> ClientResult<SessionCookie> {
        tracing::info!("Attempting login for user: {}", input.username);

        let request = self.build_login_request(input)?;
        let response = self.execute_raw(ctx, Via::Plain, request).await?;

        let cookie = response.cookies().next().map(SessionCookie::from);
        let (status, body) = self.read_body(ctx, response).await?;

        if status == StatusCode::UNAUTHORIZED {
            tracing::error!("Login rejected for user: {}", input.username);
            return Err(ClientError::Unauthorized);
        }
        if status.as_u16() >= 400 {
            return Err(decode_error_envelope(&body));
        }

        let cookie = cookie.ok_or(ClientError::NoCookies)?;
        tracing::info!("Login successful for user: {}", input.username);

        Ok(cookie)
    }

    pub fn build_logout_request(&self, cookie: &SessionCookie) -> ClientResult<Request> {
        let url = self.build_versionless_url(None, ["users", "logout"])?;
        with_cookie(Request::new(Method::POST, url), cookie)
    }

    pub async fn logout(&self, ctx: &Context, cookie: Option<&SessionCookie>) -> ClientResult<()> {
        let request = self.build_logout_request(require_cookie(cookie)?)?;
        self.execute_unauthenticated(ctx, request).await
    }

    pub fn build_verify_totp_secret_request(&self, user_id: u64, token: &str) -> ClientResult<Request> {
        let input = TotpSecretVerificationInput {
            user_id,
            totp_token: token.to_string(),
        };
        self.build_versionless_data_request(Method::POST, &["users", "totp_secret", "verify"], &input)
    }

    /// Confirms a freshly issued TOTP secret. The server answers 202 when the token matches.
    pub async fn verify_totp_secret(&self, ctx: &Context, user_id: u64, token: &str) -> ClientResult<()> {
        let request = self.build_verify_totp_secret_request(user_id, token)?;
        let response = self.execute_raw(ctx, Via::Plain, request).await?;
        let (status, _) = self.read_body(ctx, response).await?;

        match status {
            StatusCode::ACCEPTED => Ok(()),
            StatusCode::BAD_REQUEST => Err(ClientError::InvalidTotpToken),
            other => Err(ClientError::ErroneousResponse {
                status: other.as_u16(),
            }),
        }
    }

    pub fn build_new_totp_secret_request(
        &self,
        cookie: &SessionCookie,
        input: &TotpSecretRefreshInput,
    ) -> ClientResult<Request> {
        let request = self.build_versionless_data_request(Method::POST, &["users", "totp_secret", "new"], input)?;
        with_cookie(request, cookie)
    }

    /// Replaces the account's TOTP secret; the new one must be verified again.
    pub async fn new_totp_secret(
        &self,
        ctx: &Context,
        cookie: Option<&SessionCookie>,
        input: &TotpSecretRefreshInput,
    ) -> ClientResult<TotpSecretRefreshResponse> {
        let request = self.build_new_totp_secret_request(require_cookie(cookie)?, input)?;
        self.execute_unauthenticated_and_decode(ctx, request).await
    }

    pub fn build_update_password_request(
        &self,
        cookie: &SessionCookie,
        input: &PasswordUpdateInput,
    ) -> ClientResult<Request> {
        let request = self.build_versionless_data_request(Method::PUT, &["users", "password", "new"], input)?;
        with_cookie(request, cookie)
    }

    pub async fn update_password(
        &self,
        ctx: &Context,
        cookie: Option<&SessionCookie>,
        input: &PasswordUpdateInput,
    ) -> ClientResult<()> {
        let request = self.build_update_password_request(require_cookie(cookie)?, input)?;
        self.execute_unauthenticated(ctx, request).await
    }

    pub fn build_create_oauth2_client_request(
        &self,
        cookie: &SessionCookie,
        input: &OAuth2ClientCreationInput,
    ) -> ClientResult<Request> {
        let request = self.build_versionless_data_request(Method::POST, &["oauth2", "client"], input)?;
        with_cookie(request, cookie)
    }

    /// Exchanges a session cookie for a machine credential pair.
    ///
    /// A missing cookie is rejected before anything is sent.
    pub async fn create_oauth2_client(
        &self,
        ctx: &Context,
        cookie: Option<&SessionCookie>,
        input: &OAuth2ClientCreationInput,
    ) -> ClientResult<OAuth2Client> {
        let cookie = require_cookie(cookie)?;
        let request = self.build_create_oauth2_client_request(cookie, input)?;

        let created: OAuth2Client = self.execute_unauthenticated_and_decode(ctx, request).await?;
        tracing::info!("Registered OAuth2 client {} ({})", created.name, created.client_id);

        Ok(created)
    }

    pub fn build_create_user_request(&self, input: &UserCreationInput) -> ClientResult<Request> {
        self.build_versionless_data_request(Method::POST, &["users"], input)
    }

    pub async fn create_user(&self, ctx: &Context, input: &UserCreationInput) -> ClientResult<UserCreationResponse> {
        let request = self.build_create_user_request(input)?;
        self.execute_unauthenticated_and_decode(ctx, request).await
    }
}
