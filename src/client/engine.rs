//! Request execution.
//!
//! Every operation funnels through one of the primitives here. They differ in which HTTP
//! client sends the request and in how the response status is interpreted:
//!
//! | primitive | client | status handling |
//! |---|---|---|
//! | [`execute_and_decode`](PrixfixeClient::execute_and_decode) | authenticated | 404, 401 mapped; body decoded |
//! | [`execute_unauthenticated_and_decode`](PrixfixeClient::execute_unauthenticated_and_decode) | plain | 404, 401 mapped; body decoded |
//! | [`retrieve`](PrixfixeClient::retrieve) | authenticated | 404 mapped; body decoded |
//! | [`check_existence`](PrixfixeClient::check_existence) | authenticated | true iff 200 |
//! | [`execute`](PrixfixeClient::execute) | authenticated | 404, 401 mapped; error envelope on 400+ |
//!
//! Nothing is retried.

use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::codec::{decode_error_envelope, unmarshal_body};
use crate::client::error::{ClientError, ClientResult};
use crate::client::transport;
use crate::client::PrixfixeClient;
use crate::context::Context;

/// Which HTTP client sends a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    /// No credentials attached. Used by the session-cookie endpoints.
    Plain,
    /// Bearer token attached from the token source.
    Authenticated,
}

impl PrixfixeClient {
    /// Sends `request` without interpreting the response.
    pub async fn execute_raw(&self, ctx: &Context, via: Via, mut request: Request) -> ClientResult<Response> {
        if !request.headers().contains_key(USER_AGENT) {
            request
                .headers_mut()
                .insert(USER_AGENT, HeaderValue::from_static(transport::USER_AGENT));
        }

        tracing::debug!("{} {} ({:?})", request.method(), request.url(), via);

        let result = match via {
            Via::Plain => ctx.run(self.plain_client().execute(request)).await,
            Via::Authenticated => self.authenticated_client().execute(ctx, request).await,
        };

        result.map_err(|e| {
            tracing::error!("Executing request: {}", e);
            e
        })
    }

    /// Reads the whole body. The connection is released once this returns.
    pub(crate) async fn read_body(&self, ctx: &Context, response: Response) -> ClientResult<(StatusCode, Vec<u8>)> {
        let status = response.status();
        let url = response.url().clone();

        let body = ctx.run(response.bytes()).await.map_err(|e| {
            tracing::error!("Reading response body from {}: {}", url, e);
            e
        })?;

        tracing::debug!("{} responded with status {}", url, status);
        if self.is_debug() {
            tracing::debug!("Response body: {}", String::from_utf8_lossy(&body));
        }

        Ok((status, body.to_vec()))
    }

    async fn dispatch_and_decode<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        via: Via,
        request: Request,
    ) -> ClientResult<T> {
        let response = self.execute_raw(ctx, via, request).await?;
        let (status, body) = self.read_body(ctx, response).await?;

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            _ => unmarshal_body(status.as_u16(), &body),
        }
    }

    async fn dispatch(&self, ctx: &Context, via: Via, request: Request) -> ClientResult<()> {
        let response = self.execute_raw(ctx, via, request).await?;
        let (status, body) = self.read_body(ctx, response).await?;

        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            s if s.as_u16() >= 400 => Err(decode_error_envelope(&body)),
            _ => Ok(()),
        }
    }

    /// Sends through the authenticated client and decodes the body into `T`.
    pub async fn execute_and_decode<T: DeserializeOwned>(&self, ctx: &Context, request: Request) -> ClientResult<T> {
        self.dispatch_and_decode(ctx, Via::Authenticated, request).await
    }

    /// Sends through the plain client and decodes the body into `T`.
    pub async fn execute_unauthenticated_and_decode<T: DeserializeOwned>(
        &self,
        ctx: &Context,
        request: Request,
    ) -> ClientResult<T> {
        self.dispatch_and_decode(ctx, Via::Plain, request).await
    }

    /// Sends through the authenticated client; any success status is accepted and the body discarded.
    pub async fn execute(&self, ctx: &Context, request: Request) -> ClientResult<()> {
        self.dispatch(ctx, Via::Authenticated, request).await
    }

    pub async fn execute_unauthenticated(&self, ctx: &Context, request: Request) -> ClientResult<()> {
        self.dispatch(ctx, Via::Plain, request).await
    }

    /// Fetches a single value. Only 404 is mapped; every other status goes to the codec.
    pub async fn retrieve<T: DeserializeOwned>(&self, ctx: &Context, request: Request) -> ClientResult<T> {
        let response = self.execute_raw(ctx, Via::Authenticated, request).await?;
        let (status, body) = self.read_body(ctx, response).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        unmarshal_body(status.as_u16(), &body)
    }

    /// `Ok(true)` iff the server answered exactly 200. Transport failures are errors.
    pub async fn check_existence(&self, ctx: &Context, request: Request) -> ClientResult<bool> {
        let response = self.execute_raw(ctx, Via::Authenticated, request).await?;
        let status = response.status();
        tracing::debug!("Existence check for {} returned {}", response.url(), status);

        Ok(status == StatusCode::OK)
    }
}
