use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Request};
use url::Url;

use crate::client::error::{ClientError, ClientResult};
use crate::client::token::{AuthenticatedClient, ClientCredentialsTokenSource, TokenSource};
use crate::client::transport::{self, DEFAULT_TIMEOUT};
use crate::context::Context;

/// Query parameters keyed by server-defined names. Keys encode in sorted order.
pub type QueryValues = BTreeMap<String, Vec<String>>;

const API_PREFIX: [&str; 2] = ["api", "v1"];
const TOKEN_PATH: &str = "/oauth2/token";
const AUTHORIZATION_PATH: &str = "/oauth2/authorize";
const HEALTH_CHECK_PATH: &str = "/_meta_/ready";

/// Client for the Prixfixe API.
///
/// Holds two HTTP clients over one connection pool: a plain one for the session-cookie
/// endpoints (login, registration, TOTP) and an authenticated one that attaches a bearer
/// token from the configured [`TokenSource`] to every request.
///
/// Cloning is cheap and clones share the token cache and the connection pool.
#[derive(Clone)]
pub struct PrixfixeClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    plain: reqwest::Client,
    authed: AuthenticatedClient,
    scopes: Vec<String>,
    debug: AtomicBool,
}

impl fmt::Debug for PrixfixeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrixfixeClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("scopes", &self.inner.scopes)
            .field("debug", &self.is_debug())
            .finish_non_exhaustive()
    }
}

/// Configures a [`PrixfixeClient`].
pub struct ClientBuilder {
    base_url: Url,
    client_id: String,
    client_secret: String,
    scopes: Vec<String>,
    timeout: Duration,
    debug: bool,
    http: Option<reqwest::Client>,
    token_source: Option<Arc<dyn TokenSource>>,
}

impl ClientBuilder {
    pub fn credentials(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }

    /// Scopes requested from the token endpoint. Defaults to `*`.
    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Total per-request timeout of the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replaces the default transport. The `User-Agent` header is still set per request.
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Replaces the client-credentials token source.
    pub fn token_source(mut self, source: Arc<dyn TokenSource>) -> Self {
        self.token_source = Some(source);
        self
    }

    pub fn build(self) -> ClientResult<PrixfixeClient> {
        let http = match self.http {
            Some(http) => http,
            None => transport::build_default_transport(self.timeout)?,
        };

        let scopes = if self.scopes.is_empty() {
            vec!["*".to_string()]
        } else {
            self.scopes
        };

        let tokens: Arc<dyn TokenSource> = match self.token_source {
            Some(source) => source,
            None => Arc::new(ClientCredentialsTokenSource::new(
                self.client_id,
                self.client_secret,
                with_path(&self.base_url, TOKEN_PATH),
                scopes.clone(),
                http.clone(),
            )),
        };

        if self.base_url.cannot_be_a_base() {
            tracing::warn!("Base URL {} cannot carry a path; requests will fail", self.base_url);
        }

        Ok(PrixfixeClient {
            inner: Arc::new(ClientInner {
                base_url: self.base_url,
                authed: AuthenticatedClient::new(http.clone(), tokens),
                plain: http,
                scopes,
                debug: AtomicBool::new(self.debug),
            }),
        })
    }
}

impl PrixfixeClient {
    pub fn builder(base_url: Url) -> ClientBuilder {
        ClientBuilder {
            base_url,
            client_id: String::new(),
            client_secret: String::new(),
            scopes: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            http: None,
            token_source: None,
        }
    }

    /// A client that acquires bearer tokens with the client-credentials grant.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: Url,
        scopes: Vec<String>,
    ) -> ClientResult<Self> {
        Self::builder(base_url)
            .credentials(client_id, client_secret)
            .scopes(scopes)
            .build()
    }

    /// A client without credentials, for the login and registration flows.
    ///
    /// Authenticated calls made through it fail at token acquisition.
    pub fn new_simple(base_url: Url) -> ClientResult<Self> {
        Self::builder(base_url).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn scopes(&self) -> &[String] {
        &self.inner.scopes
    }

    pub fn plain_client(&self) -> &reqwest::Client {
        &self.inner.plain
    }

    pub fn authenticated_client(&self) -> &AuthenticatedClient {
        &self.inner.authed
    }

    pub fn token_source(&self) -> Arc<dyn TokenSource> {
        self.inner.authed.token_source()
    }

    pub fn token_url(&self) -> Url {
        with_path(&self.inner.base_url, TOKEN_PATH)
    }

    pub fn authorization_url(&self) -> Url {
        with_path(&self.inner.base_url, AUTHORIZATION_PATH)
    }

    /// Toggles logging of response bodies.
    pub fn set_debug(&self, debug: bool) {
        self.inner.debug.store(debug, Ordering::Relaxed);
    }

    pub fn is_debug(&self) -> bool {
        self.inner.debug.load(Ordering::Relaxed)
    }

    /// Resolves `api/v1/{parts...}` against the base URL, with an optional query string.
    ///
    /// Resolution follows RFC 3986: the base keeps its path only when it ends in `/`.
    /// `https://host/kitchen/` yields `https://host/kitchen/api/v1/...`, while
    /// `https://host/kitchen` yields `https://host/api/v1/...`.
    pub fn build_url<I, S>(&self, query: Option<&QueryValues>, parts: I) -> ClientResult<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build_raw_url(query, true, parts)
    }

    /// Like [`build_url`](Self::build_url) without the `api/v1` prefix.
    pub fn build_versionless_url<I, S>(&self, query: Option<&QueryValues>, parts: I) -> ClientResult<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build_raw_url(query, false, parts)
    }

    /// A versioned URL with the scheme replaced by `ws`.
    pub fn build_websocket_url<I, S>(&self, parts: I) -> ClientResult<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.build_url(None, parts)?;
        url.set_scheme("ws")
            .map_err(|_| ClientError::InvalidRequest(format!("cannot use ws scheme for {url}")))?;
        Ok(url)
    }

    fn build_raw_url<I, S>(&self, query: Option<&QueryValues>, versioned: bool, parts: I) -> ClientResult<Url>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.inner.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::CannotBeABase(self.inner.base_url.to_string()))?;
            // Drop the last segment, empty or not, the way a relative reference merges.
            segments.pop();
            if versioned {
                segments.extend(API_PREFIX);
            }
            for part in parts {
                segments.push(part.as_ref());
            }
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, values) in query {
                for value in values {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }

    /// `GET {scheme}://{host}/_meta_/ready`, ignoring any path on the base URL.
    pub fn build_health_check_request(&self) -> ClientResult<Request> {
        let url = self.inner.base_url.join(HEALTH_CHECK_PATH)?;
        Ok(Request::new(Method::GET, url))
    }

    /// Whether the server reports ready. Any failure counts as down.
    pub async fn is_up(&self, ctx: &Context) -> bool {
        let request = match self.build_health_check_request() {
            Ok(request) => request,
            Err(e) => {
                tracing::error!("Building health check request: {}", e);
                return false;
            }
        };

        match self.execute_raw(ctx, crate::client::engine::Via::Plain, request).await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!("Health check response status: {}", status);
                status == reqwest::StatusCode::OK
            }
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}

/// Copy of `base` with its path overwritten, query and fragment dropped.
fn with_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    url.set_path(path);
    url.set_query(None);
    url.set_fragment(None);
    url
}
