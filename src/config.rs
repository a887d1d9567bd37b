//! Environment-driven configuration.
//!
//! Values are read from the process environment after loading a `.env` file, if one exists.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::client::transport::MAX_TIMEOUT;
use crate::client::{ClientResult, PrixfixeClient};
use crate::models::{OAuth2ClientCreationInput, UserLoginInput};

pub const BASE_URL_VAR: &str = "PRIXFIXE_BASE_URL";
pub const CLIENT_ID_VAR: &str = "PRIXFIXE_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "PRIXFIXE_CLIENT_SECRET";
pub const SCOPES_VAR: &str = "PRIXFIXE_SCOPES";
pub const TIMEOUT_VAR: &str = "PRIXFIXE_TIMEOUT_SECS";
pub const DEBUG_VAR: &str = "PRIXFIXE_DEBUG";

pub const USERNAME_VAR: &str = "PRIXFIXE_USERNAME";
pub const PASSWORD_VAR: &str = "PRIXFIXE_PASSWORD";
pub const TOTP_TOKEN_VAR: &str = "PRIXFIXE_TOTP_TOKEN";
pub const OAUTH2_CLIENT_NAME_VAR: &str = "PRIXFIXE_OAUTH2_CLIENT_NAME";
pub const REDIRECT_URI_VAR: &str = "PRIXFIXE_REDIRECT_URI";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_OAUTH2_CLIENT_NAME: &str = "prixfixe-cli";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("invalid URL in {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", path.display());
    }
}

/// Settings for constructing a [`PrixfixeClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    pub timeout: Duration,
    pub debug: bool,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();

        let raw_url = optional(BASE_URL_VAR).ok_or(ConfigError::Missing(BASE_URL_VAR))?;
        let base_url = Url::parse(raw_url.trim()).map_err(|source| ConfigError::InvalidUrl {
            key: BASE_URL_VAR,
            source,
        })?;

        let scopes = optional(SCOPES_VAR)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| vec!["*".to_string()]);

        let timeout_secs = parsed(TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT.as_secs() {
            return Err(ConfigError::InvalidValue {
                key: TIMEOUT_VAR.to_string(),
                value: timeout_secs.to_string(),
            });
        }

        Ok(Self {
            base_url,
            client_id: optional(CLIENT_ID_VAR).unwrap_or_default(),
            client_secret: optional(CLIENT_SECRET_VAR).unwrap_or_default(),
            scopes,
            timeout: Duration::from_secs(timeout_secs),
            debug: parsed(DEBUG_VAR, false)?,
        })
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn into_client(self) -> ClientResult<PrixfixeClient> {
        PrixfixeClient::builder(self.base_url)
            .credentials(self.client_id, self.client_secret)
            .scopes(self.scopes)
            .timeout(self.timeout)
            .debug(self.debug)
            .build()
    }
}

/// Account credentials for registering an OAuth2 client through the login handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapCredentials {
    pub username: String,
    pub password: String,
    pub totp_token: String,
    pub client_name: String,
    pub redirect_uri: String,
}

impl BootstrapCredentials {
    /// `None` unless username, password and TOTP token are all set.
    pub fn from_env() -> Option<Self> {
        load_dotenv();

        Some(Self {
            username: optional(USERNAME_VAR)?,
            password: optional(PASSWORD_VAR)?,
            totp_token: optional(TOTP_TOKEN_VAR)?,
            client_name: optional(OAUTH2_CLIENT_NAME_VAR).unwrap_or_else(|| DEFAULT_OAUTH2_CLIENT_NAME.to_string()),
            redirect_uri: optional(REDIRECT_URI_VAR).unwrap_or_default(),
        })
    }

    pub fn login_input(&self) -> UserLoginInput {
        UserLoginInput {
            username: self.username.clone(),
            password: self.password.clone(),
            totp_token: self.totp_token.clone(),
        }
    }

    pub fn oauth2_client_input(&self, scopes: &[String]) -> OAuth2ClientCreationInput {
        OAuth2ClientCreationInput {
            login: self.login_input(),
            name: self.client_name.clone(),
            redirect_uri: self.redirect_uri.clone(),
            scopes: scopes.to_vec(),
            belongs_to_user: 0,
        }
    }
}
