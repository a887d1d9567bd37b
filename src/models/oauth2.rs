use serde::{Deserialize, Serialize};

use super::{Pagination, UserLoginInput};

/// A registered OAuth2 client. The secret is only populated in the creation response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OAuth2Client {
    pub id: u64,
    pub name: String,
    #[serde(rename = "clientID")]
    pub client_id: String,
    pub client_secret: String,
    #[serde(rename = "redirectURI")]
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub implicit_allowed: bool,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OAuth2ClientList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub clients: Vec<OAuth2Client>,
}

/// Registration requires the owner's credentials in addition to the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuth2ClientCreationInput {
    #[serde(flatten)]
    pub login: UserLoginInput,
    pub name: String,
    #[serde(rename = "redirectURI")]
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    #[serde(skip)]
    pub belongs_to_user: u64,
}
