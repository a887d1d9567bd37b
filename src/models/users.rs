//! Accounts and the inputs of the login, registration and two-factor flows.

use serde::{Deserialize, Serialize};

use super::Pagination;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub password_last_changed_on: Option<u64>,
    pub is_admin: bool,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreationInput {
    pub username: String,
    pub password: String,
}

/// Returned once at registration; the TOTP secret is never shown again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCreationResponse {
    pub id: u64,
    pub username: String,
    pub is_admin: bool,
    pub two_factor_secret: String,
    #[serde(rename = "qrCode")]
    pub two_factor_qr_code: String,
    pub password_last_changed_on: Option<u64>,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginInput {
    pub username: String,
    pub password: String,
    pub totp_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpSecretVerificationInput {
    #[serde(rename = "userID")]
    pub user_id: u64,
    pub totp_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateInput {
    pub new_password: String,
    pub current_password: String,
    pub totp_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotpSecretRefreshInput {
    pub current_password: String,
    pub totp_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TotpSecretRefreshResponse {
    pub two_factor_secret: String,
    #[serde(rename = "qrCode")]
    pub two_factor_qr_code: String,
}
