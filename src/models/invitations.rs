use serde::{Deserialize, Serialize};

use super::Pagination;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invitation {
    pub id: u64,
    pub code: String,
    pub consumed: bool,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvitationList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub invitations: Vec<Invitation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationCreationInput {
    pub code: String,
    pub consumed: bool,
}
