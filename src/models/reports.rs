use serde::{Deserialize, Serialize};

use super::Pagination;

/// A user-filed report about content or behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub id: u64,
    pub report_type: String,
    pub concern: String,
    pub created_on: u64,
    pub last_updated_on: Option<u64>,
    pub archived_on: Option<u64>,
    pub belongs_to_user: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportList {
    #[serde(flatten)]
    pub pagination: Pagination,
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCreationInput {
    pub report_type: String,
    pub concern: String,
}
