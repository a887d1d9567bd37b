use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::QueryValues;

pub const DEFAULT_LIMIT: u8 = 20;
pub const MAX_LIMIT: u8 = 250;

pub(crate) const PAGE_KEY: &str = "page";
pub(crate) const LIMIT_KEY: &str = "limit";
pub(crate) const CREATED_BEFORE_KEY: &str = "createdBefore";
pub(crate) const CREATED_AFTER_KEY: &str = "createdAfter";
pub(crate) const UPDATED_BEFORE_KEY: &str = "updatedBefore";
pub(crate) const UPDATED_AFTER_KEY: &str = "updatedAfter";
pub(crate) const SORT_BY_KEY: &str = "sortBy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Optional list parameters. Unset fields are left for the server to default.
///
/// Time bounds are rendered as unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub page: Option<u64>,
    pub limit: Option<u8>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
    pub updated_after: Option<DateTime<Utc>>,
    pub updated_before: Option<DateTime<Utc>>,
    pub sort_by: Option<SortDirection>,
}

impl QueryFilter {
    /// First page, default limit, ascending.
    pub fn default_filter() -> Self {
        Self {
            page: Some(1),
            limit: Some(DEFAULT_LIMIT),
            sort_by: Some(SortDirection::Asc),
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size, clamped to [`MAX_LIMIT`].
    pub fn limit(mut self, limit: u8) -> Self {
        self.limit = Some(limit.min(MAX_LIMIT));
        self
    }

    pub fn created_after(mut self, at: DateTime<Utc>) -> Self {
        self.created_after = Some(at);
        self
    }

    pub fn created_before(mut self, at: DateTime<Utc>) -> Self {
        self.created_before = Some(at);
        self
    }

    pub fn updated_after(mut self, at: DateTime<Utc>) -> Self {
        self.updated_after = Some(at);
        self
    }

    pub fn updated_before(mut self, at: DateTime<Utc>) -> Self {
        self.updated_before = Some(at);
        self
    }

    pub fn sort_by(mut self, direction: SortDirection) -> Self {
        self.sort_by = Some(direction);
        self
    }

    /// Renders only the fields that are set.
    pub fn to_values(&self) -> QueryValues {
        let mut values = QueryValues::new();

        let mut set = |key: &str, value: String| {
            values.insert(key.to_string(), vec![value]);
        };

        if let Some(page) = self.page {
            set(PAGE_KEY, page.to_string());
        }
        if let Some(limit) = self.limit {
            set(LIMIT_KEY, limit.to_string());
        }
        if let Some(at) = self.created_after {
            set(CREATED_AFTER_KEY, at.timestamp().to_string());
        }
        if let Some(at) = self.created_before {
            set(CREATED_BEFORE_KEY, at.timestamp().to_string());
        }
        if let Some(at) = self.updated_after {
            set(UPDATED_AFTER_KEY, at.timestamp().to_string());
        }
        if let Some(at) = self.updated_before {
            set(UPDATED_BEFORE_KEY, at.timestamp().to_string());
        }
        if let Some(direction) = self.sort_by {
            set(SORT_BY_KEY, direction.as_str().to_string());
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_filter_renders_nothing() {
        assert!(QueryFilter::default().to_values().is_empty());
    }

    #[test]
    fn only_set_keys_are_rendered() {
        let at = Utc.timestamp_opt(1_600_000_000, 0).unwrap();
        let values = QueryFilter::default().page(3).created_after(at).to_values();

        assert_eq!(values.len(), 2);
        assert_eq!(values["page"], vec!["3".to_string()]);
        assert_eq!(values["createdAfter"], vec!["1600000000".to_string()]);
    }

    #[test]
    fn fleshed_out_filter_uses_server_key_names() {
        let at = Utc.timestamp_opt(1_000, 0).unwrap();
        let values = QueryFilter::default_filter()
            .created_before(at)
            .updated_after(at)
            .updated_before(at)
            .sort_by(SortDirection::Desc)
            .to_values();

        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["createdBefore", "limit", "page", "sortBy", "updatedAfter", "updatedBefore"]
        );
        assert_eq!(values["sortBy"], vec!["desc".to_string()]);
    }

    #[test]
    fn limit_is_clamped() {
        let filter = QueryFilter::default().limit(u8::MAX);
        assert_eq!(filter.limit, Some(MAX_LIMIT));
    }
}
