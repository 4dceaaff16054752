use std::collections::BTreeMap;

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// Default page size used by the listing server when a request names none.
pub const DEFAULT_LIMIT: u64 = 30;
/// Largest page the listing server will return in one response.
pub const MAX_LIMIT: u64 = 100;

/// How a 1-based page number is encoded into query parameters.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
)]
pub enum PaginationType {
    /// `limit=per_page&skip=(page-1)*per_page`
    #[default]
    #[serde(rename = "offset-limit")]
    #[display("offset-limit")]
    OffsetLimit,
    /// `_page=page&_limit=per_page`
    #[serde(rename = "page-limit")]
    #[display("page-limit")]
    PageLimit,
}

/// A static query parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display, From)]
#[serde(untagged)]
pub enum QueryValue {
    #[display("{_0}")]
    Text(String),
    #[display("{_0}")]
    Integer(i64),
    #[display("{_0}")]
    Float(f64),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Integer(value.into())
    }
}

/// Static filters merged into every page request. Ordered so that two
/// equal maps always produce the same query string.
pub type QueryParams = BTreeMap<String, QueryValue>;

/// A request for one page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Number of items preceding this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Pagination parameters for this page in the given style.
    pub fn pagination_params(
        &self,
        style: PaginationType,
    ) -> Vec<(String, String)> {
        match style {
            PaginationType::OffsetLimit => vec![
                ("limit".to_string(), self.per_page.to_string()),
                ("skip".to_string(), self.offset().to_string()),
            ],
            PaginationType::PageLimit => vec![
                ("_page".to_string(), self.page.to_string()),
                ("_limit".to_string(), self.per_page.to_string()),
            ],
        }
    }

    /// Full query for this page: the static params followed by the
    /// pagination params. A static param sharing a key with a pagination
    /// param is overridden.
    pub fn query(
        &self,
        params: &QueryParams,
        style: PaginationType,
    ) -> Vec<(String, String)> {
        let pagination = self.pagination_params(style);
        let mut query: Vec<(String, String)> = params
            .iter()
            .filter(|(key, _)| !pagination.iter().any(|(k, _)| k == *key))
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();
        query.extend(pagination);
        query
    }
}

/// Query accepted by the listing server's products route. Both pagination
/// styles are understood; `_page`/`_limit` win when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListProducts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(
        rename = "_page",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u64>,
    #[serde(
        rename = "_limit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub page_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Case-insensitive substring match on the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListProducts {
    /// Resolve the requested window as `(skip, limit)`, capping the limit
    /// at [`MAX_LIMIT`].
    pub fn window(&self) -> (u64, u64) {
        if self.page.is_some() || self.page_limit.is_some() {
            let limit = self.page_limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
            let page = self.page.unwrap_or(1).max(1);
            return ((page - 1).saturating_mul(limit), limit);
        }
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        (self.skip.unwrap_or(0), limit)
    }
}
