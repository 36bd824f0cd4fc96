//! Search criteria for the user listing query

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Query-string shape of a search request
///
/// Values stay untyped here so that malformed numbers fall back to defaults
/// instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
}

/// Normalized search filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i32>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            min_age: None,
            max_age: None,
        }
    }
}

impl SearchFilter {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
        self
    }

    pub fn with_age_range(mut self, min_age: Option<i32>, max_age: Option<i32>) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    /// Search term if one is active (blank terms are ignored)
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    /// Number of rows skipped before the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

impl From<SearchParams> for SearchFilter {
    fn from(params: SearchParams) -> Self {
        let page = parse_number::<u32>(params.page.as_deref())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);
        let limit = parse_number::<u32>(params.limit.as_deref())
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_LIMIT);

        Self {
            search: params.search.filter(|s| !s.trim().is_empty()),
            page,
            limit,
            min_age: parse_number(params.min_age.as_deref()),
            max_age: parse_number(params.max_age.as_deref()),
        }
    }
}

fn parse_number<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|value| value.trim().parse().ok())
}
