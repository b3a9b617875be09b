//! Page coercion and offset arithmetic shared by both collections.

use hotelhub_config::CollectionsConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

const FALLBACK_PAGE: u32 = 1;
const FALLBACK_PAGE_SIZE: u32 = 10;

/// Defaults applied when a caller omits or garbles a paging parameter.
///
/// Both values are at least 1; construction replaces anything smaller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDefaults {
    page: u32,
    page_size: u32,
}

impl ListDefaults {
    pub fn new(page: u32, page_size: u32) -> Self {
        let page = if page >= 1 {
            page
        } else {
            warn!("Configured default page {} is invalid, using {}", page, FALLBACK_PAGE);
            FALLBACK_PAGE
        };
        let page_size = if page_size >= 1 {
            page_size
        } else {
            warn!(
                "Configured default page size {} is invalid, using {}",
                page_size, FALLBACK_PAGE_SIZE
            );
            FALLBACK_PAGE_SIZE
        };
        Self { page, page_size }
    }

    pub fn from_config(config: &CollectionsConfig) -> Self {
        Self::new(config.default_page, config.default_page_size)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Resolve raw caller input into a concrete page request.
    pub fn resolve(&self, query: &PageQuery) -> PageRequest {
        PageRequest {
            page: coerce(query.page.as_deref(), self.page),
            page_size: coerce(query.page_size.as_deref(), self.page_size),
        }
    }
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self {
            page: FALLBACK_PAGE,
            page_size: FALLBACK_PAGE_SIZE,
        }
    }
}

/// Paging parameters exactly as the caller sent them.
///
/// Query strings accept `page_size` as well as `pageSize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<String>,
    /// Items per page
    #[serde(alias = "pageSize")]
    pub page_size: Option<String>,
}

impl PageQuery {
    pub fn new(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    /// Paging parameters given as integers, as an internal caller would.
    pub fn from_numbers(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page.to_string()),
            page_size: Some(page_size.to_string()),
        }
    }
}

/// A resolved page: both values are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Rows to skip, `(page - 1) * page_size`. The product of two `u32`
    /// always fits in a `u64`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)).saturating_mul(u64::from(self.page_size))
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// One page of a collection, newest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Page<T> {
    /// Number of records matching the filter, across all pages
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub list: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, total: u64, list: Vec<T>) -> Self {
        Self {
            total,
            page: request.page,
            page_size: request.page_size,
            list,
        }
    }
}

fn coerce(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value >= 1)
        .map(|value| u32::try_from(value).unwrap_or(u32::MAX))
        .unwrap_or(default)
}
