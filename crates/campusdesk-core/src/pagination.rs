//! Page-based pagination shared by every listing endpoint.
//!
//! Listing endpoints take a 1-indexed `page` and a `per_page` size. Both are
//! required and must be positive; anything else is a caller error
//! ([`ErrorKind::InvalidPage`](crate::errors::ErrorKind::InvalidPage)), never a
//! storage error.
//!
//! # Example
//!
//! ```ignore
//! use campusdesk_core::pagination::{PageParams, total_pages};
//!
//! // GET /api/schools?page=3&per_page=10
//! let request = params.into_request()?;
//! let window = request.window();
//! assert_eq!(window.offset, 20);
//! assert_eq!(window.limit, 10);
//!
//! assert_eq!(total_pages(25, 10), 3);
//! ```

use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::AppError;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Offset/limit window handed to the storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: i64,
    pub limit: i64,
}

/// Validated page request. Both fields are always `>= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    per_page: i64,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::invalid_page(anyhow!(
                "page must be a positive integer, got {}",
                page
            )));
        }
        if per_page < 1 {
            return Err(AppError::invalid_page(anyhow!(
                "per_page must be a positive integer, got {}",
                per_page
            )));
        }
        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    /// Offsets past `i64::MAX` saturate, so an unreachable page is empty.
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: (self.page - 1).saturating_mul(self.per_page),
            limit: self.per_page,
        }
    }
}

/// Computes the offset/limit window for a page.
///
/// `offset = (page - 1) * per_page`, `limit = per_page`, with the offset
/// saturating at `i64::MAX`.
pub fn compute_window(page: i64, per_page: i64) -> Result<PageWindow, AppError> {
    PageRequest::new(page, per_page).map(|request| request.window())
}

/// Number of pages needed to show `total` items, `per_page` at a time.
///
/// Zero items means zero pages. A non-positive `per_page` also yields zero;
/// callers go through [`PageRequest`] so that case never reaches storage.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 || per_page <= 0 {
        return 0;
    }
    total / per_page + i64::from(total % per_page != 0)
}

/// Raw pagination query parameters.
///
/// Both parameters are required; [`PageParams::into_request`] rejects missing
/// or non-positive values.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Results per page
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn into_request(self) -> Result<PageRequest, AppError> {
        let page = self
            .page
            .ok_or_else(|| AppError::invalid_page(anyhow!("page is required")))?;
        let per_page = self
            .per_page
            .ok_or_else(|| AppError::invalid_page(anyhow!("per_page is required")))?;
        PageRequest::new(page, per_page)
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// { "page": 2, "per_page": 10, "total": 25, "total_pages": 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
    /// Total number of items across all pages
    pub total: i64,
    /// Number of pages for `total` items
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: i64) -> Self {
        Self {
            page: request.page(),
            per_page: request.per_page(),
            total,
            total_pages: total_pages(total, request.per_page()),
        }
    }
}
