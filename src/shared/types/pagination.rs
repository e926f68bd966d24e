//! Pagination math shared by repository queries and list endpoints
//!
//! All functions here are total: out-of-range input is coerced, never
//! rejected.

use serde::{Deserialize, Serialize};
use tracing::trace;
use utoipa::ToSchema;

/// Page size used when the caller does not ask for one
pub const DEFAULT_LIMIT: u64 = 10;

/// Hard upper bound for any page size
pub const MAX_LIMIT: u64 = 100;

/// Pagination query parameters as supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn page(page: i64) -> Self {
        Self {
            page: Some(page),
            limit: None,
        }
    }
}

/// Offset/limit bounds resolved from a [`PaginationRequest`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationResult {
    /// Rows to skip (SQL `OFFSET`)
    pub skip: u64,
    /// Rows to fetch (SQL `LIMIT`), always equal to `limit`
    pub take: u64,
    pub page: u64,
    pub limit: u64,
}

/// Page metadata attached to every list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: u64,
    /// Current page (1-based)
    pub page: u64,
    /// Page size
    pub limit: u64,
    /// Number of pages, never less than 1
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

/// A page cut out of an in-memory collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InMemoryPage<'a, T> {
    pub items: &'a [T],
    pub meta: PaginationMeta,
}

/// Resolve a pagination request into offset/limit bounds.
///
/// A zero or missing `limit` falls back to `default_limit`, while a negative
/// one is clamped to 1. Both are capped at [`MAX_LIMIT`].
pub fn compute_pagination(request: &PaginationRequest, default_limit: u64) -> PaginationResult {
    let page = match request.page {
        Some(page) if page > 0 => page as u64,
        _ => 1,
    };

    let limit = match request.limit {
        Some(limit) if limit > 0 => (limit as u64).min(MAX_LIMIT),
        Some(limit) if limit < 0 => 1,
        _ => default_limit.clamp(1, MAX_LIMIT),
    };

    let skip = (page - 1).saturating_mul(limit);
    trace!(page, limit, skip, "resolved pagination bounds");

    PaginationResult {
        skip,
        take: limit,
        page,
        limit,
    }
}

/// Build page metadata for a result set of `total` items.
pub fn compute_pagination_meta(total: u64, page: u64, limit: u64) -> PaginationMeta {
    let total_pages = if total == 0 {
        1
    } else {
        total.div_ceil(limit.max(1))
    };

    PaginationMeta {
        total,
        page,
        limit,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

/// Slice one page out of `items`.
///
/// Pages past the end yield an empty slice; `meta.total` is always the full
/// collection size.
pub fn paginate_in_memory<'a, T>(items: &'a [T], request: &PaginationRequest) -> InMemoryPage<'a, T> {
    let bounds = compute_pagination(request, DEFAULT_LIMIT);

    let len = items.len();
    let start = usize::try_from(bounds.skip).unwrap_or(usize::MAX).min(len);
    let take = usize::try_from(bounds.take).unwrap_or(usize::MAX);
    let end = start.saturating_add(take).min(len);

    InMemoryPage {
        items: &items[start..end],
        meta: compute_pagination_meta(len as u64, bounds.page, bounds.limit),
    }
}
