//! Shared HTTP DTOs: response envelope, list responses and query parameters

mod error;
mod query;

pub use error::status_for;
pub use query::{DateRangeQuery, PaginationQuery};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::infrastructure::database::Paginated;
use crate::shared::{InMemoryPage, PaginationMeta};

/// Standard API response envelope
///
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One page of a list endpoint together with its page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, meta: PaginationMeta) -> Self {
        Self { items, meta }
    }

    /// Convert every item, keeping the page metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

impl<T> From<Paginated<T>> for PaginatedResponse<T> {
    fn from(page: Paginated<T>) -> Self {
        Self::new(page.items, page.meta)
    }
}

impl<T: Clone> From<InMemoryPage<'_, T>> for PaginatedResponse<T> {
    fn from(page: InMemoryPage<'_, T>) -> Self {
        Self::new(page.items.to_vec(), page.meta)
    }
}
