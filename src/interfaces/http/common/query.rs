//! Query-string parameters shared by list endpoints

use serde::Deserialize;
use tracing::warn;
use utoipa::IntoParams;

use crate::shared::{
    build_date_range_filter_from_str, AppResult, DateRangeFilter, PaginationRequest,
};

/// Pagination query parameters (`?page=2&limit=20`)
///
/// Out-of-range values are coerced, not rejected.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number (1-based). Defaults to 1
    pub page: Option<i64>,
    /// Page size (1–100). Defaults to the configured page size
    pub limit: Option<i64>,
}

impl From<PaginationQuery> for PaginationRequest {
    fn from(query: PaginationQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
        }
    }
}

/// Date range query parameters (`?startDate=2024-01-01&endDate=2024-01-31`)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// First included day (`YYYY-MM-DD` or RFC 3339)
    pub start_date: Option<String>,
    /// Last included day (`YYYY-MM-DD` or RFC 3339)
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// Build a filter on `field`; unparseable dates become a validation error.
    pub fn to_filter(&self, field: &str) -> AppResult<Option<DateRangeFilter>> {
        let filter = build_date_range_filter_from_str(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            field,
        )
        .inspect_err(|e| warn!(field, error = %e, "rejected date range query"))?;
        Ok(filter)
    }
}
