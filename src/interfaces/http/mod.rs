//! HTTP REST API interfaces
//!
//! - `common`: response envelope, list responses, query parameters and
//!   error-to-status mapping shared by every endpoint

pub mod common;

pub use common::{ApiResponse, DateRangeQuery, PaginatedResponse, PaginationQuery};
