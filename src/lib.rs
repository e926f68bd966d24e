//! # ERP query & authorization core
//!
//! Building blocks shared by the ERP REST backend (fleet maintenance, HR,
//! inventory, payables/receivables) and its role-based UI gates.
//!
//! ## Architecture
//!
//! - **shared**: pagination math, day-aligned date range filters and the error types
//! - **auth**: permission evaluation, composed access policies and the route guard
//! - **infrastructure**: SeaORM connection handle, paged selects and date predicates
//! - **interfaces**: HTTP DTOs (response envelope, list responses, query parameters)
//! - **config** / **telemetry**: TOML configuration and `tracing` setup

pub mod auth;
pub mod config;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;
pub mod telemetry;

pub use config::{default_config_path, AppConfig};

pub use auth::{AccessPolicy, AuthenticatedUser, PermissionEvaluator, PermissionSet};

pub use shared::{
    build_date_range_filter, compute_pagination, compute_pagination_meta, paginate_in_memory,
    AppError, DateInput, DateRangeFilter, PaginationMeta, PaginationRequest, PaginationResult,
};

pub use infrastructure::{Database, DatabaseConfig};

pub use telemetry::init_tracing;
