//! Infrastructure layer - external concerns

pub mod database;

pub use database::{Database, DatabaseConfig};
