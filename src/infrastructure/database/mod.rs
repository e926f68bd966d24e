pub mod query;

pub use query::{date_range_condition, paginate_select, Paginated};

use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr};
use serde::Deserialize;
use tracing::info;

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./erp.db?mode=rwc")
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./erp.db?mode=rwc".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
        }
    }
}

/// Owned database handle with an explicit open/close lifecycle.
///
/// Callers receive it by injection; there is no process-wide instance.
#[derive(Debug)]
pub struct Database {
    conn: DatabaseConnection,
}

impl Database {
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        info!("Connecting to database: {}", config.url);
        let conn = SeaDatabase::connect(&config.url).await?;
        info!("Database connected successfully");
        Ok(Self { conn })
    }

    pub fn from_connection(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub async fn close(self) -> Result<(), DbErr> {
        info!("Closing database connection");
        self.conn.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn open_ping_and_close_in_memory_sqlite() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
        };
        let db = Database::open(&config).await.unwrap();
        db.connection().execute_unprepared("SELECT 1").await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_fails_for_bad_url() {
        let config = DatabaseConfig {
            url: "nosuchdriver://localhost".to_string(),
        };
        assert!(Database::open(&config).await.is_err());
    }

    #[test]
    fn sqlite_helper_builds_url() {
        assert_eq!(DatabaseConfig::sqlite("/tmp/erp.db").url, "sqlite:///tmp/erp.db?mode=rwc");
    }
}
