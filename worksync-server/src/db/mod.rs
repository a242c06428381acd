//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::core::ServerError;

/// 写冲突时的等待时间
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database service: owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file with WAL mode and run migrations
    pub async fn new(db_path: &str) -> Result<Self, ServerError> {
        if let Some(parent) = std::path::Path::new(db_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        // Build connection options: WAL, foreign keys, normal sync
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| ServerError::Database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            path = %db_path,
            "Database connection established (SQLite WAL, busy_timeout={}ms)",
            BUSY_TIMEOUT.as_millis()
        );

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    /// In-memory database (tests)
    ///
    /// 单连接: 每个 `:memory:` 连接都是独立的数据库
    pub async fn in_memory() -> Result<Self, ServerError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| ServerError::Database(format!("Invalid database path: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<(), ServerError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}
