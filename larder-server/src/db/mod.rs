//! Database Module
//!
//! Handles SQLite connection pool and migrations

pub mod repository;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Database service: owns a SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database file in WAL mode and apply migrations
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // busy_timeout: 写冲突时等待 5s 而非立即失败
            .busy_timeout(Duration::from_millis(5000))
            .pragma("foreign_keys", "ON")
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(
            path = %db_path.display(),
            "Database connection established (SQLite WAL, busy_timeout=5000ms)"
        );

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// 连通性检查 (SELECT 1)
    pub async fn ping(pool: &SqlitePool) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }
}
