use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::{PgConnectOptions, PgPoolOptions}, sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tokio::sync::Mutex;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;

/// Serializes SQLite write transactions. SQLite admits a single writer, and a
/// deferred transaction that reads before it writes fails with `SQLITE_BUSY`
/// if another connection committed in between.
pub type WriteGate = Arc<Mutex<()>>;

/// Persistence handle injected into every store.
#[derive(Clone)]
pub enum Database {
    Sqlite { pool: SqlitePool, gate: WriteGate },
    Postgres { pool: PgPool },
}

impl Database {
    /// Opens the pool. A missing SQLite file is created.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let slow = Duration::from_millis(config.slow_statement_ms);

        if config.is_postgres() {
            info!("Initializing PostgreSQL connection...");

            let opts = PgConnectOptions::from_str(&config.database_url)
                .map_err(AppError::Database)?
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, slow);

            let pool = PgPoolOptions::new()
                .max_connections(config.pool_size())
                .connect_with(opts)
                .await
                .map_err(AppError::Database)?;

            Ok(Database::Postgres { pool })
        } else {
            info!("Initializing SQLite connection with WAL Mode...");

            let opts = SqliteConnectOptions::from_str(&config.database_url)
                .map_err(AppError::Database)?
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(5))
                .log_statements(LevelFilter::Debug)
                .log_slow_statements(LevelFilter::Warn, slow);

            let pool = SqlitePoolOptions::new()
                .max_connections(config.pool_size())
                .connect_with(opts)
                .await
                .map_err(AppError::Database)?;

            Ok(Database::Sqlite { pool, gate: WriteGate::default() })
        }
    }

    /// Creates the `locations`, `holidays` and `reservations` tables if they are missing.
    pub async fn migrate(&self) -> Result<(), AppError> {
        match self {
            Database::Sqlite { pool, .. } => sqlx::migrate!("./migrations/sqlite").run(pool).await?,
            Database::Postgres { pool } => sqlx::migrate!("./migrations/postgres").run(pool).await?,
        }
        info!("Database schema is up to date");
        Ok(())
    }

    /// Removes every row and restarts identifier assignment at 1.
    pub async fn reset(&self) -> Result<(), AppError> {
        match self {
            Database::Sqlite { pool, gate } => {
                let _guard = gate.lock().await;
                let mut tx = pool.begin().await.map_err(AppError::Database)?;
                for statement in [
                    "DELETE FROM reservations",
                    "DELETE FROM holidays",
                    "DELETE FROM locations",
                    "DELETE FROM sqlite_sequence WHERE name IN ('reservations', 'holidays', 'locations')",
                ] {
                    sqlx::query(statement).execute(&mut *tx).await.map_err(AppError::Database)?;
                }
                tx.commit().await.map_err(AppError::Database)?;
            }
            Database::Postgres { pool } => {
                sqlx::query("TRUNCATE reservations, holidays, locations RESTART IDENTITY")
                    .execute(pool)
                    .await
                    .map_err(AppError::Database)?;
            }
        }
        info!("Database reset");
        Ok(())
    }

    pub async fn close(&self) {
        match self {
            Database::Sqlite { pool, .. } => pool.close().await,
            Database::Postgres { pool } => pool.close().await,
        }
        info!("Database connections closed");
    }
}
