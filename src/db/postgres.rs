//! PostgreSQL-backed log store.

use super::{LogStore, Order};
use crate::{error::Result, models::log::log_entry::LogEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

#[derive(Debug, FromRow)]
struct LogRow {
  timestamp: DateTime<Utc>,
  content: String,
}

impl From<LogRow> for LogEntry {
  fn from(row: LogRow) -> Self {
    LogEntry::new(row.timestamp, row.content)
  }
}

#[derive(Clone)]
pub struct PostgresLogStore {
  pool: PgPool,
}

impl PostgresLogStore {
  pub async fn connect(db_url: &str) -> Result<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(db_url)
      .await?;
    Ok(Self { pool })
  }
}

#[async_trait]
impl LogStore for PostgresLogStore {
  async fn ensure_schema(&self) -> Result<()> {
    sqlx::query(
      r#"CREATE TABLE IF NOT EXISTS logs (
            id SERIAL PRIMARY KEY,
            timestamp TIMESTAMPTZ NOT NULL,
            content TEXT NOT NULL
        )"#,
    )
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn insert(&self, entry: &LogEntry) -> Result<()> {
    sqlx::query("INSERT INTO logs (timestamp, content) VALUES ($1, $2)")
      .bind(entry.timestamp)
      .bind(&entry.content)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn fetch_all(&self, order: Order) -> Result<Vec<LogEntry>> {
    let dir = order.sql();
    let sql = format!("SELECT timestamp, content FROM logs ORDER BY timestamp {dir}, id {dir}");
    let rows: Vec<LogRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
    Ok(rows.into_iter().map(LogEntry::from).collect())
  }

  fn backend(&self) -> &'static str {
    "postgres"
  }
}
