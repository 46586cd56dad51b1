//! SQLite-backed log store.
//!
//! Timestamps live in a TEXT column as RFC 3339. New rows use fixed-width UTC
//! with microseconds; older rows may carry other offsets, so ordering goes
//! through `julianday` first. `julianday` keeps only milliseconds, so the
//! fixed-width text breaks ties below that.

use super::{ensure_sqlite_path, is_sqlite_memory, LogStore, Order};
use crate::{error::Result, models::log::log_entry::LogEntry};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
  sqlite::{SqliteConnectOptions, SqlitePoolOptions},
  FromRow, SqlitePool,
};
use std::{str::FromStr, time::Duration};

#[derive(Debug, FromRow)]
struct LogRow {
  ts: String,
  content: String,
}

impl TryFrom<LogRow> for LogEntry {
  type Error = sqlx::Error;

  fn try_from(row: LogRow) -> std::result::Result<Self, Self::Error> {
    let ts = DateTime::parse_from_rfc3339(&row.ts)
      .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
      .with_timezone(&Utc);
    Ok(LogEntry::new(ts, row.content))
  }
}

#[derive(Clone)]
pub struct SqliteLogStore {
  pool: SqlitePool,
}

impl SqliteLogStore {
  /// Open the database, creating the file and its parent folder if missing.
  pub async fn connect(db_url: &str) -> Result<Self> {
    Self::open(db_url, true).await
  }

  /// Open a database that must already exist. Nothing is created on disk.
  pub async fn connect_existing(db_url: &str) -> Result<Self> {
    Self::open(db_url, false).await
  }

  async fn open(db_url: &str, create: bool) -> Result<Self> {
    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(create);
    // Every connection to `:memory:` is its own database, so keep exactly one
    // alive for the lifetime of the pool.
    let pool = if is_sqlite_memory(db_url) {
      SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?
    } else {
      if create {
        ensure_sqlite_path(db_url);
      }
      SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?
    };
    Ok(Self { pool })
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }
}

#[async_trait]
impl LogStore for SqliteLogStore {
  async fn ensure_schema(&self) -> Result<()> {
    sqlx::query(
      r#"CREATE TABLE IF NOT EXISTS logs (
            ts TEXT NOT NULL,
            content TEXT NOT NULL
        )"#,
    )
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn insert(&self, entry: &LogEntry) -> Result<()> {
    sqlx::query("INSERT INTO logs (ts, content) VALUES (?, ?)")
      .bind(entry.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
      .bind(&entry.content)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn fetch_all(&self, order: Order) -> Result<Vec<LogEntry>> {
    let dir = order.sql();
    let sql = format!("SELECT ts, content FROM logs ORDER BY julianday(ts) {dir}, ts {dir}, rowid {dir}");
    let rows: Vec<LogRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
    let entries = rows
      .into_iter()
      .map(LogEntry::try_from)
      .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(entries)
  }

  fn backend(&self) -> &'static str {
    "sqlite"
  }
}
