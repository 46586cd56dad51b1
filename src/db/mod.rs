//! Log store abstraction and backend selection.

use crate::{
  error::{Error, Result},
  models::log::log_entry::LogEntry,
};
use async_trait::async_trait;
use std::{path::Path, sync::Arc};

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresLogStore;
pub use sqlite::SqliteLogStore;

/// Timestamp ordering for fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
  Ascending,
  Descending,
}

impl Order {
  pub(crate) fn sql(self) -> &'static str {
    match self {
      Order::Ascending => "ASC",
      Order::Descending => "DESC",
    }
  }
}

/// Append-only table of log entries.
#[async_trait]
pub trait LogStore: Send + Sync {
  /// Create the backing table if it does not exist yet.
  async fn ensure_schema(&self) -> Result<()>;

  async fn insert(&self, entry: &LogEntry) -> Result<()>;

  /// All entries by timestamp; ties keep insertion order.
  async fn fetch_all(&self, order: Order) -> Result<Vec<LogEntry>>;

  async fn fetch_all_descending(&self) -> Result<Vec<LogEntry>> {
    self.fetch_all(Order::Descending).await
  }

  async fn fetch_all_ascending(&self) -> Result<Vec<LogEntry>> {
    self.fetch_all(Order::Ascending).await
  }

  fn backend(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
  Sqlite,
  Postgres,
}

/// Work out the backend for a connection string. Bare paths are SQLite files.
pub fn classify(url: &str) -> Result<(Backend, String)> {
  let url = url.trim();
  if url.starts_with("postgres://") || url.starts_with("postgresql://") {
    return Ok((Backend::Postgres, url.to_string()));
  }
  if url.starts_with("sqlite:") {
    return Ok((Backend::Sqlite, url.to_string()));
  }
  if let Some((scheme, _)) = url.split_once("://") {
    return Err(Error::ConfigurationInvalid {
      key: "storage url",
      reason: format!("unsupported scheme {scheme:?}"),
    });
  }
  Ok((Backend::Sqlite, format!("sqlite://{url}")))
}

/// Open the store a connection string points at. The schema is not touched.
pub async fn connect(url: &str) -> Result<Arc<dyn LogStore>> {
  let store: Arc<dyn LogStore> = match classify(url)? {
    (Backend::Sqlite, url) => Arc::new(SqliteLogStore::connect(&url).await?),
    (Backend::Postgres, url) => Arc::new(PostgresLogStore::connect(&url).await?),
  };
  Ok(store)
}

/// Like [`connect`], but a SQLite database must already exist on disk.
pub async fn connect_existing(url: &str) -> Result<Arc<dyn LogStore>> {
  let store: Arc<dyn LogStore> = match classify(url)? {
    (Backend::Sqlite, url) => Arc::new(SqliteLogStore::connect_existing(&url).await?),
    (Backend::Postgres, url) => Arc::new(PostgresLogStore::connect(&url).await?),
  };
  Ok(store)
}

/// Whether a sqlx SQLite URL names an in-memory database.
pub fn is_sqlite_memory(db_url: &str) -> bool {
  let rest = db_url
    .strip_prefix("sqlite://")
    .or_else(|| db_url.strip_prefix("sqlite:"))
    .unwrap_or(db_url);
  let (path, query) = match rest.split_once('?') {
    Some((p, q)) => (p, Some(q)),
    None => (rest, None),
  };
  path == ":memory:"
    || query.is_some_and(|q| q.split('&').any(|kv| kv == "mode=memory"))
}

/// Ensure the parent folder of a SQLite file URL exists.
pub fn ensure_sqlite_path(db_url: &str) {
  if is_sqlite_memory(db_url) {
    return;
  }
  let path_part = db_url
    .strip_prefix("sqlite://")
    .or_else(|| db_url.strip_prefix("sqlite:"))
    .unwrap_or(db_url);
  let path_only = path_part.split('?').next().unwrap_or("");
  if path_only.is_empty() {
    return;
  }
  if let Some(parent) = Path::new(path_only).parent() {
    if !parent.as_os_str().is_empty() {
      let _ = std::fs::create_dir_all(parent);
    }
  }
}
