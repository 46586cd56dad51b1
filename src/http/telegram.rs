//! Telegram webhook ingest.
//!
//! The webhook sees every message in the bot's chats. Only text from the one
//! configured username becomes a log entry; everything else is acknowledged
//! with 200 so Telegram does not redeliver it.

use crate::{
  app::AppState,
  config::Config,
  db::LogStore,
  error::{Error, Result},
  models::{log::log_entry::LogEntry, telegram::update::Update},
};
use axum::{
  body::Bytes,
  extract::{rejection::QueryRejection, Query, State},
  http::StatusCode,
};
use tracing::{debug, info};

type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
  SenderNotAllowlisted,
  NoText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
  Stored,
  Ignored(IgnoreReason),
}

pub async fn telegram_webhook(
  State(state): State<AppState>,
  query: std::result::Result<Query<QueryPairs>, QueryRejection>,
  body: Bytes,
) -> Result<StatusCode> {
  // An unreadable query string carries no usable key.
  let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
  authorize(&state.config, first_key(&pairs))?;
  let update: Update =
    serde_json::from_slice(&body).map_err(|e| Error::MalformedPayload(e.to_string()))?;
  ingest(state.store.as_ref(), &state.config, &update).await?;
  Ok(StatusCode::OK)
}

/// The first `key` parameter; later repeats are ignored.
pub fn first_key(pairs: &[(String, String)]) -> Option<&str> {
  pairs
    .iter()
    .find(|(name, _)| name == "key")
    .map(|(_, value)| value.as_str())
}

/// Exact match of the `key` query parameter against the shared secret.
pub fn authorize(config: &Config, key: Option<&str>) -> Result<()> {
  if !config.require_secret {
    return Ok(());
  }
  match key {
    Some(k) if k == config.telegram_secret => Ok(()),
    _ => Err(Error::Unauthorized),
  }
}

/// Store the update's text if it came from the allowed sender.
pub async fn ingest(store: &dyn LogStore, config: &Config, update: &Update) -> Result<IngestOutcome> {
  let sender = update.sender_username();
  if sender != Some(config.telegram_username.as_str()) {
    debug!(
      username = sender.unwrap_or(""),
      user_id = update.sender().and_then(|u| u.id),
      is_bot = update.sender().is_some_and(|u| u.is_bot),
      chat_id = update.chat_id(),
      update_id = update.update_id,
      "ignoring update from unlisted sender"
    );
    return Ok(IngestOutcome::Ignored(IgnoreReason::SenderNotAllowlisted));
  }
  let Some(text) = update.text() else {
    debug!(update_id = update.update_id, "ignoring update without text");
    return Ok(IngestOutcome::Ignored(IgnoreReason::NoText));
  };

  let entry = LogEntry::now(text);
  store.insert(&entry).await?;
  info!(
    message_id = update.message.as_ref().and_then(|m| m.message_id),
    chat_id = update.chat_id(),
    chars = entry.content.chars().count(),
    "stored log entry"
  );
  Ok(IngestOutcome::Stored)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::SqliteLogStore;

  fn config(require_secret: bool) -> Config {
    Config {
      database_url: "sqlite::memory:".into(),
      port: 0,
      telegram_secret: "s3cret".into(),
      telegram_username: "alice".into(),
      require_secret,
      owner_name: "Alice".into(),
      timezone: chrono_tz::UTC,
    }
  }

  fn update(raw: &str) -> Update {
    serde_json::from_str(raw).unwrap()
  }

  async fn store() -> SqliteLogStore {
    let store = SqliteLogStore::connect("sqlite::memory:").await.unwrap();
    store.ensure_schema().await.unwrap();
    store
  }

  #[test]
  fn authorize_requires_exact_key() {
    let cfg = config(true);
    assert!(authorize(&cfg, Some("s3cret")).is_ok());
    assert!(matches!(authorize(&cfg, Some("S3CRET")), Err(Error::Unauthorized)));
    assert!(matches!(authorize(&cfg, Some("")), Err(Error::Unauthorized)));
    assert!(matches!(authorize(&cfg, None), Err(Error::Unauthorized)));
  }

  #[test]
  fn first_key_wins_over_repeats() {
    let pairs = vec![
      ("other".to_string(), "x".to_string()),
      ("key".to_string(), "nope".to_string()),
      ("key".to_string(), "s3cret".to_string()),
    ];
    assert_eq!(first_key(&pairs), Some("nope"));
    assert!(matches!(
      authorize(&config(true), first_key(&pairs)),
      Err(Error::Unauthorized)
    ));
    assert_eq!(first_key(&[]), None);
  }

  #[test]
  fn authorize_can_be_disabled() {
    assert!(authorize(&config(false), None).is_ok());
  }

  #[tokio::test]
  async fn stores_text_from_allowed_sender() {
    let store = store().await;
    let up = update(r#"{"message":{"text":"hello","from":{"username":"alice"}}}"#);
    let outcome = ingest(&store, &config(true), &up).await.unwrap();
    assert_eq!(outcome, IngestOutcome::Stored);
    let entries = store.fetch_all_descending().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].content, "hello");
  }

  #[tokio::test]
  async fn sender_match_is_case_sensitive() {
    let store = store().await;
    let up = update(r#"{"message":{"text":"hello","from":{"username":"Alice"}}}"#);
    let outcome = ingest(&store, &config(true), &up).await.unwrap();
    assert_eq!(
      outcome,
      IngestOutcome::Ignored(IgnoreReason::SenderNotAllowlisted)
    );
    assert!(store.fetch_all_descending().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn missing_sender_or_text_is_ignored() {
    let store = store().await;
    let cfg = config(true);
    let no_sender = update(r#"{"message":{"text":"hello"}}"#);
    assert_eq!(
      ingest(&store, &cfg, &no_sender).await.unwrap(),
      IngestOutcome::Ignored(IgnoreReason::SenderNotAllowlisted)
    );
    let photo = update(r#"{"message":{"photo":[],"from":{"username":"alice"}}}"#);
    assert_eq!(
      ingest(&store, &cfg, &photo).await.unwrap(),
      IngestOutcome::Ignored(IgnoreReason::NoText)
    );
    assert!(store.fetch_all_descending().await.unwrap().is_empty());
  }
}
