//! One-shot copy of every entry from one log store into another.

use crate::{db::LogStore, error::Result};
use tracing::info;

/// Copy all entries oldest first so the destination assigns ids in
/// chronological order. Stops at the first failed insert; rows already
/// copied stay in place.
pub async fn migrate(source: &dyn LogStore, destination: &dyn LogStore) -> Result<usize> {
  let entries = source.fetch_all_ascending().await?;
  info!(
    backend = source.backend(),
    count = entries.len(),
    "fetched logs from source"
  );

  destination.ensure_schema().await?;
  for entry in &entries {
    destination.insert(entry).await?;
  }
  info!(
    backend = destination.backend(),
    count = entries.len(),
    "inserted logs into destination"
  );
  Ok(entries.len())
}
