//! A single timestamped log line.

use chrono::{DateTime, SubsecRound, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub content: String,
}

impl LogEntry {
  pub fn new(timestamp: DateTime<Utc>, content: impl Into<String>) -> Self {
    LogEntry {
      timestamp,
      content: content.into(),
    }
  }

  /// Entry stamped with the current time at microsecond precision, which
  /// both storage backends keep without loss.
  pub fn now(content: impl Into<String>) -> Self {
    Self::new(Utc::now().trunc_subsecs(6), content)
  }
}
