//! Server configuration read once from the environment.

use crate::error::{Error, Result};
use chrono_tz::Tz;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OWNER: &str = "John Doe";
const DEFAULT_TIMEZONE: Tz = chrono_tz::America::Toronto;

/// Settings shared by the store and both handlers.
#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  pub telegram_secret: String,
  pub telegram_username: String,
  /// When false the `?key=` check on the webhook is skipped.
  pub require_secret: bool,
  pub owner_name: String,
  pub timezone: Tz,
}

impl Config {
  /// Load `.env` if present, then read the process environment.
  pub fn from_env() -> Result<Self> {
    dotenvy::dotenv().ok();
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build a config from any key lookup. Empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let must = |key: &'static str| get(key).ok_or(Error::ConfigurationMissing(key));

    let port = match get("PORT") {
      Some(raw) => raw
        .trim()
        .parse::<u16>()
        .map_err(|e| Error::ConfigurationInvalid {
          key: "PORT",
          reason: e.to_string(),
        })?,
      None => DEFAULT_PORT,
    };

    let timezone = match get("TIMEZONE") {
      Some(raw) => raw
        .trim()
        .parse::<Tz>()
        .map_err(|e| Error::ConfigurationInvalid {
          key: "TIMEZONE",
          reason: e.to_string(),
        })?,
      None => DEFAULT_TIMEZONE,
    };

    let require_secret = match get("TELEGRAM_REQUIRE_SECRET") {
      Some(raw) => parse_flag(&raw).ok_or_else(|| Error::ConfigurationInvalid {
        key: "TELEGRAM_REQUIRE_SECRET",
        reason: format!("expected a boolean, got {raw:?}"),
      })?,
      None => true,
    };

    Ok(Config {
      database_url: must("DATABASE_URL")?,
      port,
      telegram_secret: must("TELEGRAM_SECRET")?,
      telegram_username: must("TELEGRAM_USERNAME")?,
      require_secret,
      owner_name: get("OWNER_NAME").unwrap_or_else(|| DEFAULT_OWNER.to_string()),
      timezone,
    })
  }
}

fn parse_flag(raw: &str) -> Option<bool> {
  match raw.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Some(true),
    "0" | "false" | "no" | "off" => Some(false),
    _ => None,
  }
}
