//! Application setup and runtime.

use crate::{config::Config, db, db::LogStore, http};
use std::{net::SocketAddr, sync::Arc};
use tracing::{info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn LogStore>,
  pub config: Arc<Config>,
}

impl AppState {
  pub fn new(store: Arc<dyn LogStore>, config: Config) -> Self {
    Self {
      store,
      config: Arc::new(config),
    }
  }
}

/// Open the log store and serve HTTP with configuration from the environment.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  let config = Config::from_env()?;
  if !config.require_secret {
    warn!("TELEGRAM_REQUIRE_SECRET is off; webhook accepts requests without a key");
  }

  let store = db::connect(&config.database_url).await?;
  store.ensure_schema().await?;
  info!(backend = store.backend(), "log store ready");

  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
  let app = http::build_router(AppState::new(store, config));

  info!("log page:         http://{}/", addr);
  info!("telegram webhook: POST http://{}/_wh/telegram?key=...", addr);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
