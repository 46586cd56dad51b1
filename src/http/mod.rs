//! HTTP router and handlers.

use crate::app::AppState;
use axum::{
  routing::{get, post},
  Router,
};
use tower_http::trace::TraceLayer;

pub mod page;
pub mod telegram;

/// Assemble the HTTP router with all routes.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(page::log_page))
    .route("/_wh/telegram", post(telegram::telegram_webhook))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
