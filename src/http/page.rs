//! Public log page.

use crate::{app::AppState, error::Result, render::LogPage};
use axum::{extract::State, response::Html};
use std::time::Instant;

pub async fn log_page(State(state): State<AppState>) -> Result<Html<String>> {
  let started = Instant::now();
  let entries = state.store.fetch_all_descending().await?;
  let page = LogPage {
    owner: &state.config.owner_name,
    timezone: state.config.timezone,
  };
  Ok(Html(page.render(&entries, started)))
}
