//! daybook library entrypoint.
//!
//! Modules:
//! - `app`: startup and shared state
//! - `config`: environment-sourced settings
//! - `db`: log store trait with SQLite and PostgreSQL backends
//! - `http`: Axum router, log page and Telegram webhook
//! - `migrate`: copy entries between stores
//! - `models`: typed records used across layers
//! - `render`: HTML for the log page
//! - `util`: tracing setup and HTML escaping

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod migrate;
pub mod models;
pub mod render;
pub mod util;
