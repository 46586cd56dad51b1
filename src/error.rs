//! Crate error type and its HTTP mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing environment variable {0}")]
  ConfigurationMissing(&'static str),

  #[error("invalid value for {key}: {reason}")]
  ConfigurationInvalid { key: &'static str, reason: String },

  #[error("storage unavailable: {0}")]
  StorageUnavailable(#[from] sqlx::Error),

  #[error("malformed payload: {0}")]
  MalformedPayload(String),

  #[error("invalid secret key")]
  Unauthorized,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::MalformedPayload(_) => StatusCode::BAD_REQUEST,
      Error::ConfigurationMissing(_)
      | Error::ConfigurationInvalid { .. }
      | Error::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!("request failed: {self}");
    } else {
      warn!("request rejected: {self}");
    }
    let body = match self {
      Error::MalformedPayload(reason) => reason,
      other => other.to_string(),
    };
    (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_follow_the_taxonomy() {
    assert_eq!(Error::Unauthorized.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      Error::MalformedPayload("eof".into()).status(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      Error::StorageUnavailable(sqlx::Error::PoolClosed).status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      Error::ConfigurationMissing("PORT").status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn unauthorized_message_is_stable() {
    assert_eq!(Error::Unauthorized.to_string(), "invalid secret key");
  }
}
