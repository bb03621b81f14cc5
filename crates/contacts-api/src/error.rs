//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure becomes `{"error": "<message>"}` with a fixed message chosen
//! by the handler. Underlying causes are logged here and never sent to the
//! client.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(&'static str),

  /// The path segment could not be parsed as a contact id. Reported with the
  /// same status as a store failure.
  #[error("invalid id {id:?}")]
  InvalidId {
    id:      String,
    message: &'static str,
  },

  #[error("store error: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a store failure, reporting `message` to the client.
  pub fn store<E>(message: &'static str) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| ApiError::Store { message, source: Box::new(e) }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::InvalidId { .. } | ApiError::Store { .. } => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match self {
      ApiError::BadRequest(m) => m,
      ApiError::NotFound(m) => m.to_owned(),
      ApiError::InvalidId { id, message } => {
        tracing::warn!(%id, "rejected malformed contact id");
        message.to_owned()
      }
      ApiError::Store { message, source } => {
        tracing::error!(error = %source, "{message}");
        message.to_owned()
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
