//! JSON request-body extractor.
//!
//! Behaves like a body-parsing middleware rather than a strict extractor: a
//! request that carries no JSON body yields `T::default()` instead of a
//! rejection, so handlers decide what an empty body means.

use axum::{
  extract::{FromRequest, Request},
  http::{HeaderMap, header},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON body, or `T::default()` when the request has none.
///
/// - no `Content-Type`, or a non-JSON one → `T::default()`
/// - JSON content type with an empty body → `T::default()`
/// - JSON content type with an unparseable body → 400
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned + Default,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    if !is_json(req.headers()) {
      return Ok(Self(T::default()));
    }

    let bytes = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self(T::default()));
    }

    serde_json::from_slice(&bytes)
      .map(Self)
      .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {e}")))
  }
}

/// `application/json`, or any `application/*+json` media type.
fn is_json(headers: &HeaderMap) -> bool {
  let Some(content_type) = headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
  else {
    return false;
  };
  let essence = content_type
    .split(';')
    .next()
    .unwrap_or_default()
    .trim()
    .to_ascii_lowercase();
  essence == "application/json"
    || (essence.starts_with("application/") && essence.ends_with("+json"))
}
