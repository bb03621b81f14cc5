//! Handlers for the contacts collection, mounted under `/contacts`.
//!
//! | Method   | Path    | Notes |
//! |----------|---------|-------|
//! | `GET`    | `/`     | Every contact, store order |
//! | `GET`    | `/{id}` | 404 if not found |
//! | `POST`   | `/`     | All five fields required; returns 201 + `{message, id}` |
//! | `PUT`    | `/{id}` | Full replace, no presence check; 404 if nothing changed |
//! | `DELETE` | `/{id}` | 404 if nothing removed |
//!
//! A path id that does not parse is reported as a 500, like a store failure.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use contacts_core::{
  contact::{Contact, ContactFields, NewContact},
  id::ContactId,
  store::ContactStore,
};
use serde::Serialize;

use crate::{body::JsonBody, error::ApiError};

// ─── Responses ───────────────────────────────────────────────────────────────

/// Body of a successful write.
#[derive(Debug, Serialize)]
pub struct Confirmation {
  pub message: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id:      Option<ContactId>,
}

fn confirm(message: &'static str) -> Json<Confirmation> {
  Json(Confirmation { message, id: None })
}

fn parse_id(raw: &str, message: &'static str) -> Result<ContactId, ApiError> {
  raw
    .parse()
    .map_err(|_| ApiError::InvalidId { id: raw.to_owned(), message })
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: ContactStore,
{
  let contacts = store
    .list()
    .await
    .map_err(ApiError::store("Failed to get contacts"))?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
{
  const FAILED: &str = "Invalid contact ID";

  let id = parse_id(&raw_id, FAILED)?;
  let contact = store
    .get(id)
    .await
    .map_err(ApiError::store(FAILED))?
    .ok_or(ApiError::NotFound("Contact not found"))?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + `{"message", "id"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<ContactFields>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let contact = NewContact::try_from(body).map_err(|e| {
    tracing::debug!(error = %e, "rejected contact");
    ApiError::BadRequest("All fields are required.".to_owned())
  })?;

  let id = store
    .insert(contact)
    .await
    .map_err(ApiError::store("Failed to create contact"))?;

  tracing::info!(%id, "created contact");
  Ok((
    StatusCode::CREATED,
    Json(Confirmation { message: "Contact created", id: Some(id) }),
  ))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` — overwrites all five fields; omitted ones become
/// `null`.
pub async fn replace_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  JsonBody(body): JsonBody<ContactFields>,
) -> Result<Json<Confirmation>, ApiError>
where
  S: ContactStore,
{
  const FAILED: &str = "Failed to update contact";

  let id = parse_id(&raw_id, FAILED)?;
  let outcome = store
    .replace(id, body)
    .await
    .map_err(ApiError::store(FAILED))?;

  // Not found and unchanged share one response; only the log tells them
  // apart.
  if outcome.modified == 0 {
    if outcome.matched == 0 {
      tracing::debug!(%id, "replace matched no contact");
    } else {
      tracing::debug!(%id, "replace left contact unchanged");
    }
    return Err(ApiError::NotFound("Contact not found or data unchanged"));
  }

  tracing::info!(%id, "updated contact");
  Ok(confirm("Contact updated"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Confirmation>, ApiError>
where
  S: ContactStore,
{
  const FAILED: &str = "Failed to delete contact";

  let id = parse_id(&raw_id, FAILED)?;
  let deleted = store
    .delete(id)
    .await
    .map_err(ApiError::store(FAILED))?;

  if deleted == 0 {
    return Err(ApiError::NotFound("Contact not found"));
  }

  tracing::info!(%id, "deleted contact");
  Ok(confirm("Contact deleted"))
}
