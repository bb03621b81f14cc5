//! Router-level tests: requests go through the real extractors and handlers
//! against an in-memory SQLite store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use contacts_core::{
  contact::{Contact, ContactFields, NewContact},
  id::ContactId,
  store::{ContactStore, ReplaceOutcome},
};
use contacts_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::contacts_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  Router::new().nest("/contacts", contacts_router(Arc::new(store)))
}

fn ada() -> Value {
  json!({
    "firstName": "Ada",
    "lastName": "Lovelace",
    "email": "ada@example.com",
    "favoriteColor": "green",
    "birthday": "1815-12-10",
  })
}

async fn send(
  app:    &Router,
  method: &str,
  uri:    &str,
  body:   Option<Value>,
) -> (StatusCode, Value) {
  let builder = Request::builder().method(method).uri(uri);
  let req = match body {
    Some(json) => builder
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(json.to_string())),
    None => builder.body(Body::empty()),
  }
  .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let json = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, json)
}

async fn create(app: &Router, body: Value) -> String {
  let (status, json) = send(app, "POST", "/contacts", Some(body)).await;
  assert_eq!(status, StatusCode::CREATED, "body: {json}");
  json["id"].as_str().expect("id in create response").to_owned()
}

async fn count(app: &Router) -> usize {
  let (status, json) = send(app, "GET", "/contacts", None).await;
  assert_eq!(status, StatusCode::OK);
  json.as_array().unwrap().len()
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_returns_same_fields() {
  let app = app().await;

  let (status, json) = send(&app, "POST", "/contacts", Some(ada())).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(json["message"], "Contact created");
  let id = json["id"].as_str().unwrap();

  let (status, contact) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(contact["_id"], id);
  for key in ["firstName", "lastName", "email", "favoriteColor", "birthday"] {
    assert_eq!(contact[key], ada()[key], "field {key}");
  }
}

#[tokio::test]
async fn create_missing_any_field_is_400_and_writes_nothing() {
  let app = app().await;

  for key in ["firstName", "lastName", "email", "favoriteColor", "birthday"] {
    for broken in [None, Some(Value::Null), Some(json!(""))] {
      let mut body = ada();
      match broken {
        None => {
          body.as_object_mut().unwrap().remove(key);
        }
        Some(v) => body[key] = v,
      }

      let (status, json) = send(&app, "POST", "/contacts", Some(body)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "field {key}");
      assert_eq!(json, json!({ "error": "All fields are required." }));
    }
  }

  assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn create_with_falsy_non_string_is_400_with_required_message() {
  let app = app().await;

  for falsy in [json!(false), json!(0)] {
    let mut body = ada();
    body["email"] = falsy.clone();

    let (status, json) = send(&app, "POST", "/contacts", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "value {falsy}");
    assert_eq!(json, json!({ "error": "All fields are required." }));
  }

  assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn create_stores_truthy_non_string_values() {
  let app = app().await;
  let mut body = ada();
  body["birthday"] = json!(19901231);

  let id = create(&app, body).await;
  let (status, contact) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(contact["birthday"], json!(19901231));
}

#[tokio::test]
async fn create_without_json_body_is_400() {
  let app = app().await;

  let (status, json) = send(&app, "POST", "/contacts", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(json["error"], "All fields are required.");

  // A body sent without a JSON content type is not parsed.
  let req = Request::builder()
    .method("POST")
    .uri("/contacts")
    .header(header::CONTENT_TYPE, "text/plain")
    .body(Body::from(ada().to_string()))
    .unwrap();
  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn create_with_malformed_json_is_400() {
  let app = app().await;
  let req = Request::builder()
    .method("POST")
    .uri("/contacts")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{\"firstName\": "))
    .unwrap();

  let resp = app.clone().oneshot(req).await.unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let json: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(json["error"].is_string());
}

#[tokio::test]
async fn create_drops_unknown_fields() {
  let app = app().await;
  let mut body = ada();
  body["isAdmin"] = json!(true);

  let id = create(&app, body).await;
  let (_, contact) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
  assert!(contact.get("isAdmin").is_none(), "contact: {contact}");
}

#[tokio::test]
async fn get_unknown_id_is_404() {
  let app = app().await;
  let uri = format!("/contacts/{}", ContactId::generate());

  let (status, json) = send(&app, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json, json!({ "error": "Contact not found" }));
}

#[tokio::test]
async fn malformed_id_is_500_on_every_member_route() {
  let app = app().await;
  let uri = "/contacts/not-a-valid-id";

  let (status, json) = send(&app, "GET", uri, None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json["error"], "Invalid contact ID");

  let (status, json) = send(&app, "PUT", uri, Some(ada())).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json["error"], "Failed to update contact");

  let (status, json) = send(&app, "DELETE", uri, None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(json["error"], "Failed to delete contact");

  // The service keeps answering afterwards.
  assert_eq!(count(&app).await, 0);
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_then_get_reflects_new_values() {
  let app = app().await;
  let id = create(&app, ada()).await;
  let uri = format!("/contacts/{id}");

  let mut updated = ada();
  updated["favoriteColor"] = json!("purple");
  updated["email"] = json!("countess@example.com");

  let (status, json) = send(&app, "PUT", &uri, Some(updated.clone())).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "message": "Contact updated" }));

  let (_, contact) = send(&app, "GET", &uri, None).await;
  assert_eq!(contact["favoriteColor"], "purple");
  assert_eq!(contact["email"], "countess@example.com");
  assert_eq!(contact["firstName"], "Ada");
}

#[tokio::test]
async fn replace_with_identical_payload_is_404_but_document_remains() {
  let app = app().await;
  let id = create(&app, ada()).await;
  let uri = format!("/contacts/{id}");

  let (status, json) = send(&app, "PUT", &uri, Some(ada())).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json, json!({ "error": "Contact not found or data unchanged" }));

  let (status, _) = send(&app, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn replace_with_partial_body_nulls_omitted_fields() {
  let app = app().await;
  let id = create(&app, ada()).await;
  let uri = format!("/contacts/{id}");

  let (status, _) =
    send(&app, "PUT", &uri, Some(json!({ "firstName": "Augusta" }))).await;
  assert_eq!(status, StatusCode::OK);

  let (_, contact) = send(&app, "GET", &uri, None).await;
  assert_eq!(contact["firstName"], "Augusta");
  for key in ["lastName", "email", "favoriteColor", "birthday"] {
    assert_eq!(contact[key], Value::Null, "field {key}");
  }
}

#[tokio::test]
async fn replace_with_non_string_values_stores_them() {
  let app = app().await;
  let id = create(&app, ada()).await;
  let uri = format!("/contacts/{id}");

  let mut body = ada();
  body["firstName"] = json!(42);
  body["favoriteColor"] = json!(false);

  let (status, json) = send(&app, "PUT", &uri, Some(body)).await;
  assert_eq!(status, StatusCode::OK, "body: {json}");

  let (_, contact) = send(&app, "GET", &uri, None).await;
  assert_eq!(contact["firstName"], json!(42));
  assert_eq!(contact["favoriteColor"], json!(false));
}

#[tokio::test]
async fn replace_without_body_nulls_everything() {
  let app = app().await;
  let id = create(&app, ada()).await;
  let uri = format!("/contacts/{id}");

  let (status, _) = send(&app, "PUT", &uri, None).await;
  assert_eq!(status, StatusCode::OK);

  let (_, contact) = send(&app, "GET", &uri, None).await;
  assert_eq!(contact["_id"], id.as_str());
  assert_eq!(contact["firstName"], Value::Null);
}

#[tokio::test]
async fn replace_unknown_id_is_404() {
  let app = app().await;
  let uri = format!("/contacts/{}", ContactId::generate());

  let (status, _) = send(&app, "PUT", &uri, Some(ada())).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(count(&app).await, 0);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_get_and_delete_again_are_404() {
  let app = app().await;
  let id = create(&app, ada()).await;
  let uri = format!("/contacts/{id}");

  let (status, json) = send(&app, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(json, json!({ "message": "Contact deleted" }));

  let (status, _) = send(&app, "GET", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, json) = send(&app, "DELETE", &uri, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(json["error"], "Contact not found");
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_every_created_contact() {
  let app = app().await;
  assert_eq!(count(&app).await, 0);

  let mut ids = Vec::new();
  for n in 0..4 {
    let mut body = ada();
    body["email"] = json!(format!("ada{n}@example.com"));
    ids.push(create(&app, body).await);
  }

  let (status, json) = send(&app, "GET", "/contacts", None).await;
  assert_eq!(status, StatusCode::OK);
  let listed: Vec<&str> = json
    .as_array()
    .unwrap()
    .iter()
    .map(|c| c["_id"].as_str().unwrap())
    .collect();
  assert_eq!(listed.len(), ids.len());
  for id in &ids {
    assert!(listed.contains(&id.as_str()), "missing {id}");
  }
}

// ─── Store failures ──────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("disk unavailable: /var/lib/contacts/secret.db")]
struct Unavailable;

/// A store whose every operation fails.
struct FailingStore;

impl ContactStore for FailingStore {
  type Error = Unavailable;

  async fn list(&self) -> Result<Vec<Contact>, Unavailable> { Err(Unavailable) }

  async fn get(&self, _id: ContactId) -> Result<Option<Contact>, Unavailable> {
    Err(Unavailable)
  }

  async fn insert(&self, _contact: NewContact) -> Result<ContactId, Unavailable> {
    Err(Unavailable)
  }

  async fn replace(
    &self,
    _id: ContactId,
    _fields: ContactFields,
  ) -> Result<ReplaceOutcome, Unavailable> {
    Err(Unavailable)
  }

  async fn delete(&self, _id: ContactId) -> Result<u64, Unavailable> {
    Err(Unavailable)
  }
}

#[tokio::test]
async fn store_failures_are_500_without_details() {
  let app = Router::new().nest("/contacts", contacts_router(Arc::new(FailingStore)));
  let member = format!("/contacts/{}", ContactId::generate());

  let cases = [
    ("GET", "/contacts", None, "Failed to get contacts"),
    ("GET", member.as_str(), None, "Invalid contact ID"),
    ("POST", "/contacts", Some(ada()), "Failed to create contact"),
    ("PUT", member.as_str(), Some(ada()), "Failed to update contact"),
    ("DELETE", member.as_str(), None, "Failed to delete contact"),
  ];

  for (method, uri, body, message) in cases {
    let (status, json) = send(&app, method, uri, body).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
    assert_eq!(json, json!({ "error": message }), "{method} {uri}");
  }
}

#[tokio::test]
async fn validation_runs_before_store() {
  let app = Router::new().nest("/contacts", contacts_router(Arc::new(FailingStore)));
  let (status, _) = send(&app, "POST", "/contacts", Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}
