//! Machine-readable description of the contacts routes.
//!
//! The document is assembled with utoipa's builders rather than derived from
//! handler annotations, because the handlers are generic over the store.

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use utoipa::openapi::{
  OpenApi, OpenApiBuilder, Ref, RefOr, Required,
  content::ContentBuilder,
  info::InfoBuilder,
  path::{
    HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem,
    PathItemBuilder, PathsBuilder,
  },
  request_body::RequestBodyBuilder,
  response::{Response, ResponseBuilder, ResponsesBuilder},
  schema::{
    ArrayBuilder, ComponentsBuilder, KnownFormat, ObjectBuilder, Schema,
    SchemaFormat, SchemaType, Type,
  },
  tag::TagBuilder,
};

const TAG: &str = "Contacts";
const JSON: &str = "application/json";

// ─── Schemas ─────────────────────────────────────────────────────────────────

fn string() -> ObjectBuilder {
  ObjectBuilder::new().schema_type(SchemaType::Type(Type::String))
}

fn schema_ref(name: &str) -> RefOr<Schema> {
  RefOr::Ref(Ref::from_schema_name(name))
}

fn object() -> ObjectBuilder {
  ObjectBuilder::new().schema_type(SchemaType::Type(Type::Object))
}

/// Add the five business attributes to `obj`.
fn with_contact_properties(mut obj: ObjectBuilder) -> ObjectBuilder {
  for name in ["firstName", "lastName", "email", "favoriteColor"] {
    obj = obj.property(name, Schema::Object(string().build()));
  }
  obj.property(
    "birthday",
    Schema::Object(
      string()
        .format(Some(SchemaFormat::KnownFormat(KnownFormat::Date)))
        .build(),
    ),
  )
}

/// A request body; `required` marks all five attributes as mandatory.
fn contact_body(required: bool) -> Schema {
  let mut obj = with_contact_properties(object());
  if required {
    for name in contacts_core::contact::ContactFields::REQUIRED {
      obj = obj.required(name);
    }
  }
  Schema::Object(obj.build())
}

fn contact() -> Schema {
  let obj = object()
    .property(
      "_id",
      Schema::Object(
        string()
          .description(Some("Store-assigned contact identifier"))
          .build(),
      ),
    )
    .required("_id");
  Schema::Object(with_contact_properties(obj).build())
}

fn message(with_id: bool) -> Schema {
  let mut obj = object()
    .property("message", Schema::Object(string().build()))
    .required("message");
  if with_id {
    obj = obj.property("id", Schema::Object(string().build())).required("id");
  }
  Schema::Object(obj.build())
}

fn error() -> Schema {
  Schema::Object(
    object()
      .property("error", Schema::Object(string().build()))
      .required("error")
      .build(),
  )
}

// ─── Operations ──────────────────────────────────────────────────────────────

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
  ResponseBuilder::new()
    .description(description)
    .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
    .build()
}

fn operation(
  id: &str,
  summary: &str,
  with_id_param: bool,
  responses: &[(u16, &str, RefOr<Schema>)],
) -> OperationBuilder {
  let mut op = OperationBuilder::new()
    .operation_id(Some(id))
    .summary(Some(summary))
    .tag(TAG);

  if with_id_param {
    op = op.parameter(
      ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("Contact identifier"))
        .schema(Some(Schema::Object(string().build())))
        .build(),
    );
  }

  let mut builder = ResponsesBuilder::new();
  for (status, description, schema) in responses {
    builder = builder.response(status.to_string(), json_response(description, schema.clone()));
  }
  op.responses(builder.build())
}

fn with_body(op: OperationBuilder, schema: &str) -> OperationBuilder {
  op.request_body(Some(
    RequestBodyBuilder::new()
      .required(Some(Required::True))
      .content(JSON, ContentBuilder::new().schema(Some(schema_ref(schema))).build())
      .build(),
  ))
}

fn collection_item() -> PathItem {
  let list = operation("list_contacts", "Get all contacts", false, &[
    (
      200,
      "List of contacts",
      RefOr::T(Schema::Array(ArrayBuilder::new().items(schema_ref("Contact")).build())),
    ),
    (500, "Failed to get contacts", schema_ref("Error")),
  ]);
  let create = with_body(
    operation("create_contact", "Create a new contact", false, &[
      (201, "Contact created", schema_ref("Created")),
      (400, "Missing required fields", schema_ref("Error")),
      (500, "Failed to create contact", schema_ref("Error")),
    ]),
    "NewContact",
  );

  PathItemBuilder::new()
    .operation(HttpMethod::Get, list.build())
    .operation(HttpMethod::Post, create.build())
    .build()
}

fn member_item() -> PathItem {
  let get_one = operation("get_contact", "Get a contact by ID", true, &[
    (200, "A single contact object", schema_ref("Contact")),
    (404, "Contact not found", schema_ref("Error")),
    (500, "Invalid contact ID", schema_ref("Error")),
  ]);
  let replace = with_body(
    operation("replace_contact", "Update a contact by ID", true, &[
      (200, "Contact updated", schema_ref("Message")),
      (404, "Contact not found or unchanged", schema_ref("Error")),
      (500, "Failed to update contact", schema_ref("Error")),
    ]),
    "ContactFields",
  );
  let delete = operation("delete_contact", "Delete a contact by ID", true, &[
    (200, "Contact deleted", schema_ref("Message")),
    (404, "Contact not found", schema_ref("Error")),
    (500, "Failed to delete contact", schema_ref("Error")),
  ]);

  PathItemBuilder::new()
    .operation(HttpMethod::Get, get_one.build())
    .operation(HttpMethod::Put, replace.build())
    .operation(HttpMethod::Delete, delete.build())
    .build()
}

// ─── Document ────────────────────────────────────────────────────────────────

/// Build the OpenAPI document for the contacts routes mounted at `prefix`.
pub fn document(prefix: &str) -> OpenApi {
  let prefix = prefix.trim_end_matches('/');

  let paths = PathsBuilder::new()
    .path(prefix.to_owned(), collection_item())
    .path(format!("{prefix}/{{id}}"), member_item())
    .build();

  let components = ComponentsBuilder::new()
    .schema("Contact", contact())
    .schema("NewContact", contact_body(true))
    .schema("ContactFields", contact_body(false))
    .schema("Created", message(true))
    .schema("Message", message(false))
    .schema("Error", error())
    .build();

  OpenApiBuilder::new()
    .info(
      InfoBuilder::new()
        .title("Contacts API")
        .version(env!("CARGO_PKG_VERSION"))
        .description(Some("Create, read, replace and delete contacts"))
        .build(),
    )
    .paths(paths)
    .components(Some(components))
    .tags(Some(vec![
      TagBuilder::new()
        .name(TAG)
        .description(Some("Contacts API endpoints"))
        .build(),
    ]))
    .build()
}

/// `GET /openapi.json`, serving `doc`.
pub fn docs_router(doc: OpenApi) -> Router<()> {
  Router::new()
    .route("/openapi.json", get(serve_document))
    .with_state(Arc::new(doc))
}

async fn serve_document(State(doc): State<Arc<OpenApi>>) -> Json<OpenApi> {
  Json(doc.as_ref().clone())
}
