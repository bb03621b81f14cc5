//! Contact types — the single document kind in the `contacts` collection.
//!
//! A stored document is exactly the five business attributes. Creation
//! requires all of them to be truthy; replacement writes whatever the caller
//! supplied, absent attributes included.
//!
//! Attribute values are kept as arbitrary JSON. Clients are expected to send
//! text, but a value of another type is stored as received rather than
//! rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result, id::ContactId};

// ─── ContactFields ───────────────────────────────────────────────────────────

/// The business attributes of a contact, as persisted.
///
/// Every attribute is optional because a full replace may write `null` over
/// any of them. JSON `null` and an absent key both read as `None`.
/// Serialisation keeps `null`s so the stored document always has the same
/// five keys in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
  pub first_name:     Option<Value>,
  pub last_name:      Option<Value>,
  pub email:          Option<Value>,
  pub favorite_color: Option<Value>,
  /// ISO-like date text, e.g. `1990-04-12`. Stored verbatim.
  pub birthday:       Option<Value>,
}

/// JavaScript truthiness: `null`, `false`, `0` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
    Value::String(s) => !s.is_empty(),
    Value::Array(_) | Value::Object(_) => true,
  }
}

impl ContactFields {
  /// Wire names of the attributes a create request must supply.
  pub const REQUIRED: [&'static str; 5] =
    ["firstName", "lastName", "email", "favoriteColor", "birthday"];

  /// Names of the attributes that are absent or falsy.
  pub fn missing(&self) -> Vec<&'static str> {
    [
      &self.first_name,
      &self.last_name,
      &self.email,
      &self.favorite_color,
      &self.birthday,
    ]
    .into_iter()
    .zip(Self::REQUIRED)
    .filter(|(value, _)| !value.as_ref().is_some_and(is_truthy))
    .map(|(_, name)| name)
    .collect()
  }

  /// Encode as the JSON document body stored by a backend.
  pub fn to_document(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  /// Decode a JSON document body previously produced by [`to_document`].
  ///
  /// [`to_document`]: Self::to_document
  pub fn from_document(document: &str) -> Result<Self> {
    Ok(serde_json::from_str(document)?)
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::insert`]: a contact whose five
/// attributes are all present and truthy.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
  pub first_name:     Value,
  pub last_name:      Value,
  pub email:          Value,
  pub favorite_color: Value,
  pub birthday:       Value,
}

impl TryFrom<ContactFields> for NewContact {
  type Error = Error;

  fn try_from(fields: ContactFields) -> Result<Self> {
    let missing = fields.missing();
    if !missing.is_empty() {
      return Err(Error::MissingFields(missing));
    }
    // `missing()` being empty guarantees every attribute is `Some`.
    match fields {
      ContactFields {
        first_name: Some(first_name),
        last_name: Some(last_name),
        email: Some(email),
        favorite_color: Some(favorite_color),
        birthday: Some(birthday),
      } => Ok(Self { first_name, last_name, email, favorite_color, birthday }),
      _ => Err(Error::MissingFields(ContactFields::REQUIRED.to_vec())),
    }
  }
}

impl From<NewContact> for ContactFields {
  fn from(c: NewContact) -> Self {
    Self {
      first_name:     Some(c.first_name),
      last_name:      Some(c.last_name),
      email:          Some(c.email),
      favorite_color: Some(c.favorite_color),
      birthday:       Some(c.birthday),
    }
  }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact: the document plus its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  #[serde(rename = "_id")]
  pub id:     ContactId,
  #[serde(flatten)]
  pub fields: ContactFields,
}
