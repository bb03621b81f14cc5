//! Conversions between domain types and the plain-text columns stored in
//! SQLite.
//!
//! Identifiers are stored as hyphenated lowercase UUID strings. Documents are
//! stored as the compact JSON produced by
//! [`ContactFields::to_document`](contacts_core::contact::ContactFields::to_document).

use contacts_core::{
  contact::{Contact, ContactFields},
  id::ContactId,
};
use uuid::Uuid;

use crate::Result;

pub fn encode_id(id: ContactId) -> String { id.as_uuid().hyphenated().to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> { Ok(Uuid::parse_str(s)?.into()) }

/// A `contacts` row exactly as read from SQLite, before decoding.
pub struct RawContact {
  pub id:       String,
  pub document: String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, document: row.get(1)? })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:     decode_id(&self.id)?,
      fields: ContactFields::from_document(&self.document)?,
    })
  }
}
