//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use contacts_core::{
  contact::{Contact, ContactFields, NewContact},
  id::ContactId,
  store::{ContactStore, ReplaceOutcome},
};
use rusqlite::OptionalExtension as _;

use crate::{
  ConnectionString, Result,
  encode::{RawContact, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The `contacts` collection backed by a single SQLite database.
///
/// Cloning is cheap — the inner connection is reference-counted, so every
/// clone shares the one connection opened by [`SqliteStore::connect`].
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Establish the process-wide connection described by `connection_string`.
  ///
  /// Opens the database, initialises the schema and performs one round-trip
  /// query; an `Ok` means the store has answered.
  pub async fn connect(connection_string: &str) -> Result<Self> {
    let target: ConnectionString = connection_string.parse()?;
    let store = match &target {
      ConnectionString::Memory => Self::open_in_memory().await?,
      ConnectionString::File(path) => Self::open(path).await?,
    };
    store.ping().await?;
    tracing::info!(store = %target, "connected to document store");
    Ok(store)
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn ping(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  async fn list(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT id, document FROM contacts ORDER BY seq")?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, document FROM contacts WHERE id = ?1",
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn insert(&self, contact: NewContact) -> Result<ContactId> {
    let id = ContactId::generate();
    let id_str = encode_id(id);
    let document = ContactFields::from(contact).to_document()?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (id, document) VALUES (?1, ?2)",
          rusqlite::params![id_str, document],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(%id, "inserted contact");
    Ok(id)
  }

  async fn replace(
    &self,
    id:     ContactId,
    fields: ContactFields,
  ) -> Result<ReplaceOutcome> {
    let id_str = encode_id(id);
    let document = fields.to_document()?;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let matched: i64 = tx.query_row(
          "SELECT COUNT(*) FROM contacts WHERE id = ?1",
          rusqlite::params![id_str],
          |row| row.get(0),
        )?;
        // An identical document counts as matched but not modified.
        let modified = tx.execute(
          "UPDATE contacts SET document = ?2 WHERE id = ?1 AND document <> ?2",
          rusqlite::params![id_str, document],
        )?;
        tx.commit()?;
        Ok(ReplaceOutcome {
          matched:  matched as u64,
          modified: modified as u64,
        })
      })
      .await?;

    tracing::debug!(%id, ?outcome, "replaced contact");
    Ok(outcome)
  }

  async fn delete(&self, id: ContactId) -> Result<u64> {
    let id_str = encode_id(id);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    tracing::debug!(%id, deleted, "deleted contact");
    Ok(deleted as u64)
  }
}
