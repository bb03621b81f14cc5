//! The `ContactStore` trait and its outcome types.
//!
//! The trait is implemented by storage backends (e.g.
//! `contacts-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactFields, NewContact},
  id::ContactId,
};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Result of [`ContactStore::replace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaceOutcome {
  /// Documents whose identifier matched.
  pub matched:  u64,
  /// Documents whose content actually changed. Zero when the replacement is
  /// identical to what was stored.
  pub modified: u64,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the document store holding the `contacts` collection.
///
/// A handle is created once at startup and shared by every request; it is
/// never re-created.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every document in the collection, in the store's natural order.
  fn list(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// Look up one document. Returns `None` if no document has `id`.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a new document and return the identifier the store assigned.
  fn insert(
    &self,
    contact: NewContact,
  ) -> impl Future<Output = Result<ContactId, Self::Error>> + Send + '_;

  /// Overwrite the whole document stored under `id` with `fields`.
  ///
  /// No merge happens: `None` attributes are written as `null`.
  fn replace(
    &self,
    id: ContactId,
    fields: ContactFields,
  ) -> impl Future<Output = Result<ReplaceOutcome, Self::Error>> + Send + '_;

  /// Remove the document stored under `id`; returns how many were removed.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
