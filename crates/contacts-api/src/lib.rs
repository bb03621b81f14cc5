//! JSON REST API for the contacts collection.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`]. Listening,
//! logging and configuration are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/contacts", contacts_api::contacts_router(store.clone()))
//! ```

pub mod body;
pub mod contacts;
pub mod error;
pub mod openapi;

use std::sync::Arc;

use axum::{Router, routing::get};
use contacts_core::store::ContactStore;

pub use error::ApiError;

/// Build the contacts router for `store`, with routes relative to the mount
/// point.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn contacts_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/", get(contacts::list::<S>).post(contacts::create::<S>))
    .route(
      "/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::replace_one::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests;
