//! SQLite document-store backend for the contacts service.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! connection thread without blocking the async runtime. Each contact is one
//! JSON document keyed by its identifier.

mod connection;
mod encode;
mod schema;
mod store;

pub mod error;

pub use connection::ConnectionString;
pub use error::{Error, Result};
pub use store::SqliteStore;
