//! HTTP server assembly for the contacts service.
//!
//! [`app`] wires the contacts router under `/contacts`, the welcome endpoint
//! at `/` and the API description under `/api-docs`, then wraps everything
//! in request tracing and trailing-slash normalisation. [`Server`] owns the
//! startup ordering: the store is connected before any socket is bound.

pub mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use axum::{Router, extract::Request, routing::get};
use contacts_core::store::ContactStore;
use contacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower::Layer as _;
use tower_http::{
  normalize_path::{NormalizePath, NormalizePathLayer},
  trace::TraceLayer,
};

pub use config::ServerConfig;

/// Mount point of the contacts collection.
pub const CONTACTS_PREFIX: &str = "/contacts";

pub const WELCOME: &str = "👋 Welcome to the Contacts API";

/// The complete application service.
pub type App = NormalizePath<Router>;

/// Build the complete application around an already-connected store.
///
/// Trailing slashes are trimmed before routing, so `/contacts/` reaches the
/// same handlers as `/contacts`.
pub fn app<S>(store: Arc<S>) -> App
where
  S: ContactStore + 'static,
{
  let router = Router::new()
    .route("/", get(welcome))
    .nest(CONTACTS_PREFIX, contacts_api::contacts_router(store))
    .nest(
      "/api-docs",
      contacts_api::openapi::docs_router(contacts_api::openapi::document(
        CONTACTS_PREFIX,
      )),
    )
    .layer(TraceLayer::new_for_http());
  NormalizePathLayer::trim_trailing_slash().layer(router)
}

async fn welcome() -> &'static str { WELCOME }

// ─── Server ──────────────────────────────────────────────────────────────────

/// A connected store plus a bound listener, ready to serve.
pub struct Server {
  listener: TcpListener,
  app:      App,
}

impl Server {
  /// Connect to the document store, then bind `cfg.address()`.
  ///
  /// A store that does not answer fails startup before the socket is opened.
  pub async fn bind(cfg: &ServerConfig) -> anyhow::Result<Self> {
    let store = SqliteStore::connect(&cfg.database_url)
      .await
      .context("failed to connect to the document store")?;
    let app = app(Arc::new(store));

    let address = cfg.address();
    let listener = TcpListener::bind(&address)
      .await
      .with_context(|| format!("failed to bind {address}"))?;

    Ok(Self { listener, app })
  }

  pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
    self.listener.local_addr()
  }

  /// Serve until the process is stopped.
  pub async fn serve(self) -> anyhow::Result<()> {
    let address = self.local_addr()?;
    tracing::info!("Server running on http://{address}");
    axum::serve(
      self.listener,
      axum::ServiceExt::<Request>::into_make_service(self.app),
    )
    .await
    .context("server error")
  }
}

/// Connect, bind and serve with `cfg`.
pub async fn run(cfg: ServerConfig) -> anyhow::Result<()> {
  Server::bind(&cfg).await?.serve().await
}
