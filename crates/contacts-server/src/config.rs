//! Runtime configuration: defaults, then an optional TOML file, then the
//! process environment.

use std::path::Path;

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime server configuration.
///
/// Environment variables are unprefixed: `PORT`, `HOST`, `DATABASE_URL`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Document-store connection string, e.g. `sqlite://contacts.db`.
  pub database_url: String,
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::from_builder(
      Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(Environment::default().try_parsing(true)),
    )
  }

  /// Apply defaults beneath `builder`'s sources and deserialise.
  pub fn from_builder(
    builder: ConfigBuilder<DefaultState>,
  ) -> Result<Self, config::ConfigError> {
    builder
      .set_default("host", DEFAULT_HOST)?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
