//! Parsing of document-store connection strings.

use std::{fmt, path::PathBuf, str::FromStr};

use crate::Error;

/// Where [`SqliteStore::connect`](crate::SqliteStore::connect) should open
/// its database.
///
/// | Input | Result |
/// |-------|--------|
/// | `sqlite::memory:`, `:memory:` | [`ConnectionString::Memory`] |
/// | `sqlite://<path>`, `sqlite:<path>`, `<path>` | [`ConnectionString::File`] |
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionString {
  Memory,
  File(PathBuf),
}

impl FromStr for ConnectionString {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let rest = match s.strip_prefix("sqlite:") {
      Some(rest) => rest.strip_prefix("//").unwrap_or(rest),
      None if s.contains("://") => {
        return Err(Error::ConnectionString(
          s.to_owned(),
          "unsupported scheme; expected sqlite:",
        ));
      }
      None => s,
    };

    match rest {
      "" => Err(Error::ConnectionString(s.to_owned(), "no database path given")),
      ":memory:" => Ok(Self::Memory),
      path => Ok(Self::File(PathBuf::from(path))),
    }
  }
}

impl fmt::Display for ConnectionString {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Memory => f.write_str("sqlite::memory:"),
      Self::File(path) => write!(f, "sqlite://{}", path.display()),
    }
  }
}
