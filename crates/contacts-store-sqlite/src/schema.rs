//! SQL schema for the contacts document store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `seq` only provides the collection's natural order; callers never see it.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    seq       INTEGER PRIMARY KEY AUTOINCREMENT,
    id        TEXT    NOT NULL UNIQUE,   -- hyphenated lowercase UUID
    document  TEXT    NOT NULL           -- JSON object, five business attributes
);

PRAGMA user_version = 1;
";
