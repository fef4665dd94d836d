//! Connection management: a `rusqlite::Connection` that is always migrated.

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use super::migrations;

/// Owns the SQLite connection used by [`SqliteStateStore`].
///
/// [`SqliteStateStore`]: crate::managers::state_store::SqliteStateStore
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database file at `path` and brings its schema
    /// up to date. Parent directories must already exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "Opened state database");
        Self::migrated(conn)
    }

    /// Opens a throwaway in-memory database, dropped with the `Database`.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::migrated(Connection::open_in_memory()?)
    }

    fn migrated(conn: Connection) -> Result<Self, rusqlite::Error> {
        migrations::run_all(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
