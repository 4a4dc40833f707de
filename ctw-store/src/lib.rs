//! Persisted settings for the city CO₂ twin.
//!
//! Settings are plain key/value strings. Native builds keep them in a
//! SQLite `settings` table through [`Database`]; the web apps implement
//! [`SettingsStore`] over `window.localStorage` instead. On top of the raw
//! store sit the typed [`AppConfig`] and the demo [`auth`] stub.
//!
//! ```rust
//! use ctw_store::{AppConfig, Database, Theme};
//!
//! let db = Database::new().unwrap();
//! let mut config = AppConfig::load(&db).unwrap();
//! config.theme = Theme::Dark;
//! config.save(&db).unwrap();
//! assert_eq!(AppConfig::load(&db).unwrap().theme, Theme::Dark);
//! ```

pub mod auth;
pub mod config;
pub mod schema;
mod settings;

pub use config::{AppConfig, Theme};
pub use settings::{keys, MemoryStore, SettingsStore};

use rusqlite::Connection;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// SQLite-backed settings database.
///
/// Cheaply cloneable (via `Rc`); clones share one connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        log::debug!("opened settings database {}", path.display());
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> anyhow::Result<Self> {
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        assert!(Database::new().is_ok());
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.set(keys::THEME, "dark").unwrap();
        assert_eq!(db2.get(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_database_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ctw.sqlite");
        {
            let db = Database::open(&path).unwrap();
            db.set(keys::USE_REAL_TIME_DATA, "true").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(
            db.get(keys::USE_REAL_TIME_DATA).unwrap().as_deref(),
            Some("true")
        );
    }
}
