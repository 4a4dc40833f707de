use crate::Database;
use rusqlite::{params, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;

/// Setting keys shared by every store implementation.
pub mod keys {
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const TOKEN: &str = "token";
    pub const USER: &str = "user";
    pub const THEME: &str = "theme";
    pub const USE_REAL_TIME_DATA: &str = "useRealTimeData";
}

/// String key/value persistence.
pub trait SettingsStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}

impl SettingsStore for Database {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let conn = self.conn.borrow();
        let value = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        log::debug!("setting {} = {}", key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Volatile store, for tests and for browsers without `localStorage`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn SettingsStore) {
        assert_eq!(store.get("missing").unwrap(), None);
        store.set(keys::THEME, "light").unwrap();
        store.set(keys::THEME, "dark").unwrap();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark"));
        store.remove(keys::THEME).unwrap();
        assert_eq!(store.get(keys::THEME).unwrap(), None);
        // removing an absent key is fine
        store.remove(keys::THEME).unwrap();
    }

    #[test]
    fn sqlite_store_get_set_remove() {
        exercise(&Database::new().unwrap());
    }

    #[test]
    fn memory_store_get_set_remove() {
        exercise(&MemoryStore::default());
    }
}
