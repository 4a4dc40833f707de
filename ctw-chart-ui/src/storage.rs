//! Browser persistence for the settings store.

use ctw_store::{MemoryStore, SettingsStore};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `SettingsStore` over `window.localStorage`.
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// `None` outside a browser or when storage access is denied.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(BrowserStorage { storage })
    }
}

fn js_error(action: &str, key: &str, err: JsValue) -> anyhow::Error {
    anyhow::anyhow!("localStorage {} '{}' failed: {:?}", action, key, err)
}

impl SettingsStore for BrowserStorage {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("read", key, e))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("write", key, e))
    }

    fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("remove", key, e))
    }
}

/// The browser store, or a volatile one when `localStorage` is unavailable.
pub fn settings_store() -> Rc<dyn SettingsStore> {
    match BrowserStorage::open() {
        Some(storage) => Rc::new(storage),
        None => {
            log::warn!("localStorage unavailable; settings will not persist");
            Rc::new(MemoryStore::default())
        }
    }
}
