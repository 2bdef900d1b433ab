use slowtide_core::prefs::{KeyValueStore, MemoryStore};
use slowtide_core::{Result, SlowtideError};
use web_sys as web;

fn storage_error(e: wasm_bindgen::JsValue) -> SlowtideError {
    SlowtideError::Storage(format!("{:?}", e))
}

/// `window.localStorage`, or an in-memory map when the browser blocks it
/// (private mode, disabled cookies).
pub enum BrowserStore {
    Local(web::Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        let local = web::window().and_then(|w| w.local_storage().ok().flatten());
        match local {
            Some(storage) => BrowserStore::Local(storage),
            None => {
                log::warn!("[storage] localStorage unavailable; preferences will not persist");
                BrowserStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            BrowserStore::Local(s) => s.get_item(key).map_err(storage_error),
            BrowserStore::Memory(m) => m.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            BrowserStore::Local(s) => s.set_item(key, value).map_err(storage_error),
            BrowserStore::Memory(m) => m.set(key, value),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self {
            BrowserStore::Local(s) => s.remove_item(key).map_err(storage_error),
            BrowserStore::Memory(m) => m.remove(key),
        }
    }
}
