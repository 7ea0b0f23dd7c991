//! Browser persistence.

use ink_core::persist::{KeyValueStore, MemoryStore};
use web_sys::Storage;

/// `window.localStorage`, or an in-memory map when the page has no
/// storage (sandboxed iframes, some private-browsing modes).
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        match storage {
            Some(s) => BrowserStore::Local(s),
            None => {
                log::warn!("localStorage unavailable, changes will not survive a reload");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, BrowserStore::Local(_))
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserStore::Local(s) => s.get_item(key).ok().flatten(),
            BrowserStore::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match self {
            BrowserStore::Local(s) => s
                .set_item(key, value)
                .map_err(|e| format!("{e:?}")),
            BrowserStore::Memory(m) => m.set(key, value),
        }
    }
}
