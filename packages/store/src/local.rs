//! # `localStorage` store: browser-side mirror persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**. Values are
//! written to `window.localStorage` under the mirror key, optionally prefixed with a user
//! namespace so two accounts signed in on the same browser do not read each other's entries.
//!
//! ## Error handling
//!
//! Every browser failure (no window, storage disabled, quota exceeded) is swallowed: reads
//! return `None` and writes are dropped. A missing mirror only means the page waits for the
//! server before showing data.

use web_sys::Storage;

use crate::mirror::KeyValueStore;

#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: String,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// - `Some("user-uuid")` → keys stored as `"user-uuid:<key>"`
    /// - `None` → keys stored as-is
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        let prefix = match namespace {
            Some(ns) => format!("{ns}:"),
            None => String::new(),
        };
        Self { prefix }
    }

    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(&self.full_key(key)).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            return;
        };
        if storage.set_item(&self.full_key(key), value).is_err() {
            tracing::warn!(key, "localStorage write rejected");
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.full_key(key));
        }
    }
}
