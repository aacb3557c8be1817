//! Typed JSON mirror over a string key/value store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::keys::MirrorKey;

/// String key/value storage.
///
/// Implementations never fail: an unavailable backend behaves like an empty one and writes to
/// it are dropped. The server stays the authoritative copy.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Last-write-wins copy of server data, keyed by [`MirrorKey`].
#[derive(Clone, Debug)]
pub struct Mirror<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Mirror<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Mirrored value, or `None` when absent or no longer decodable.
    pub fn load<T: DeserializeOwned>(&self, key: &MirrorKey) -> Option<T> {
        let raw = self.store.get(key.as_str())?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = key.as_str(), "dropping unreadable mirror entry: {e}");
                self.store.remove(key.as_str());
                None
            }
        }
    }

    pub fn save<T: Serialize>(&self, key: &MirrorKey, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.set(key.as_str(), &raw),
            Err(e) => tracing::warn!(key = key.as_str(), "could not encode mirror entry: {e}"),
        }
    }

    pub fn clear(&self, key: &MirrorKey) {
        self.store.remove(key.as_str());
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::MemoryStore;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Meal {
        name: String,
        description: String,
    }

    #[test]
    fn later_saves_replace_earlier_ones() {
        let mirror = Mirror::new(MemoryStore::new());
        let key = MirrorKey::diet("c1");

        mirror.save(
            &key,
            &vec![Meal {
                name: "Breakfast".into(),
                description: "Oats".into(),
            }],
        );
        mirror.save(
            &key,
            &vec![Meal {
                name: "Lunch".into(),
                description: "Rice".into(),
            }],
        );

        let meals: Vec<Meal> = mirror.load(&key).unwrap();
        assert_eq!(meals.len(), 1);
        assert_eq!(meals[0].name, "Lunch");
    }

    #[test]
    fn unreadable_entries_are_dropped() {
        let store = MemoryStore::new();
        store.set("supps_2025-03-01", "{not json");
        let mirror = Mirror::new(store);
        let key = MirrorKey::supplements("2025-03-01");

        assert_eq!(mirror.load::<Vec<String>>(&key), None);
        assert!(mirror.store().is_empty());
    }

    #[test]
    fn clear_removes_the_entry() {
        let mirror = Mirror::new(MemoryStore::new());
        let key = MirrorKey::exercises("c1");
        mirror.save(&key, &vec!["Squat".to_string()]);
        mirror.clear(&key);
        assert_eq!(mirror.load::<Vec<String>>(&key), None);
    }
}
