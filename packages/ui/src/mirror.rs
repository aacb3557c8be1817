//! Platform-appropriate local mirror.
//!
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Native** (tests, server-side render): process memory via [`store::MemoryStore`]

/// Mirror scoped to an optional user id, so two accounts on one browser keep separate entries.
pub fn make_mirror(user_id: Option<&str>) -> store::Mirror<impl store::KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::Mirror::new(store::LocalStorageStore::with_namespace(user_id))
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let _ = user_id;
        store::Mirror::new(store::MemoryStore::new())
    }
}
