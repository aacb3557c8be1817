pub mod keys;
pub mod mirror;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorageStore;

pub use keys::MirrorKey;
pub use mirror::{KeyValueStore, Mirror};
