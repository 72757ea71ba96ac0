//! Synchronous key-value persistence for the Vitrine storefront.
//!
//! Client state (the shopping cart, mostly) is mirrored into a small
//! key-value medium after every change. This crate provides the medium:
//!
//! - [`KeyValueStore`] - the raw byte-level contract
//! - [`MemoryStore`] - shared in-memory map, for tests and fallback
//! - [`FileStore`] - one JSON file per key, written atomically
//! - `SpinStore` - Spin's Key-Value Store (wasm32 only)
//! - [`Cache`] - typed JSON access on top of any store
//!
//! # Example
//!
//! ```rust
//! use vitrine_cache::{Cache, MemoryStore};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! struct Favorites {
//!     ids: Vec<String>,
//! }
//!
//! let cache = Cache::new(MemoryStore::new());
//! let favs = Favorites { ids: vec!["batom-01".into()] };
//!
//! cache.set("favorites", &favs).unwrap();
//! let loaded: Option<Favorites> = cache.get("favorites").unwrap();
//! assert_eq!(loaded, Some(favs));
//! ```

mod error;
mod kv;
mod session;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use session::SessionId;
pub use store::{FileStore, KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore, SessionId};
}
