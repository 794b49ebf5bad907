//! On-device fallback cache.
//!
//! One JSON file per catalog kind, seeded with the bundled defaults the
//! first time it is read. Independent of the remote store: nothing here
//! is ever synchronized with it.

pub mod manager;

pub use manager::{CacheManager, CachedData};
