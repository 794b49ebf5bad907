//! Catalog content and access.
//!
//! - `defaults`: bundled packages, hotels, destinations and FAQ
//! - `entity`: the `CatalogEntity` trait tying each record type to its table
//! - `order`: display ordering by sort order
//! - `repository`: the data-access layer over a `RemoteStore`
//! - `read`: read views with offline fallback

pub mod defaults;
pub mod entity;
pub mod order;
pub mod read;
pub mod repository;

pub use entity::{CatalogEntity, EntityKind};
pub use order::{effective_sort_order, sort_by_order, DEFAULT_SORT_ORDER};
pub use read::{filter_packages, load_from_cache, load_or_defaults, CatalogSource, CatalogView};
pub use repository::{Catalog, CatalogSnapshot};
