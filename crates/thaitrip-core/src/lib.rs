//! Core library for the Afim Rahok travel catalog.
//!
//! - `models`: packages, hotels, destinations, chat and lead types
//! - `catalog`: bundled defaults, display ordering, the data-access layer
//!   and the read-view fallback policy
//! - `api`: the remote store collaborator (PostgREST over HTTP, in-memory)
//! - `cache`: the on-device fallback cache
//! - `auth`: the cosmetic admin gate
//! - `admin`: admin panel state, forms and local patches
//! - `lead`: contact form webhook client
//! - `advisor`: chat transcript and text-generation client

pub mod admin;
pub mod advisor;
pub mod api;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod lead;
pub mod models;
pub mod utils;

pub use api::{MemoryStore, RemoteStore, RestStore, StoreError};
pub use catalog::{Catalog, CatalogEntity, EntityKind};
pub use config::Config;
pub use models::{Destination, Hotel, Package, TripFilter, TripType};
