//! Remote store collaborator.
//!
//! This module provides the `RemoteStore` seam the catalog talks through,
//! with two implementations:
//!
//! - `RestStore`: PostgREST endpoints of the hosted Supabase project,
//!   authenticated with the project's anon key
//! - `MemoryStore`: in-process tables for demo mode and tests

pub mod error;
pub mod memory;
pub mod rest;
pub mod store;

pub use error::StoreError;
pub use memory::{MemoryStore, StoreOp};
pub use rest::RestStore;
pub use store::RemoteStore;
