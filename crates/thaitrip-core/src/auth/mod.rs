//! Admin gate.
//!
//! - `AdminCredentials`: the configured username/password pair
//! - `AdminSession`: the signed-in flag, persisted in the cache directory
//!
//! The gate is cosmetic. It hides the admin screen and nothing more: the
//! store accepts writes from anyone holding the anon key.

pub mod credentials;
pub mod session;

pub use credentials::AdminCredentials;
pub use session::{AdminSession, AuthState, LoginError, SessionData};
