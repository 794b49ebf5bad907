//! Admin screen: sign-in gate, create forms, reorder edits and the
//! per-kind committed lists, kept in sync with the remote store through
//! explicit patches.

pub mod collection;
pub mod forms;
pub mod messages;
pub mod panel;

pub use collection::{Collection, Patch};
pub use forms::{DestinationForm, EntityForm, HotelForm, PackageForm, ValidationError};
pub use messages::AdminAction;
pub use panel::{AdminPanel, AdminState, Banner, Editable, KindState};
