//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color palette and text styling
//! - `tabs`: Per-tab content (catalog lists, advisor, contact, admin)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
