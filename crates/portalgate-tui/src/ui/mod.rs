//! Terminal UI module using ratatui.
//!
//! - `render`: Frame layout, dashboard panels and overlays
//! - `input`: Keyboard and mouse event handling
//! - `styles`: Color scheme and text styling

pub mod input;
pub mod render;
pub mod styles;
