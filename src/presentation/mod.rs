//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the terminal user interface using ratatui,
//! handles keyboard input, and renders the permission screens, the shop
//! list and the map.

pub mod ui;
pub mod input;
pub mod theme;

pub use ui::*;
pub use input::*;
pub use theme::*;
