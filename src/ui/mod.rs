//! UI rendering module for memegle
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod home;
pub mod search;

pub use help_overlay::render as render_help_overlay;
pub use home::render as render_home;
pub use search::render as render_search;
