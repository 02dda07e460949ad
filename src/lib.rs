//! memegle library
//!
//! GIPHY access with a time-boxed trending cache, plus the TUI state and
//! rendering used by the `memegle` binary.

pub mod api;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod ui;
