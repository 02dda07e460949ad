//! GIPHY API access
//!
//! `client` is the generic JSON transport; `gifs` builds the trending and
//! search requests on top of it.

pub mod client;
pub mod gifs;

pub use client::{append_search_params, ApiClient, ApiError};
pub use gifs::{page_offset, GifService};
