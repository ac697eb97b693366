//! Notes Backend Access
//!
//! Browser implementation of the backend trait over `fetch`.

pub mod client;

pub use client::{get_api_base, set_api_base, GlooBackend};
