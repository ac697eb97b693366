//! State Management
//!
//! Global signals, the browser presenter and token storage.

pub mod global;
pub mod storage;

pub use global::{provide_global_state, use_client, use_global_state, GlobalState};
