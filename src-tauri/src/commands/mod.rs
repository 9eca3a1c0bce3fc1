//! Commands Layer
//!
//! Tauri command handlers that bridge the frontend to the document store.

mod task_cmd;

pub use task_cmd::*;
