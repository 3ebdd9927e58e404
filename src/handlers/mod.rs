//! MCP tool handlers for the taskboard server
//!
//! Each file adds `handle_*` methods to `TaskboardHandler` for one group of
//! tools; the `#[tool]` methods in `lib.rs` delegate to them.

pub mod categories;
pub mod notifications;
pub mod projects;
pub mod tasks;
pub mod views;
