//! Server-rendered purchase order pages.
//!
//! Fetches the list from the read API, derives per-order totals and renders
//! either the plain table or the sortable/selectable index table.

pub mod app;
pub mod fetch;
pub mod format;
pub mod render;
pub mod view;
