//! HTML fragment subsystem.
//!
//! # Data Flow
//! ```text
//! user text / scalars
//!     → fragment.rs (escape)
//!     → components.rs (page, grid, metric, form, ...)
//!     → Fragment (trusted, per-render)
//!     → shell.rs (full document for page routes)
//! ```
//!
//! # Design Decisions
//! - Fragments are plain strings; no DOM model
//! - Composition is concatenation inside a wrapping element
//! - Only the table fragment and its pager are a byte-level wire contract

pub mod components;
pub mod fragment;
pub mod shell;

pub use components::{button, card, grid, input_text, metric, page, text, upload, Form};
pub use fragment::{escape, join, Fragment};
