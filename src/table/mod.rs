//! HTMX table subsystem.
//!
//! # Data Flow
//! ```text
//! Page render:
//!     TableConfig → registry.rs (register, last write wins)
//!     → render page 1 → Fragment embedded in the page
//!
//! Partial render (GET /_bento/table/{id}?page=&page_size=&sort=&direction=):
//!     query.rs (lenient parse) → TableView
//!     → registry.rs (lookup, fresh frame via data::normalize)
//!     → render.rs (sort → clamp → slice → HTML)
//!     → fragment that replaces #table-{id} (outerHTML swap)
//! ```

pub mod config;
pub mod pager;
pub mod query;
pub mod registry;
pub mod render;

pub use config::{TableConfig, DEFAULT_PAGE_SIZE};
pub use pager::PageWindow;
pub use query::{TableQuery, TableView};
pub use registry::TableRegistry;
pub use render::{render_table, render_table_html, table_url, TABLE_ENDPOINT};
