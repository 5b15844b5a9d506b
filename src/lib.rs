//! bentoapp: server-rendered HTMX pages built from composable HTML fragments,
//! with paginated, sortable tables refreshed through partial requests.

pub mod config;
pub mod data;
pub mod demo;
pub mod error;
pub mod html;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pages;
pub mod table;

pub use config::AppConfig;
pub use error::{PageError, TableError};
pub use html::Fragment;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pages::{PageContext, PageRegistry, Route};
pub use table::{TableConfig, TableRegistry};
