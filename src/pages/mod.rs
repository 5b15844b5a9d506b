//! Page routing subsystem.
//!
//! # Data Flow
//! ```text
//! Assembly:
//!     Route::new(path, name, handler).methods(...)
//!     → registry.rs (ordered pages, partials, default route)
//!     → Arc<PageRegistry> in AppState
//!
//! Request:
//!     axum extracts context.rs (query, form, files, tables)
//!     → route.rs handler (sync or async)
//!     → Fragment → page shell (pages) or bare body (partials)
//! ```

pub mod context;
pub mod registry;
pub mod route;

pub use context::{PageContext, UploadedFile};
pub use registry::PageRegistry;
pub use route::{HandlerFuture, IntoPageResult, Route, RouteHandler};
