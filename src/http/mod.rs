//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (x-request-id assigned, propagated to the response)
//!     → server.rs (trace span, timeout, body limit)
//!     → page / partial / directory / table handler
//!     → error.rs (failures → HTML notice + status)
//!     → headers.rs (security headers), gzip
//!     → Send to client
//! ```

pub mod error;
pub mod headers;
pub mod request;
pub mod server;

pub use error::AppError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
