//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! signals.rs: SIGINT / SIGTERM
//!     → shutdown.rs: Shutdown::trigger (broadcast)
//!     → HttpServer::run stops accepting, drains in-flight requests, returns
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
