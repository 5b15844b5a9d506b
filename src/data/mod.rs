//! Tabular data adapter.
//!
//! # Data Flow
//! ```text
//! TableSource (Static | Lazy | AsyncLazy)
//!     → source.rs (resolve: clone, call, or await the producer)
//!     → TableData (Frame | Records)
//!     → source.rs (records → columns, rows; optional projection)
//!     → DataFrame (immutable, per request)
//!     → frame.rs (sort, slice)
//! ```

pub mod frame;
pub mod source;
pub mod value;

pub use frame::{DataFrame, Direction};
pub use source::{normalize, records_from_json, Record, TableData, TableSource};
pub use value::Value;
