//! Structured logging.
//!
//! # Responsibilities
//! - Install the global tracing subscriber once at startup
//! - Derive the filter from `RUST_LOG` or the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(level: &str) -> String {
    format!("bentoapp={level},tower_http={level}")
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
