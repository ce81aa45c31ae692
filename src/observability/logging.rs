//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Honor `RUST_LOG` over the configured default level
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Fault detail is logged here and never exposed over HTTP

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// The environment filter takes precedence; otherwise the configured level
/// applies to the gateway and keeps middleware noise at info.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("nodegate={default_level},tower_http=info").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
