//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber for binaries
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the built-in default filter
//! - Calling init twice is harmless (second call is ignored)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "leftclick_proxy=info";

/// Install a formatting subscriber filtered by `RUST_LOG` or `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
