//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     ProviderOptions → ConfigWatcher → initial load → LeftClickConfig
//!
//! Signals (signals.rs):
//!     SIGHUP → ReloadTrigger (full reload)
//!     SIGTERM/SIGINT → Shutdown
//!
//! Shutdown (shutdown.rs):
//!     Broadcast → watcher task exits → subscription released
//! ```
//!
//! # Design Decisions
//! - The initial load happens synchronously during startup
//! - A missing file at startup is not an error; the provider simply has no opinion

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{start, Started};
