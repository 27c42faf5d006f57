//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config/watcher.rs, provider/leftclick.rs produce:
//!     → tracing events (structured fields, see logging.rs)
//!     → metrics counters (loads, watch failures, decisions)
//!
//! Consumers:
//!     → Whatever subscriber/recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a global recorder or subscriber itself
//! - Load failures log at debug: a missing file is the normal "no config" state
//! - Watch setup failures log at warn: reload silently stops working otherwise

pub mod logging;
pub mod metrics;
