//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! LeftClick XML file (/etc/LeftClick/config.xml)
//!     → loader.rs (read bytes)
//!     → parser.rs (streaming parse into ConfigRecord)
//!     → watcher.rs (atomic swap of Arc<ConfigRecord>)
//!     → provider/ reads snapshots
//!
//! On file change:
//!     notify event → channel → watcher.rs
//!     → full reload through the same path
//!
//! Host options (TOML):
//!     → loader.rs (deserialize)
//!     → validation.rs (semantic checks)
//!     → ProviderOptions
//! ```
//!
//! # Design Decisions
//! - A record is immutable once published; changes require a full reload
//! - Missing elements take defaults unless ReloadMode::Retain is selected
//! - Missing or malformed files mean "no opinion", never an error for the host

pub mod loader;
pub mod parser;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::ConfigRecord;
pub use schema::ProviderOptions;
pub use schema::ReloadMode;
pub use watcher::{ConfigHandle, ConfigWatcher, LoadState};
