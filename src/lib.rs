//! LeftClick proxy configuration provider.
//!
//! Reads the legacy LeftClick player XML file, follows edits to it, and tells a
//! host which proxy (if any) to use for a given URL.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod provider;

pub use config::{ConfigRecord, ConfigWatcher, ProviderOptions, ReloadMode};
pub use provider::{ConfigProvider, ExclusionMatcher, LeftClickConfig, Priority};
