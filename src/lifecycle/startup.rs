//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the watcher from host options
//! - Perform the initial load
//! - Wire the provider to the watcher's record

use std::sync::Arc;

use crate::config::schema::ProviderOptions;
use crate::config::watcher::{ConfigWatcher, LoadState};
use crate::provider::{ExclusionMatcher, LeftClickConfig};

/// A loaded provider together with the watcher feeding it.
pub struct Started {
    pub provider: LeftClickConfig,
    pub watcher: ConfigWatcher,
}

/// Create the LeftClick provider described by `options`.
pub fn start(options: &ProviderOptions, matcher: Arc<dyn ExclusionMatcher>) -> Started {
    let mut watcher = ConfigWatcher::new(options.reload_mode).with_watch(options.watch);
    let state = watcher.set_config_file(options.config_file.as_deref());

    if state == LoadState::Unavailable {
        tracing::debug!(
            path = ?watcher.config_file(),
            "Starting without LeftClick configuration"
        );
    }

    let provider = LeftClickConfig::new(watcher.handle(), matcher);
    Started { provider, watcher }
}
