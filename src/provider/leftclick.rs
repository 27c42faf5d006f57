//! LeftClick configuration provider.
//!
//! Answers decision queries from the record published by a
//! [`ConfigWatcher`](crate::config::watcher::ConfigWatcher).

use std::sync::Arc;
use url::Url;

use crate::config::watcher::ConfigHandle;
use crate::observability::metrics;
use crate::provider::{decide, ConfigProvider, ExclusionMatcher, Priority};

/// Provider backed by the LeftClick XML file.
pub struct LeftClickConfig {
    config: ConfigHandle,
    matcher: Arc<dyn ExclusionMatcher>,
}

impl LeftClickConfig {
    pub const NAME: &'static str = "config-leftclick";

    pub fn new(config: ConfigHandle, matcher: Arc<dyn ExclusionMatcher>) -> Self {
        Self { config, matcher }
    }
}

impl ConfigProvider for LeftClickConfig {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn priority(&self) -> Priority {
        Priority::First
    }

    fn get_config(&self, uri: &Url) -> Vec<String> {
        let record = self.config.load();
        let directive = decide(&record, uri, self.matcher.as_ref());
        metrics::record_decision(directive.is_some());

        tracing::trace!(uri = %uri, directive = ?directive, "LeftClick decision");
        directive.into_iter().collect()
    }
}
