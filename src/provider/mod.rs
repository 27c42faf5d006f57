//! Proxy configuration providers.
//!
//! # Data Flow
//! ```text
//! Host request (URL)
//!     → ConfigProvider::get_config (one provider per backend, ordered by Priority)
//!     → leftclick.rs: snapshot ConfigRecord from the watcher
//!     → decision.rs: availability, exclusion, scheme, formatting
//!     → Return: zero or one proxy directive
//! ```
//!
//! # Design Decisions
//! - Providers are trait objects; name and priority are static metadata
//! - Exclusion matching belongs to the host and is injected as [`ExclusionMatcher`]
//! - "No opinion" is an empty result, letting the host fall through to the next
//!   provider

pub mod decision;
pub mod leftclick;

use url::Url;

pub use decision::decide;
pub use leftclick::LeftClickConfig;

/// Order in which a host consults providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    First,
    Default,
    Last,
}

/// A source of proxy configuration.
pub trait ConfigProvider: Send + Sync {
    /// Stable provider name.
    fn name(&self) -> &'static str;

    /// Where this provider sits in the host's lookup order.
    fn priority(&self) -> Priority;

    /// Proxy directives for `uri`; empty means no opinion.
    fn get_config(&self, uri: &Url) -> Vec<String>;
}

/// Host-supplied check deciding whether `uri` matches an exclusion list.
pub trait ExclusionMatcher: Send + Sync {
    fn is_excluded(&self, uri: &Url, patterns: &[String]) -> bool;
}

impl<F> ExclusionMatcher for F
where
    F: Fn(&Url, &[String]) -> bool + Send + Sync,
{
    fn is_excluded(&self, uri: &Url, patterns: &[String]) -> bool {
        self(uri, patterns)
    }
}
