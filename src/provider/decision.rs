//! Per-request proxy decision.
//!
//! Pure function over a [`ConfigRecord`], the request URL and the host's
//! exclusion check.

use url::Url;

use crate::config::schema::ConfigRecord;
use crate::provider::ExclusionMatcher;

/// Server prefixes passed through untouched for a downstream resolver.
const SENTINEL_PREFIXES: [&str; 2] = ["pac+http://", "wpad://"];

/// Decide the proxy directive for `uri`, or `None` for no opinion.
///
/// Only `http` and `https` URLs are ever proxied. A server starting with
/// `pac+http://` or `wpad://` is returned as-is; anything else is formatted as
/// `http://server[:port]`.
pub fn decide<M>(record: &ConfigRecord, uri: &Url, matcher: &M) -> Option<String>
where
    M: ExclusionMatcher + ?Sized,
{
    if !record.available || !record.enabled {
        return None;
    }

    if matcher.is_excluded(uri, &record.blacklist) {
        return None;
    }

    if !matches!(uri.scheme(), "http" | "https") {
        return None;
    }

    // A record without a server has nothing to route through.
    let server = record.server.as_deref().filter(|s| !s.is_empty())?;

    if SENTINEL_PREFIXES.iter().any(|p| server.starts_with(p)) {
        return Some(server.to_string());
    }

    Some(match &record.port {
        Some(port) => format!("http://{}:{}", server, port),
        None => format!("http://{}", server),
    })
}
