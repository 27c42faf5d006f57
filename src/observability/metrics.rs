//! Metrics collection.
//!
//! # Metrics
//! - `leftclick_config_loads_total` (counter): load attempts by `outcome`
//!   (`available`, `file_unavailable`, `parse_error`)
//! - `leftclick_watch_failures_total` (counter): subscriptions that could not be set up
//! - `leftclick_decisions_total` (counter): decisions by `result` (`proxy`, `none`)
//!
//! # Design Decisions
//! - Uses the `metrics` facade; without an installed recorder updates are no-ops

/// Record a load attempt.
pub fn record_load(outcome: &'static str) {
    metrics::counter!("leftclick_config_loads_total", "outcome" => outcome).increment(1);
}

/// Record a failed file-change subscription.
pub fn record_watch_failure() {
    metrics::counter!("leftclick_watch_failures_total").increment(1);
}

/// Record a decision.
pub fn record_decision(proxied: bool) {
    let result = if proxied { "proxy" } else { "none" };
    metrics::counter!("leftclick_decisions_total", "result" => result).increment(1);
}
