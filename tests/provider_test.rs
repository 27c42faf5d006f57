//! Decisions made by the LeftClick provider for the sample configurations.

use leftclick_proxy::config::{LoadState, ProviderOptions, ReloadMode};
use leftclick_proxy::lifecycle;
use leftclick_proxy::{ConfigProvider, LeftClickConfig, Priority};

mod common;

use common::{exact_host_matcher, fixture, url};

fn provider_for(sample: &str) -> (LeftClickConfig, LoadState) {
    let options = ProviderOptions {
        config_file: Some(fixture(sample)),
        reload_mode: ReloadMode::Fresh,
        watch: false,
    };
    let started = lifecycle::start(&options, exact_host_matcher());
    let state = started.watcher.state();
    (started.provider, state)
}

#[test]
fn test_metadata() {
    let (provider, _) = provider_for("manual");
    assert_eq!(provider.name(), "config-leftclick");
    assert_eq!(provider.priority(), Priority::First);
}

#[test]
fn test_manual() {
    let (provider, state) = provider_for("manual");
    assert_eq!(state, LoadState::Available);

    let cases = [
        ("https://www.example.com", Some("http://127.0.0.1:8080")),
        ("http://www.example.com", Some("http://127.0.0.1:8080")),
        ("http://cm.leftclick.cloud", None),
        ("ftp://www.example.com", None),
        ("tcp://localhost:1234", None),
    ];
    for (u, expected) in cases {
        let got = provider.get_config(&url(u));
        assert_eq!(got.first().map(String::as_str), expected, "{}", u);
        assert!(got.len() <= 1);
    }
}

#[test]
fn test_disabled() {
    let (provider, state) = provider_for("disabled");
    assert_eq!(state, LoadState::Available);
    for u in ["https://www.example.com", "http://www.example.com", "ftp://www.example.com"] {
        assert!(provider.get_config(&url(u)).is_empty(), "{}", u);
    }
}

#[test]
fn test_invalid() {
    let (provider, state) = provider_for("invalid");
    assert_eq!(state, LoadState::Unavailable);
    assert!(provider.get_config(&url("https://www.example.com")).is_empty());
}

#[test]
fn test_pac() {
    let (provider, _) = provider_for("pac");
    assert_eq!(
        provider.get_config(&url("https://www.example.com")),
        vec!["pac+http://127.0.0.1/px-manager-sample.pac".to_string()]
    );
    assert!(provider.get_config(&url("https://cm.leftclick.cloud")).is_empty());
}

#[test]
fn test_wpad() {
    let (provider, _) = provider_for("wpad");
    assert_eq!(provider.get_config(&url("http://www.example.com")), vec!["wpad://".to_string()]);
}

#[test]
fn test_missing_file() {
    let (provider, state) = provider_for("does-not-exist");
    assert_eq!(state, LoadState::Unavailable);
    assert!(provider.get_config(&url("http://www.example.com")).is_empty());
}

#[test]
fn test_provider_as_trait_object() {
    let (provider, _) = provider_for("manual");
    let providers: Vec<Box<dyn ConfigProvider>> = vec![Box::new(provider)];
    let first = providers
        .iter()
        .filter(|p| p.priority() == Priority::First)
        .find_map(|p| p.get_config(&url("https://www.example.com")).into_iter().next());
    assert_eq!(first.as_deref(), Some("http://127.0.0.1:8080"));
}
