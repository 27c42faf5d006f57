//! Configuration schema definitions.
//!
//! Two kinds of configuration live here:
//! - [`ConfigRecord`], the proxy settings parsed out of the LeftClick XML file.
//! - [`ProviderOptions`], the host-side options deserialized from TOML.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Path used when the host does not supply a configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/LeftClick/config.xml";

/// Proxy settings parsed from a LeftClick configuration file.
///
/// A record is never mutated once it has been published; every reload builds a
/// new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRecord {
    /// Whether manual proxying is active at all.
    pub enabled: bool,

    /// Hostname, bare IP, or a `pac+http://` / `wpad://` sentinel.
    pub server: Option<String>,

    /// Decimal port text, only used when `server` is a bare host.
    pub port: Option<String>,

    /// Hosts or patterns that must never be proxied.
    pub blacklist: Vec<String>,

    /// Whether the last load attempt succeeded.
    ///
    /// `false` means the provider has no opinion, not that proxying is off.
    pub available: bool,
}

impl ConfigRecord {
    /// Record published when the file could not be read or parsed.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// How a reload treats elements missing from the new file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadMode {
    /// Every parse starts from defaults.
    #[default]
    Fresh,

    /// Every parse starts from the previous record, so missing elements keep
    /// their old values (legacy partial-update semantics).
    Retain,
}

/// Host options for the LeftClick provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderOptions {
    /// LeftClick XML file. Falls back to [`DEFAULT_CONFIG_FILE`].
    pub config_file: Option<PathBuf>,

    /// Reload semantics.
    pub reload_mode: ReloadMode,

    /// Subscribe to file changes.
    pub watch: bool,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            config_file: None,
            reload_mode: ReloadMode::Fresh,
            watch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let opts: ProviderOptions = toml::from_str("").unwrap();
        assert!(opts.config_file.is_none());
        assert_eq!(opts.reload_mode, ReloadMode::Fresh);
        assert!(opts.watch);
    }

    #[test]
    fn test_options_full() {
        let opts: ProviderOptions = toml::from_str(
            r#"
            config_file = "/tmp/lc.xml"
            reload_mode = "retain"
            watch = false
            "#,
        )
        .unwrap();
        assert_eq!(opts.config_file, Some(PathBuf::from("/tmp/lc.xml")));
        assert_eq!(opts.reload_mode, ReloadMode::Retain);
        assert!(!opts.watch);
    }

    #[test]
    fn test_unavailable_record() {
        let record = ConfigRecord::unavailable();
        assert!(!record.available);
        assert!(!record.enabled);
        assert!(record.server.is_none());
        assert!(record.blacklist.is_empty());
    }
}
