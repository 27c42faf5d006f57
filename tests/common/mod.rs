//! Shared utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::watch;
use url::Url;

use leftclick_proxy::config::LoadState;
use leftclick_proxy::ExclusionMatcher;

/// Path of a checked-in sample file under `tests/data`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(format!("sample-leftclick-config-{}.xml", name))
}

/// Exact, case-insensitive host matching, standing in for the host's matcher.
pub fn exact_host_matcher() -> Arc<dyn ExclusionMatcher> {
    Arc::new(|uri: &Url, patterns: &[String]| {
        uri.host_str()
            .is_some_and(|host| patterns.iter().any(|p| p.eq_ignore_ascii_case(host)))
    })
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[allow(dead_code)]
/// A scratch directory holding a LeftClick file that may or may not exist yet.
pub struct ScratchConfig {
    dir: TempDir,
    file: PathBuf,
}

#[allow(dead_code)]
impl ScratchConfig {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.xml");
        Self { dir, file }
    }

    /// The file lives in `LeftClick/` below the scratch root, created here.
    pub fn nested() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("LeftClick").join("config.xml");
        fs::create_dir(dir.path().join("LeftClick")).unwrap();
        Self { dir, file }
    }

    pub fn path(&self) -> PathBuf {
        self.file.clone()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Delete the directory holding the file, file included.
    pub fn remove_dir(&self) {
        fs::remove_dir_all(self.file.parent().unwrap()).unwrap();
    }

    pub fn create_dir(&self) {
        fs::create_dir_all(self.file.parent().unwrap()).unwrap();
    }

    /// Replace the file with one of the samples.
    pub fn install(&self, name: &str) {
        fs::copy(fixture(name), self.path()).unwrap();
    }

    pub fn write(&self, contents: &str) {
        fs::write(self.path(), contents).unwrap();
    }

    pub fn remove(&self) {
        fs::remove_file(self.path()).unwrap();
    }
}

/// Wait until the watcher publishes a load attempt matching `expected`.
#[allow(dead_code)]
pub async fn wait_for_state(updates: &mut watch::Receiver<LoadState>, expected: LoadState) {
    let result = tokio::time::timeout(Duration::from_secs(10), async {
        loop {
            if *updates.borrow_and_update() == expected {
                return;
            }
            if updates.changed().await.is_err() {
                panic!("watcher stopped before reaching {:?}", expected);
            }
        }
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for {:?}", expected);
}
