//! Stop signal for the config watcher.
//!
//! [`ConfigWatcher::run`](crate::config::ConfigWatcher::run) owns the file
//! subscription until its receiver fires; the `watch` command fires it once
//! SIGINT or SIGTERM arrives.

use tokio::sync::broadcast;

/// One-shot stop signal shared by the watcher task and the CLI loop.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to hand to [`ConfigWatcher::run`](crate::config::ConfigWatcher::run).
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Ask every subscribed task to stop. A no-op when nothing is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
