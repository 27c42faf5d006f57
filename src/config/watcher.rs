//! Configuration file watcher for hot reload.
//!
//! # Responsibilities
//! - Own the active [`ConfigRecord`] and publish it to readers
//! - (Re)load the LeftClick file on demand and on every change
//! - Keep a file-change subscription alive on the resolved path
//!
//! # Design Decisions
//! - The watcher is the only writer; readers get `Arc` snapshots via [`ConfigHandle`]
//! - The parent directory is watched so a file created after startup is noticed;
//!   while it is missing, the nearest existing ancestor is watched instead
//! - A subscription whose directory was removed is replaced on the next reload
//! - notify runs its callback on its own thread; events are forwarded over a
//!   channel and handled in the watcher's task
//! - Load failures are expected outcomes and never propagate to callers

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use arc_swap::ArcSwap;
use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{broadcast, mpsc, watch};

use crate::config::loader::{load_record, LoadError};
use crate::config::schema::{ConfigRecord, ReloadMode, DEFAULT_CONFIG_FILE};
use crate::observability::metrics;

/// Outcome of the most recent load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been attempted yet.
    Unloaded,
    /// The file was read and parsed.
    Available,
    /// The file was missing, unreadable, or malformed.
    Unavailable,
}

/// Cheap, cloneable read access to the active record.
#[derive(Debug, Clone)]
pub struct ConfigHandle {
    record: Arc<ArcSwap<ConfigRecord>>,
}

impl ConfigHandle {
    /// Snapshot of the current record.
    pub fn load(&self) -> Arc<ConfigRecord> {
        self.record.load_full()
    }
}

/// A reason to reload, delivered into the watcher's task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The filesystem reported a change to this path.
    FileChanged(PathBuf),
    /// The host asked for a reload.
    Requested,
}

/// Sends reload requests to a watcher, including one that has been moved
/// into [`ConfigWatcher::run`].
#[derive(Debug, Clone)]
pub struct ReloadTrigger {
    tx: mpsc::UnboundedSender<ChangeEvent>,
}

impl ReloadTrigger {
    /// Queue a reload. Returns false once the watcher is gone.
    pub fn trigger(&self) -> bool {
        self.tx.send(ChangeEvent::Requested).is_ok()
    }
}

/// Owns the LeftClick file path, its change subscription and the active record.
pub struct ConfigWatcher {
    path: Option<PathBuf>,
    mode: ReloadMode,
    watch: bool,
    state: LoadState,
    record: Arc<ArcSwap<ConfigRecord>>,
    /// Last successfully parsed record, the base for [`ReloadMode::Retain`].
    retained: ConfigRecord,
    monitor: Option<Monitor>,
    changes_tx: mpsc::UnboundedSender<ChangeEvent>,
    changes_rx: mpsc::UnboundedReceiver<ChangeEvent>,
    updates: watch::Sender<LoadState>,
}

impl ConfigWatcher {
    /// Create an unloaded watcher.
    pub fn new(mode: ReloadMode) -> Self {
        let (changes_tx, changes_rx) = mpsc::unbounded_channel();
        let (updates, _) = watch::channel(LoadState::Unloaded);

        Self {
            path: None,
            mode,
            watch: true,
            state: LoadState::Unloaded,
            record: Arc::new(ArcSwap::from_pointee(ConfigRecord::unavailable())),
            retained: ConfigRecord::default(),
            monitor: None,
            changes_tx,
            changes_rx,
            updates,
        }
    }

    /// Enable or disable the file-change subscription. Enabled by default.
    pub fn with_watch(mut self, watch: bool) -> Self {
        self.watch = watch;
        self
    }

    /// Read access for decision queries.
    pub fn handle(&self) -> ConfigHandle {
        ConfigHandle {
            record: self.record.clone(),
        }
    }

    /// Handle for requesting reloads from other tasks.
    pub fn reload_trigger(&self) -> ReloadTrigger {
        ReloadTrigger {
            tx: self.changes_tx.clone(),
        }
    }

    /// Receiver notified after every load attempt, successful or not.
    pub fn updates(&self) -> watch::Receiver<LoadState> {
        self.updates.subscribe()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// The resolved file path, once [`set_config_file`](Self::set_config_file) has run.
    pub fn config_file(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether a file-change subscription is currently held.
    pub fn is_watching(&self) -> bool {
        self.monitor.is_some()
    }

    /// Point the watcher at `path` (or the default location) and load it.
    ///
    /// Never fails: a missing or malformed file leaves the provider unavailable.
    /// The change subscription is re-established afterwards whatever the outcome.
    pub fn set_config_file(&mut self, path: Option<&Path>) -> LoadState {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        self.state = match load_record(&path, self.mode, &self.retained) {
            Ok(record) => {
                tracing::info!(
                    path = %path.display(),
                    enabled = record.enabled,
                    server = record.server.as_deref().unwrap_or(""),
                    "LeftClick configuration loaded"
                );
                metrics::record_load("available");
                self.retained = record.clone();
                self.record.store(Arc::new(record));
                LoadState::Available
            }
            Err(e) => {
                match &e {
                    LoadError::FileUnavailable { .. } => metrics::record_load("file_unavailable"),
                    LoadError::Parse(_) => metrics::record_load("parse_error"),
                }
                tracing::debug!(path = %path.display(), error = %e, "LeftClick configuration unavailable");
                self.record.store(Arc::new(ConfigRecord::unavailable()));
                LoadState::Unavailable
            }
        };

        self.path = Some(path);
        if self.watch {
            self.subscribe();
        }
        self.updates.send_replace(self.state);
        self.state
    }

    /// Reload the current file, as if it had changed on disk.
    pub fn reload(&mut self) -> LoadState {
        let path = self.path.clone();
        self.set_config_file(path.as_deref())
    }

    /// Queue a change notification for the current file, exactly as the
    /// filesystem subscription would.
    pub fn notify_changed(&self) {
        if let Some(path) = &self.path {
            let _ = self.changes_tx.send(ChangeEvent::FileChanged(path.clone()));
        }
    }

    /// Handle every queued change notification without waiting.
    ///
    /// Queued notifications are coalesced into a single reload. Returns how many
    /// notifications were consumed.
    pub fn process_pending(&mut self) -> usize {
        let mut count = 0;
        while self.changes_rx.try_recv().is_ok() {
            count += 1;
        }
        if count > 0 {
            self.on_file_changed(count);
        }
        count
    }

    /// Handle change notifications until `shutdown` fires.
    ///
    /// The subscription is released when this returns.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        loop {
            tokio::select! {
                changed = self.changes_rx.recv() => {
                    // The sender lives in `self`, so the channel cannot close here.
                    if changed.is_none() {
                        break;
                    }
                    let mut count = 1;
                    while self.changes_rx.try_recv().is_ok() {
                        count += 1;
                    }
                    self.on_file_changed(count);
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Config watcher shutting down");
                    break;
                }
            }
        }
        self.monitor = None;
    }

    fn on_file_changed(&mut self, events: usize) {
        tracing::debug!(events, "Reloading configuration");
        self.reload();
    }

    fn subscribe(&mut self) {
        let Some(path) = self.path.clone() else {
            return;
        };

        let file = match absolute(&path) {
            Ok(file) => file,
            Err(e) => {
                self.monitor = None;
                metrics::record_watch_failure();
                tracing::warn!(path = %path.display(), error = %e, "Could not add a file monitor");
                return;
            }
        };
        let dir = watch_target(&file);

        // A live subscription for the same file and directory stays; recreating
        // it would drop events that arrive in between.
        if let Some(monitor) = &self.monitor {
            if monitor.file == file && monitor.dir == dir && !monitor.lost.load(Ordering::Acquire) {
                return;
            }
        }

        // Dropping the old watcher releases its inotify/kqueue handle.
        let replacing = self.monitor.take().is_some();

        match Monitor::start(file, dir, self.changes_tx.clone()) {
            Ok(monitor) => {
                tracing::debug!(
                    path = %path.display(),
                    dir = %monitor.dir.display(),
                    "Config watcher started"
                );
                self.monitor = Some(monitor);
                // The file may have appeared while nothing was watching.
                if replacing {
                    let _ = self.changes_tx.send(ChangeEvent::FileChanged(path));
                }
            }
            Err(e) => {
                metrics::record_watch_failure();
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Could not add a file monitor"
                );
            }
        }
    }
}

/// A notify subscription on the directory that will see changes to `file`.
struct Monitor {
    _watcher: RecommendedWatcher,
    file: PathBuf,
    dir: PathBuf,
    /// Set once the watched directory itself is removed or renamed.
    lost: Arc<AtomicBool>,
}

impl Monitor {
    fn start(
        file: PathBuf,
        dir: PathBuf,
        tx: mpsc::UnboundedSender<ChangeEvent>,
    ) -> Result<Self, notify::Error> {
        let lost = Arc::new(AtomicBool::new(false));
        let handler_file = file.clone();
        let handler_dir = dir.clone();
        let handler_lost = lost.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_watch_lost(&event, &handler_dir) {
                        handler_lost.store(true, Ordering::Release);
                    }
                    if is_relevant(&event, &handler_file) {
                        tracing::debug!(kind = ?event.kind, "Config file change detected");
                        let _ = tx.send(ChangeEvent::FileChanged(handler_file.clone()));
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(Self {
            _watcher: watcher,
            file,
            dir,
            lost,
        })
    }
}

fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Nearest existing directory above `file`.
fn watch_target(file: &Path) -> PathBuf {
    file.ancestors()
        .skip(1)
        .find(|dir| dir.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file.to_path_buf())
}

/// Events on the file itself, or on any directory on the way to it.
fn is_relevant(event: &Event, file: &Path) -> bool {
    // Reads are noise; a writer closing the file is the final word on its content.
    match event.kind {
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => {}
        EventKind::Access(_) => return false,
        _ => {}
    }
    event.paths.iter().any(|p| p == file || file.starts_with(p))
}

fn is_watch_lost(event: &Event, dir: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_))
    ) && event.paths.iter().any(|p| p == dir)
}
