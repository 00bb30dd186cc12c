//! Input file watching for `--watch`.
//!
//! Uses notify for cross-platform file system events. The parent directory is
//! watched rather than the file itself so editors that save by rename are
//! still seen.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Interval between polls in the watch loop.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Quiet period after the last event before a re-render.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches one input file and reports debounced changes.
pub struct InputWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    watch_root: PathBuf,
    target_path: PathBuf,
    target_name: Option<OsString>,
    debounce: Duration,
    pending_since: Option<Instant>,
}

impl InputWatcher {
    /// Create a watcher for `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths arrive canonical and absolute.
        let target_path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let target_name = target_path.file_name().map(std::ffi::OsStr::to_os_string);
        let watch_root = watch_root_for(&target_path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;
        tracing::debug!(
            file = %target_path.display(),
            root = %watch_root.display(),
            "watching input"
        );

        Ok(Self {
            _watcher: watcher,
            rx,
            watch_root,
            target_path,
            target_name,
            debounce,
            pending_since: None,
        })
    }

    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Drain pending events; true once a change has settled for the debounce period.
    pub fn take_change_ready(&mut self) -> bool {
        let mut relevant = 0u32;
        let mut total = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            total += 1;
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(ev) => {
                    crate::perf::record("watcher.irrelevant", format!("kind={:?}", ev.kind));
                }
                Err(err) => {
                    tracing::warn!("file watcher error: {err}");
                    crate::perf::record("watcher.error", format!("{err}"));
                }
            }
        }

        if total > 0 {
            crate::perf::record(
                "watcher.poll",
                format!("total={total} relevant={relevant} target={}", self.target_path.display()),
            );
        }
        if relevant > 0 {
            self.pending_since = Some(Instant::now());
        }

        match self.pending_since {
            Some(since) if since.elapsed() >= self.debounce => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|path| {
            path == &self.watch_root
                || path == &self.target_path
                || self
                    .target_name
                    .as_ref()
                    .is_some_and(|name| path.file_name().is_some_and(|f| f == name))
        })
    }
}

fn watch_root_for(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
