//! Stage timings and the render event log used by the command-line tool.
//!
//! Rendering itself stays pure; only `main` and the watcher report here.
//! Timings go to stderr when `--perf` is on. Events go to the file given by
//! `--render-debug-log`, one line each, stamped with the time since the log
//! was opened.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

static STATE: LazyLock<Mutex<PerfState>> = LazyLock::new(|| {
    Mutex::new(PerfState {
        print_timings: false,
        opened: Instant::now(),
        event_log: None,
    })
});

struct PerfState {
    print_timings: bool,
    opened: Instant,
    event_log: Option<BufWriter<File>>,
}

impl PerfState {
    fn record(&mut self, name: &str, detail: &str) {
        let since_open = self.opened.elapsed().as_secs_f64() * 1000.0;
        if let Some(log) = self.event_log.as_mut() {
            let _ = writeln!(log, "[{since_open:>10.3} ms] {name}: {detail}");
            let _ = log.flush();
        }
    }
}

fn state() -> MutexGuard<'static, PerfState> {
    STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A pipeline stage being timed. Reports when dropped.
#[derive(Debug)]
#[must_use = "the stage is timed until this guard is dropped"]
pub struct Stage {
    name: &'static str,
    start: Instant,
}

impl Drop for Stage {
    fn drop(&mut self) {
        let ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let mut state = state();
        state.record(self.name, &format!("{ms:.3} ms"));
        if state.print_timings {
            eprintln!("[perf] {}: {ms:.2} ms", self.name);
        }
    }
}

pub fn stage(name: &'static str) -> Stage {
    Stage {
        name,
        start: Instant::now(),
    }
}

pub fn set_print_timings(on: bool) {
    state().print_timings = on;
}

pub fn prints_timings() -> bool {
    state().print_timings
}

/// Start writing events to `path`, or stop with `None`.
///
/// # Errors
/// Returns an error if the log file cannot be created or written.
pub fn open_event_log(path: Option<&Path>) -> io::Result<()> {
    let mut state = state();
    state.event_log = None;
    if let Some(path) = path {
        let mut log = BufWriter::new(File::create(path)?);
        writeln!(log, "panelmark render debug log start")?;
        log.flush()?;
        state.opened = Instant::now();
        state.event_log = Some(log);
    }
    Ok(())
}

/// Append one event to the log, if one is open.
pub fn record(name: &str, detail: impl AsRef<str>) {
    tracing::trace!(event = name, detail = detail.as_ref());
    state().record(name, detail.as_ref());
}
