//! Process-wide logger for sangocui.
//!
//! Entries go to a log file and to a bounded in-memory ring that the demo's
//! log panel reads back. Library crates log unconditionally; until [`init`]
//! runs, every call is a no-op, so tests and embedders that never set up a
//! log file pay nothing.

use chrono::Local;
use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

/// One recorded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local time, `HH:MM:SS`
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    /// `[HH:MM:SS] LEVEL: message`, as written to the file.
    pub fn to_line(&self) -> String {
        format!("[{}] {}: {}", self.timestamp, self.level, self.message)
    }
}

struct Sink {
    ring: VecDeque<LogEntry>,
    capacity: usize,
    min_level: LogLevel,
    /// None when the file could not be opened; the ring still works
    file: Option<File>,
}

impl Sink {
    fn open(path: PathBuf, capacity: usize, min_level: LogLevel) -> Self {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .ok();
        if let Some(f) = file.as_mut() {
            let _ = writeln!(f, "=== sangocui log start ===");
        }

        Self {
            ring: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            min_level,
            file,
        }
    }

    fn record(&mut self, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message,
        };
        if let Some(f) = self.file.as_mut() {
            let _ = writeln!(f, "{}", entry.to_line());
        }

        if self.ring.len() == self.capacity {
            self.ring.pop_front();
        }
        if self.capacity > 0 {
            self.ring.push_back(entry);
        }
    }
}

static SINK: OnceLock<Mutex<Sink>> = OnceLock::new();

fn with_sink<T>(f: impl FnOnce(&mut Sink) -> T) -> Option<T> {
    let mut sink = SINK.get()?.lock().ok()?;
    Some(f(&mut sink))
}

/// Set up the global logger. Only the first call has an effect.
///
/// The file at `file_path` is truncated; `max_entries` bounds the in-memory
/// ring; messages below `min_level` are discarded.
pub fn init(file_path: PathBuf, max_entries: usize, min_level: LogLevel) {
    SINK.get_or_init(|| Mutex::new(Sink::open(file_path, max_entries, min_level)));
}

pub fn is_initialized() -> bool {
    SINK.get().is_some()
}

pub fn set_min_level(level: LogLevel) {
    with_sink(|sink| sink.min_level = level);
}

/// Record a message at `level`.
pub fn log(level: LogLevel, message: impl Into<String>) {
    with_sink(|sink| sink.record(level, message.into()));
}

pub fn debug(message: impl Into<String>) {
    log(LogLevel::Debug, message);
}

pub fn info(message: impl Into<String>) {
    log(LogLevel::Info, message);
}

pub fn warn(message: impl Into<String>) {
    log(LogLevel::Warn, message);
}

pub fn error(message: impl Into<String>) {
    log(LogLevel::Error, message);
}

/// Entries held in memory, oldest first.
pub fn get_entries() -> Vec<LogEntry> {
    with_sink(|sink| sink.ring.iter().cloned().collect()).unwrap_or_default()
}
