//! Injected diagnostics.
//!
//! Components never log through a global; they hold a [`SharedSink`] handed to
//! them by the machine. The default sink forwards to the `log` facade so a
//! binary that calls `env_logger::init()` sees everything as before.

use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Destination for diagnostics emitted by the core.
pub trait LogSink: Send + Sync {
    /// Cheap pre-check so callers can skip formatting.
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }

    fn log(&self, level: LogLevel, target: &str, args: fmt::Arguments<'_>);
}

pub type SharedSink = Arc<dyn LogSink>;

/// Forwards to the `log` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn enabled(&self, level: LogLevel) -> bool {
        log::log_enabled!(log::Level::from(level))
    }

    fn log(&self, level: LogLevel, target: &str, args: fmt::Arguments<'_>) {
        log::log!(target: target, log::Level::from(level), "{}", args);
    }
}

/// Drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn log(&self, _level: LogLevel, _target: &str, _args: fmt::Arguments<'_>) {}
}

/// A recorded diagnostic line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub target: String,
    pub message: String,
}

/// Keeps every record in memory. Mostly useful for tests and harnesses that
/// want to assert on diagnostics.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(records) => records.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.records().iter().any(|r| r.message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: LogLevel, target: &str, args: fmt::Arguments<'_>) {
        let record = LogRecord {
            level,
            target: target.to_string(),
            message: args.to_string(),
        };
        match self.records.lock() {
            Ok(mut records) => records.push(record),
            Err(poisoned) => poisoned.into_inner().push(record),
        }
    }
}
