//! Status reporting for teardown runs.
//!
//! The orchestrator announces progress and failures through a [`Reporter`].
//! [`LogReporter`] forwards to the `log` facade; [`RecordingReporter`]
//! keeps the lines in memory for tests.

use std::sync::{Arc, Mutex};

/// Severity of a reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Progress
    Info,
    /// Recoverable problem
    Warn,
    /// Failed operation
    Error,
}

/// Receives status lines. Return values are never consulted.
pub trait Reporter: Send + Sync {
    /// Report a status line.
    fn report(&self, level: Level, message: &str);

    /// Report progress.
    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    /// Report a recoverable problem.
    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    /// Report a failed operation.
    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Reporter that writes through the `log` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, level: Level, message: &str) {
        match level {
            Level::Info => log::info!("{message}"),
            Level::Warn => log::warn!("{message}"),
            Level::Error => log::error!("{message}"),
        }
    }
}

/// Reporter that keeps every line.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines, in order.
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Messages at a given level, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: Level, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}
