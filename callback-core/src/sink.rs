//! Output sink collaborator
//!
//! Callbacks that produce output write lines to an injected [`OutputSink`].
//! The core never owns a sink; it only requires that one accepts a line of
//! text.

use crate::config::{SinkConfig, SinkKind};
use crate::types::Timestamp;
use chrono::Utc;
use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Accepts lines of text produced by callbacks
pub trait OutputSink: fmt::Debug {
    fn write_line(&self, line: &str);
}

impl<S: OutputSink + ?Sized> OutputSink for &S {
    fn write_line(&self, line: &str) {
        (**self).write_line(line)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Rc<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn write_line(&self, line: &str) {
        (**self).write_line(line)
    }
}

/// Writes lines to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink {
    timestamps: bool,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: prefix every line with the current UTC time
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}

impl OutputSink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut stdout = io::stdout().lock();
        let result = if self.timestamps {
            let now: Timestamp = Utc::now();
            writeln!(stdout, "[{}] {}", now.format("%H:%M:%S%.3f"), line)
        } else {
            writeln!(stdout, "{}", line)
        };

        // The sink contract has no return value; a closed stdout is only logged
        if let Err(e) = result {
            log::error!("Failed to write to stdout: {}", e);
        }
    }
}

/// Forwards lines to the `log` facade at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl OutputSink for LogSink {
    fn write_line(&self, line: &str) {
        log::info!(target: "callback_core::sink", "{}", line);
    }
}

/// Records lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.lines.borrow_mut().clear();
    }
}

impl OutputSink for MemorySink {
    fn write_line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Build the sink described by `config`
pub fn from_config(config: &SinkConfig) -> Rc<dyn OutputSink> {
    log::debug!("Creating {:?} sink (timestamps: {})", config.kind, config.timestamps);
    match config.kind {
        SinkKind::Stdout => Rc::new(StdoutSink::new().with_timestamps(config.timestamps)),
        SinkKind::Log => Rc::new(LogSink),
        SinkKind::Memory => Rc::new(MemorySink::new()),
    }
}
