//! Logging interface handed to each extraction component.
//!
//! Components receive a `&dyn Reporter` instead of writing to a global
//! logger. `LogReporter` forwards to the `log` facade for the CLI,
//! `MemoryReporter` keeps events in memory for tests.

use log::Level;
use std::cell::RefCell;
use std::fmt;

pub trait Reporter {
    fn log(&self, level: Level, args: fmt::Arguments<'_>);

    fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }
}

/// Forwards events to the `log` crate under a fixed target.
#[derive(Debug, Clone)]
pub struct LogReporter {
    target: &'static str,
}

impl LogReporter {
    pub fn new() -> Self {
        Self {
            target: "edinet_figures",
        }
    }

    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for LogReporter {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        log::log!(target: self.target, level, "{}", args);
    }
}

/// Records events so tests can assert on them.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: RefCell<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.borrow().clone()
    }

    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// True if any event at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.events
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.events.borrow_mut().push((level, args.to_string()));
    }
}
