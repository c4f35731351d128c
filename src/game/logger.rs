//! Game logger with verbosity filtering and in-memory capture
//!
//! Lines are tagged with the acting duelist and a short category (`DRAW`, `SUMMON`, `BATTLE`,
//! `TRAP`, ...). Tagged lines are formatted in a bump arena that is reset after each line.
//! Captured entries are owned, so callers read them through a [`LogGuard`] without lifetimes
//! leaking into the engine types.

use crate::game::VerbosityLevel;
use bumpalo::Bump;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;
use std::rc::Rc;

/// Logger handle shared by the duelists, the turn controller and the match
pub type SharedLogger = Rc<GameLogger>;

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// Optional category (e.g., "SUMMON", "BATTLE", "controller_choice")
    pub category: Option<String>,
}

/// Guard type that provides read-only access to log entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> LogGuard<'a> {
    pub fn iter(&self) -> std::slice::Iter<'_, LogEntry> {
        self.guard.iter()
    }

    pub fn len(&self) -> usize {
        self.guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.is_empty()
    }

    /// Entries whose category matches `category`
    pub fn in_category<'b>(&'b self, category: &'b str) -> impl Iterator<Item = &'b LogEntry> + 'b {
        self.guard
            .iter()
            .filter(move |e| e.category.as_deref() == Some(category))
    }
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,

    /// Bump allocator for temporary line formatting, reset after every line
    format_bump: RefCell<Bump>,

    log_buffer: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Create a new logger with default verbosity (Normal)
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        GameLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            format_bump: RefCell::new(Bump::new()),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    /// Wrap the logger for sharing across the match
    pub fn shared(self) -> SharedLogger {
        Rc::new(self)
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only (suppresses stdout)
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn disable_capture(&mut self) {
        self.output_mode = OutputMode::Stdout;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    fn prints(&self) -> bool {
        matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both)
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Get access to captured log entries
    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&self) {
        self.log_buffer.borrow_mut().clear();
    }

    /// Print buffered entries the current verbosity allows, then clear the buffer
    pub fn flush_buffer(&self) {
        let entries = std::mem::take(&mut *self.log_buffer.borrow_mut());
        for entry in entries.iter().filter(|e| e.level <= self.verbosity) {
            self.write_stdout(entry);
        }
    }

    /// Would a message at `level` go anywhere?
    #[inline]
    pub fn wants(&self, level: VerbosityLevel) -> bool {
        level != VerbosityLevel::Silent && (self.is_capturing() || level <= self.verbosity)
    }

    fn write_stdout(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text if entry.level == VerbosityLevel::Minimal => {
                println!("{}", entry.message)
            }
            OutputFormat::Text => println!("  {}", entry.message),
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("log serialization failed: {e}"),
            },
        }
    }

    fn emit(&self, level: VerbosityLevel, message: &str, category: Option<&str>) {
        if !self.wants(level) {
            return;
        }
        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
        };
        if self.prints() && level <= self.verbosity {
            self.write_stdout(&entry);
        }
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    /// Silent messages are never printed or captured
    #[inline]
    pub fn silent(&self, _message: &str) {}

    #[inline]
    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, message, None);
    }

    #[inline]
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message, None);
    }

    #[inline]
    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message, None);
    }

    /// Rejected or ignored requests; shown from Minimal up
    pub fn warn(&self, message: &str) {
        self.tagged(VerbosityLevel::Minimal, "engine", "WARN", message);
    }

    /// Log `[actor] TAG: message` under category `tag`
    pub fn tagged(&self, level: VerbosityLevel, actor: &str, tag: &str, message: &str) {
        if !self.wants(level) {
            return;
        }
        {
            let bump = self.format_bump.borrow();
            let line = bumpalo::format!(in &*bump, "[{}] {}: {}", actor, tag, message);
            self.emit(level, line.as_str(), Some(tag));
        }
        self.format_bump.borrow_mut().reset();
    }

    /// Log a decision-policy choice at Normal level
    pub fn controller_choice(&self, controller_name: &str, message: &str) {
        if !self.wants(VerbosityLevel::Normal) {
            return;
        }
        {
            let bump = self.format_bump.borrow();
            let line = bumpalo::format!(in &*bump, "[{}] AI: {}", controller_name, message);
            self.emit(VerbosityLevel::Normal, line.as_str(), Some("controller_choice"));
        }
        self.format_bump.borrow_mut().reset();
    }
}

impl Default for GameLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("output_mode", &self.output_mode)
            .field("log_count", &self.log_buffer.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = GameLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert_eq!(GameLogger::with_verbosity(VerbosityLevel::Silent).verbosity(), VerbosityLevel::Silent);
    }

    #[test]
    fn test_log_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.normal("test message");
        logger.minimal("minimal message");
        logger.silent("never seen");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "test message");
        assert_eq!(logs[1].message, "minimal message");
    }

    #[test]
    fn test_tagged_lines() {
        let mut logger = GameLogger::new();
        logger.enable_capture();

        logger.tagged(VerbosityLevel::Normal, "Player 1", "SUMMON", "Ember Wolf -> slot 0");
        logger.controller_choice("Hard", "skip attack");

        let logs = logger.logs();
        assert_eq!(logs[0].message, "[Player 1] SUMMON: Ember Wolf -> slot 0");
        assert_eq!(logs[0].category.as_deref(), Some("SUMMON"));
        assert_eq!(logs.in_category("controller_choice").count(), 1);
    }

    #[test]
    fn test_flush_buffer() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        logger.normal("message 1");
        logger.normal("message 2");
        assert_eq!(logger.logs().len(), 2);

        logger.flush_buffer();
        assert_eq!(logger.logs().len(), 0);
    }

    #[test]
    fn test_disable_capture() {
        let mut logger = GameLogger::new();
        logger.enable_capture();
        assert!(logger.is_capturing());
        logger.disable_capture();
        assert!(!logger.is_capturing());
    }
}
