// crates/proofkit-core/src/logging.rs
// ============================================================================
// Module: ProofKit Logging
// Description: Leveled, structured log records routed to pluggable sinks.
// Purpose: Emit JSON-line logs without a logging framework dependency.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Logger`] gates each record twice: once against the logger level and
//! once against the threshold of every attached [`LogSink`]. Sinks serialize
//! records as one JSON object per line and never fail the caller.
//!
//! The process logger is installed once through [`install_logger`]; later
//! installs return the existing logger so sinks are never attached twice.
//! Security posture: log messages must not carry secrets such as API keys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default logger name.
pub const DEFAULT_LOGGER_NAME: &str = "proofkit";

// ============================================================================
// SECTION: Levels
// ============================================================================

/// Log severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Routine progress.
    #[default]
    Info,
    /// Recoverable problems.
    Warning,
    /// Failed operations.
    Error,
    /// Failures that stop the run.
    Critical,
}

impl LogLevel {
    /// Returns the canonical uppercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a log level name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level: {0} (expected DEBUG, INFO, WARNING, ERROR, or CRITICAL)")]
pub struct LogLevelParseError(pub String);

impl FromStr for LogLevel {
    type Err = LogLevelParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let level = [Self::Debug, Self::Info, Self::Warning, Self::Error, Self::Critical]
            .into_iter()
            .find(|level| trimmed.eq_ignore_ascii_case(level.as_str()));
        match level {
            Some(level) => Ok(level),
            None if trimmed.eq_ignore_ascii_case("WARN") => Ok(Self::Warning),
            None => Err(LogLevelParseError(raw.to_string())),
        }
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// A single structured log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Record timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Name of the emitting logger.
    pub logger: String,
    /// Record severity.
    pub level: LogLevel,
    /// Human-readable message.
    pub message: String,
}

impl LogRecord {
    /// Builds a record stamped with the current time.
    #[must_use]
    pub fn new(logger: &str, level: LogLevel, message: &str) -> Self {
        Self {
            timestamp_ms: now_ms(),
            logger: logger.to_string(),
            level,
            message: message.to_string(),
        }
    }
}

/// Returns the current wall-clock time in milliseconds.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Destination for log records.
pub trait LogSink: Send + Sync {
    /// Record a log entry. Write failures are swallowed.
    fn record(&self, record: &LogRecord);
}

/// Sink that writes JSON lines to stderr.
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn record(&self, record: &LogRecord) {
        if let Ok(payload) = serde_json::to_string(record) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileLogSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileLogSink {
    /// Opens the log file in append mode, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or the file cannot be created.
    pub fn new(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LogSink for FileLogSink {
    fn record(&self, record: &LogRecord) {
        if let Ok(payload) = serde_json::to_string(record)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op log sink.
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn record(&self, _record: &LogRecord) {}
}

// ============================================================================
// SECTION: Logger
// ============================================================================

/// Logger setup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// The log file could not be opened.
    #[error("log io error: {0}")]
    Io(String),
}

/// Logger construction parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Logger name stamped on every record.
    pub name: String,
    /// Minimum level accepted by the logger.
    pub level: LogLevel,
    /// Minimum level written to stderr.
    pub console_level: LogLevel,
    /// Optional file receiving every accepted record.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOGGER_NAME.to_string(),
            level: LogLevel::Info,
            console_level: LogLevel::Info,
            log_file: None,
        }
    }
}

/// Sink paired with its minimum level.
struct SinkEntry {
    /// Minimum level forwarded to the sink.
    threshold: LogLevel,
    /// Destination sink.
    sink: Arc<dyn LogSink>,
}

/// Leveled logger fanning records out to sinks.
pub struct Logger {
    /// Logger name stamped on every record.
    name: String,
    /// Minimum level accepted by the logger.
    level: LogLevel,
    /// Attached sinks.
    sinks: Vec<SinkEntry>,
}

impl Logger {
    /// Creates a logger with no sinks attached.
    #[must_use]
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
            sinks: Vec::new(),
        }
    }

    /// Builds a logger with a stderr sink and, when configured, a file sink.
    ///
    /// The file sink receives everything the logger accepts; stderr only
    /// receives records at or above `console_level`.
    ///
    /// # Errors
    ///
    /// Returns [`LogError`] when the log file cannot be opened.
    pub fn setup(config: &LoggerConfig) -> Result<Self, LogError> {
        let mut logger = Self::new(config.name.clone(), config.level)
            .with_sink(config.console_level, Arc::new(StderrLogSink));
        if let Some(path) = &config.log_file {
            let sink = FileLogSink::new(path)
                .map_err(|err| LogError::Io(format!("{}: {err}", path.display())))?;
            logger = logger.with_sink(LogLevel::Debug, Arc::new(sink));
        }
        Ok(logger)
    }

    /// Attaches a sink receiving records at or above `threshold`.
    #[must_use]
    pub fn with_sink(mut self, threshold: LogLevel, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(SinkEntry {
            threshold,
            sink,
        });
        self
    }

    /// Returns the logger name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the minimum accepted level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Returns the number of attached sinks.
    #[must_use]
    pub const fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Returns true when records at `level` pass the logger gate.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    /// Emits a record at `level`.
    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let mut targets = self.sinks.iter().filter(|entry| level >= entry.threshold).peekable();
        if targets.peek().is_none() {
            return;
        }
        let record = LogRecord::new(&self.name, level, message);
        for entry in targets {
            entry.sink.record(&record);
        }
    }

    /// Emits a debug record.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Emits an info record.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Emits a warning record.
    pub fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    /// Emits an error record.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Emits a critical record.
    pub fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

// ============================================================================
// SECTION: Process Logger
// ============================================================================

/// Process-wide logger slot.
static PROCESS_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process logger. The first install wins; later calls drop
/// their argument and return the installed logger.
pub fn install_logger(logger: Logger) -> &'static Logger {
    PROCESS_LOGGER.get_or_init(|| logger)
}

/// Returns the process logger, installing the default on first use.
pub fn logger() -> &'static Logger {
    PROCESS_LOGGER.get_or_init(|| {
        Logger::new(DEFAULT_LOGGER_NAME, LogLevel::Info)
            .with_sink(LogLevel::Info, Arc::new(StderrLogSink))
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::LogLevel;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!(" INFO ".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("Warning".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!("CRITICAL".parse::<LogLevel>(), Ok(LogLevel::Critical));
        assert!("verbose".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
        assert!(LogLevel::Error < LogLevel::Critical);
    }
}
