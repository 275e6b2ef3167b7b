use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

// @module: Logger for terminal and CI runner output

/// How log lines are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// Timestamped, coloured lines on stderr
    Console,
    /// Workflow commands on stdout, so the runner turns warnings and errors
    /// into annotations
    Actions,
}

impl LogStyle {
    /// `Actions` when running on a GitHub Actions runner
    pub fn detect() -> Self {
        match std::env::var("GITHUB_ACTIONS") {
            Ok(value) if value == "true" => Self::Actions,
            _ => Self::Console,
        }
    }
}

/// Logger installed by the binary
pub struct StepLogger {
    level: LevelFilter,
    style: LogStyle,
}

impl StepLogger {
    pub fn new(level: LevelFilter, style: LogStyle) -> Self {
        StepLogger { level, style }
    }

    // @initializes: Global logger
    pub fn init(level: LevelFilter, style: LogStyle) -> Result<(), SetLoggerError> {
        let logger = Box::new(StepLogger::new(level, style));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

/// Render a single log line
pub fn format_line(style: LogStyle, level: Level, timestamp: &str, message: &str) -> String {
    match style {
        LogStyle::Console => format!(
            "{}{} {:<5} {}\x1B[0m",
            StepLogger::color_for_level(level),
            timestamp,
            level,
            message
        ),
        LogStyle::Actions => match level {
            Level::Error => format!("::error::{}", escape_workflow_data(message)),
            Level::Warn => format!("::warning::{}", escape_workflow_data(message)),
            Level::Info => message.to_string(),
            Level::Debug | Level::Trace => format!("::debug::{}", escape_workflow_data(message)),
        },
    }
}

/// Escape a workflow command payload so multi-line messages stay one command
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl Log for StepLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f").to_string();
        let line = format_line(self.style, record.level(), &now, &record.args().to_string());
        let _ = match self.style {
            LogStyle::Console => writeln!(std::io::stderr(), "{}", line),
            LogStyle::Actions => writeln!(std::io::stdout(), "{}", line),
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        let _ = std::io::stdout().flush();
    }
}
