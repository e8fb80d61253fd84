//! Logging configuration for RingKV
//!
//! Structured logging on the `tracing` framework: env-filterable levels,
//! pretty or compact formatting, and optional daily-rotated file output
//! through a non-blocking appender.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output destination
#[derive(Debug, Clone)]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to a daily-rotated file
    File(PathBuf),
    /// Output to both stdout and a daily-rotated file
    Both(PathBuf),
}

/// Log format style
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    Compact,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level filter, overridable via `RUST_LOG`
    pub level: String,
    /// Output destination
    pub output: LogOutput,
    /// Format style
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            output: LogOutput::Stdout,
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    /// Config filtering at info level
    pub fn info() -> Self {
        Self::default()
    }

    /// Config filtering at debug level
    pub fn debug() -> Self {
        Self {
            level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Config filtering at warn level
    pub fn warn() -> Self {
        Self {
            level: "warn".to_string(),
            ..Default::default()
        }
    }

    /// Route output to a daily-rotated file
    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::File(path.into());
        self
    }

    /// Route output to both stdout and a daily-rotated file
    pub fn with_both<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output = LogOutput::Both(path.into());
        self
    }

    /// Set the format style
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the level filter
    pub fn with_level<S: Into<String>>(mut self, level: S) -> Self {
        self.level = level.into();
        self
    }

    /// Initialize global logging with this configuration.
    ///
    /// Returns a guard that must be kept alive while file output is in use;
    /// dropping it shuts down the appender's worker thread. Stdout-only
    /// configurations return `None`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use ringkv::logging::LogConfig;
    ///
    /// // Keep the guard alive for the lifetime of your application
    /// let _guard = LogConfig::info().init();
    /// ```
    pub fn init(self) -> Option<WorkerGuard> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .expect("Invalid log level");

        match self.output {
            LogOutput::Stdout => {
                match self.format {
                    LogFormat::Pretty => tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init(),
                    LogFormat::Compact => tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init(),
                }
                None
            }
            LogOutput::File(path) => {
                let (writer, guard) = tracing_appender::non_blocking(rolling_appender(&path));
                match self.format {
                    LogFormat::Pretty => tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().with_writer(writer).with_ansi(false).pretty())
                        .init(),
                    LogFormat::Compact => tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                        .init(),
                }
                Some(guard)
            }
            LogOutput::Both(path) => {
                let (writer, guard) = tracing_appender::non_blocking(rolling_appender(&path));
                // Compact on both sinks; mixing formats would need boxed layers
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .with(fmt::layer().with_writer(writer).with_ansi(false).compact())
                    .init();
                Some(guard)
            }
        }
    }
}

/// Daily rotation next to the requested path, keeping its file name.
fn rolling_appender(path: &Path) -> RollingFileAppender {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("ringkv.log");
    tracing_appender::rolling::daily(dir, name)
}
