//! Context construction configuration and the `GAMMS_LOG_LEVEL` logger
//! initializer.

use gsim_core::Value;
use indexmap::IndexMap;

/// Threshold levels accepted by `GAMMS_LOG_LEVEL`. Anything else — including
/// an absent or malformed value — silently defaults to `Info`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARNING" => Some(LogLevel::Warning),
            "ERROR" => Some(LogLevel::Error),
            "CRITICAL" => Some(LogLevel::Critical),
            _ => None,
        }
    }

    fn as_tracing_directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            // tracing has no "critical" level; collapse to its closest match.
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

/// Merged into the logger initializer at `Context` construction.
#[derive(Clone, Debug, Default)]
pub struct LoggerConfig {
    /// Takes priority over `GAMMS_LOG_LEVEL` when set.
    pub level_override: Option<String>,
    pub extra: IndexMap<String, Value>,
}

#[derive(Clone, Debug, Default)]
pub struct ContextConfig {
    pub logger_config: LoggerConfig,
}

impl ContextConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_logger_config(mut self, logger_config: LoggerConfig) -> Self {
        self.logger_config = logger_config;
        self
    }
}

/// Install a global `tracing` subscriber at the level named by
/// `logger_config.level_override`, falling back to `GAMMS_LOG_LEVEL`, falling
/// back to `Info`. Safe to call more than once per process — a subscriber can
/// only be installed once globally, so later calls are silently ignored.
pub fn init_logging(logger_config: &LoggerConfig) {
    let level = logger_config
        .level_override
        .as_deref()
        .and_then(LogLevel::parse)
        .or_else(|| std::env::var("GAMMS_LOG_LEVEL").ok().and_then(|v| LogLevel::parse(&v)))
        .unwrap_or_default();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(level.as_tracing_directive()))
        .try_init();
}
