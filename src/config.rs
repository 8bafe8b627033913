//! Configuration handling for datapeek

use std::path::PathBuf;

/// Directory scanned when none is given
pub const DEFAULT_INPUT_DIR: &str = "input_data";

/// Log verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// How to reach the external analytics session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Converter program; receives the file path as its last argument and
    /// writes the table as CSV to stdout
    pub program: String,
    /// Arguments placed before the file path
    pub args: Vec<String>,
}

impl SessionConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }
}

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory whose entries are loaded and displayed
    pub input_dir: PathBuf,
    /// Log verbosity (RUST_LOG takes precedence)
    pub log_level: LogLevel,
    /// Analytics session for statistical table formats
    pub session: Option<SessionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            log_level: LogLevel::default(),
            session: None,
        }
    }
}

impl Config {
    pub fn new(input_dir: PathBuf) -> Self {
        Self {
            input_dir,
            ..Default::default()
        }
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_session(mut self, session: SessionConfig) -> Self {
        self.session = Some(session);
        self
    }
}
