#![forbid(unsafe_code)]

//! Unified error type for fpanel hosts.
//!
//! Each subsystem keeps its own typed error; [`Error`] wraps them so a host
//! can use `?` across configuration, panel construction, and logging setup.

use std::fmt;

use fpanel_core::config::ConfigError;
use fpanel_core::logging::LoggingError;
use fpanel_widgets::PanelError;

/// Top-level error type for fpanel hosts.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be read, parsed, or validated.
    Config(ConfigError),
    /// A panel could not be constructed.
    Panel(PanelError),
    /// Logging could not be installed.
    Logging(LoggingError),
}

/// Standard result type for fpanel APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Error type label for metrics and tracing.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Panel(_) => "panel",
            Self::Logging(_) => "logging",
        }
    }

    /// Whether the host can carry on (with defaults, or without logs).
    ///
    /// Bad configuration falls back to [`PanelConfig::default`], and a
    /// missing log sink only loses diagnostics. An invalid panel id is a
    /// caller bug.
    ///
    /// [`PanelConfig::default`]: fpanel_core::config::PanelConfig
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Config(_) | Self::Logging(_) => true,
            Self::Panel(PanelError::EmptyId) => false,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Panel(err) => write!(f, "panel: {err}"),
            Self::Logging(err) => write!(f, "logging: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Panel(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<PanelError> for Error {
    fn from(err: PanelError) -> Self {
        Self::Panel(err)
    }
}

impl From<LoggingError> for Error {
    fn from(err: LoggingError) -> Self {
        Self::Logging(err)
    }
}
