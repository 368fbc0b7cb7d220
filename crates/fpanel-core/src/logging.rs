#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Engine code emits `tracing` events (behind the `tracing` feature) with
//! dotted names such as `panel.gesture.begin` or `panel.close.suppressed`.
//! Hosts that want them on stderr as JSON lines can call
//! [`init_json_logging`] once at startup (feature `tracing-json`). The filter
//! comes from `RUST_LOG`, falling back to the given default directive.

// Re-export tracing macros for crates building on the engine.
#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};

/// Failure to install a global subscriber.
#[derive(Debug)]
pub enum LoggingError {
    /// The filter directive could not be parsed.
    InvalidFilter(String),
    /// A global subscriber is already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInitialized => write!(f, "global tracing subscriber already set"),
        }
    }
}

impl std::error::Error for LoggingError {}

/// Install a JSON `tracing-subscriber` on stderr.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(default_directive: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)
            .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
