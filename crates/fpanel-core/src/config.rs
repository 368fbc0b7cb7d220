#![forbid(unsafe_code)]

//! Panel configuration.
//!
//! [`PanelConfig`] gathers every tunable used by the panel engine. Defaults
//! match the built-in constants, so `PanelConfig::default()` behaves exactly
//! like an unconfigured engine. With the `config` feature the struct can be
//! loaded from TOML or JSON:
//!
//! ```toml
//! # fpanel.toml
//! default_width = 640.0
//! strip_unit_width = 180.0
//! moved_latch_grace_ms = 120
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::geometry::{DEFAULT_PANEL_WIDTH, MIN_PANEL_EXTENT, SizeBounds};
use crate::gesture::GestureConfig;
use crate::transition::TransitionTimings;

/// Width of one tab in the rolled-panel strip.
pub const DEFAULT_STRIP_UNIT_WIDTH: f64 = 200.0;
/// Height of a rolled panel and of strip tabs.
pub const DEFAULT_STRIP_HEIGHT: f64 = 30.0;
/// Thickness of the four resize edges.
pub const DEFAULT_EDGE_THICKNESS: f64 = 7.0;
/// Height of the panel header (drag handle row).
pub const DEFAULT_HEADER_HEIGHT: f64 = 30.0;
/// Width of each header button.
pub const DEFAULT_HEADER_BUTTON_WIDTH: f64 = 48.0;

/// Tunables for panels sharing one context.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PanelConfig {
    /// Width of a freshly opened panel.
    pub default_width: f64,
    /// Minimum width reachable by resizing.
    pub min_width: f64,
    /// Minimum numeric height reachable by resizing.
    pub min_height: f64,
    /// Strip tab width; rolled panel `i` sits at `i * strip_unit_width`.
    pub strip_unit_width: f64,
    /// Height of rolled panels and strip tabs.
    pub strip_height: f64,
    /// Resize edge thickness.
    pub edge_thickness: f64,
    /// Header row height.
    pub header_height: f64,
    /// Header button width.
    pub header_button_width: f64,
    /// Grace period after a gesture during which clicks are ignored.
    pub moved_latch_grace_ms: u64,
    /// Enter transition duration.
    pub enter_ms: u64,
    /// Exit transition duration.
    pub exit_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_PANEL_WIDTH,
            min_width: MIN_PANEL_EXTENT,
            min_height: MIN_PANEL_EXTENT,
            strip_unit_width: DEFAULT_STRIP_UNIT_WIDTH,
            strip_height: DEFAULT_STRIP_HEIGHT,
            edge_thickness: DEFAULT_EDGE_THICKNESS,
            header_height: DEFAULT_HEADER_HEIGHT,
            header_button_width: DEFAULT_HEADER_BUTTON_WIDTH,
            moved_latch_grace_ms: 100,
            enter_ms: 0,
            exit_ms: 200,
        }
    }
}

impl PanelConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field, collecting all violations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        let positive = [
            ("default_width", self.default_width),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
            ("strip_unit_width", self.strip_unit_width),
            ("strip_height", self.strip_height),
            ("edge_thickness", self.edge_thickness),
            ("header_height", self.header_height),
            ("header_button_width", self.header_button_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be a positive number (got {value})"));
            }
        }
        if self.default_width < self.min_width {
            errors.push(format!(
                "default_width ({}) must be >= min_width ({})",
                self.default_width, self.min_width
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[inline]
    pub fn size_bounds(&self) -> SizeBounds {
        SizeBounds::new(self.min_width, self.min_height)
    }

    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            bounds: self.size_bounds(),
            moved_latch_grace: self.moved_latch_grace(),
        }
    }

    #[inline]
    pub fn moved_latch_grace(&self) -> Duration {
        Duration::from_millis(self.moved_latch_grace_ms)
    }

    pub fn transition_timings(&self) -> TransitionTimings {
        TransitionTimings {
            enter: Duration::from_millis(self.enter_ms),
            exit: Duration::from_millis(self.exit_ms),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
