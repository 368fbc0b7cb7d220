#![forbid(unsafe_code)]

//! fpanel public facade crate.
//!
//! Floating, draggable, resizable, collapsible panels for a host page. This
//! crate re-exports the stable surface of `fpanel-core` and `fpanel-widgets`
//! and offers a prelude for day-to-day usage.
//!
//! # Example
//! ```ignore
//! use fpanel::prelude::*;
//!
//! let ctx = PanelContext::with_defaults(host);
//! let mut panel = Panel::new(PanelProps::new("inspector").open(true), ctx, |id| {
//!     app.close_requested(id);
//! })?;
//! panel.tick(Instant::now());
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use fpanel_core::config::{ConfigError, PanelConfig};
pub use fpanel_core::event::{PointerButton, PointerEvent, PointerEventKind};
pub use fpanel_core::geometry::{
    Delta, Geometry, GeometryPatch, Height, PanelSize, Point, Rect, Size, SizeBounds,
};
pub use fpanel_core::gesture::{GestureCommit, GestureConfig, GestureController, GestureMode};
pub use fpanel_core::host::{Host, ListenerId, MountNode};
pub use fpanel_core::logging::LoggingError;
#[cfg(feature = "tracing-json")]
pub use fpanel_core::logging::init_json_logging;
pub use fpanel_core::transition::{
    PhaseStyle, TimedTransition, TransitionPhase, TransitionSource, TransitionTimings,
};

// --- Widget re-exports -----------------------------------------------------

pub use fpanel_widgets::panel::{
    BackdropView, EdgeView, HeaderView, StripTabView, SurfaceView,
};
pub use fpanel_widgets::{
    MountSurface, Panel, PanelContext, PanelError, PanelId, PanelPart, PanelProps, PanelRegistry,
    PanelStatus, PanelView, PointerOutcome, RegistryChange, ResizeEdge,
};

/// Build a shared context from a TOML configuration file.
#[cfg(feature = "config")]
pub fn context_from_toml_file(
    host: std::rc::Rc<dyn Host>,
    path: impl AsRef<std::path::Path>,
) -> Result<std::rc::Rc<PanelContext>> {
    let config = PanelConfig::from_toml_file(path)?;
    Ok(PanelContext::new(host, config)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, Geometry, Height, Host, Panel, PanelConfig, PanelContext, PanelId, PanelPart,
        PanelProps, PanelView, Point, PointerEvent, PointerOutcome, Result, Size,
    };

    pub use crate::{core, widgets};

    pub use web_time::{Duration, Instant};
}

pub use fpanel_core as core;
pub use fpanel_widgets as widgets;
