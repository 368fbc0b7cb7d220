#![forbid(unsafe_code)]

//! Panels: instances, shared registry, mount surface, and render contract.
//!
//! # Role in fpanel
//! `fpanel-widgets` builds interactive floating panels on top of
//! `fpanel-core`. Each [`Panel`] owns its geometry, gesture controller, and
//! transition; all panels on a page share one [`PanelContext`] holding the
//! [`PanelRegistry`] (strip order, backdrop demand) and the [`MountSurface`].
//!
//! # Usage
//! ```ignore
//! let ctx = PanelContext::with_defaults(host);
//! let mut panel = Panel::new(PanelProps::new("inspector").open(true), ctx, |id| {
//!     // host flips its own open flag, then calls panel.set_open(false, now)
//! })?;
//! panel.tick(now);
//! if let Some(view) = panel.view() {
//!     let part = view.hit_test(x, y);
//!     panel.handle_pointer(&event, part, now);
//! }
//! ```

pub mod context;
pub mod mount;
pub mod panel;
pub mod registry;

pub use context::PanelContext;
pub use mount::MountSurface;
pub use panel::{
    Panel, PanelError, PanelPart, PanelProps, PanelView, PointerOutcome, ResizeEdge,
};
pub use registry::{PanelId, PanelRegistry, PanelStatus, RegistryChange};
