#![forbid(unsafe_code)]

//! Core: geometry, pointer gestures, transitions, and host contracts.
//!
//! # Role in fpanel
//! `fpanel-core` is the leaf layer of the floating-panel engine. It owns the
//! pure geometry model, the per-panel gesture state machine, the transition
//! phase table, and the [`host::Host`] contract through which every page-level
//! side effect flows.
//!
//! # Primary responsibilities
//! - **Geometry**: position, size (with `Auto` height), clamped commits.
//! - **GestureController**: move and four-edge resize with a live overlay.
//! - **TransitionPhase**: enter/exit phases and their style multipliers.
//! - **DeferredQueue**: generation-guarded one-shot tasks.
//! - **PanelConfig**: tunables with optional TOML/JSON loading.
//!
//! # How it fits in the system
//! `fpanel-widgets` composes these pieces into panel instances that share a
//! registry; `fpanel` re-exports both as the public facade.

pub mod config;
pub mod deferred;
pub mod event;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod logging;
pub mod transition;

pub use config::{ConfigError, PanelConfig};
pub use geometry::{Delta, Geometry, GeometryPatch, Height, PanelSize, Point, Rect, Size, SizeBounds};
pub use gesture::{GestureCommit, GestureConfig, GestureController, GestureMode};
pub use host::{Host, ListenerId, MountNode};
pub use transition::{PhaseStyle, TimedTransition, TransitionPhase, TransitionSource};
