#![forbid(unsafe_code)]

//! Render contract for one panel.
//!
//! [`PanelView`] is a plain snapshot of everything a host renderer draws for
//! a panel in one frame: the surface, its four resize edges, the header row,
//! the backdrop, and the rolled-strip tab, plus the opacity/scale multipliers
//! for the current transition phase. Hosts route pointer input back with
//! [`PanelView::hit_test`].
//!
//! # Layout rules
//!
//! - Expanded: surface at the displayed geometry (committed + live overlay).
//! - Rolled: surface parked below the viewport (105 % of its height) at the
//!   panel's strip offset, `strip_unit_width × strip_height`; no edges, no
//!   backdrop.
//! - The strip tab is shown while the panel is open, rolled or not.

use fpanel_core::config::PanelConfig;
use fpanel_core::geometry::{Geometry, Rect, Size};
use fpanel_core::gesture::GestureMode;
use fpanel_core::transition::{PhaseStyle, TransitionPhase};

use crate::registry::PanelId;

/// Fraction of the viewport height where a rolled surface is parked.
const ROLLED_SURFACE_TOP: f64 = 1.05;

/// One of the four resize edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeEdge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Gesture started by pressing this edge.
    #[inline]
    pub const fn gesture_mode(self) -> GestureMode {
        match self {
            Self::Top => GestureMode::ResizeTop,
            Self::Bottom => GestureMode::ResizeBottom,
            Self::Left => GestureMode::ResizeLeft,
            Self::Right => GestureMode::ResizeRight,
        }
    }
}

/// Interactive part of a panel, as reported by hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelPart {
    Edge(ResizeEdge),
    DragHandle,
    BackdropToggle,
    RollButton,
    CloseButton,
    /// Panel body (content area); swallows clicks.
    Surface,
    StripTab,
    UnrollButton,
    Backdrop,
}

/// Panel surface placement. `height == None` means content-sized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceView {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: Option<f64>,
    pub rolled: bool,
}

impl SurfaceView {
    /// Rectangle for hit testing; content-sized surfaces use `fallback_height`.
    pub fn rect(&self, fallback_height: f64) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.width,
            self.height.unwrap_or(fallback_height),
        )
    }
}

/// A resize edge strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView {
    pub edge: ResizeEdge,
    pub rect: Rect,
}

/// Header row controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderView {
    pub backdrop_toggle: Rect,
    pub drag_handle: Rect,
    pub roll_button: Rect,
    pub close_button: Rect,
}

/// Dimming layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropView {
    pub rect: Rect,
    pub opacity: f64,
}

/// Tab in the rolled-panel strip.
#[derive(Debug, Clone, PartialEq)]
pub struct StripTabView {
    pub rect: Rect,
    pub rolled: bool,
    /// Present only while rolled.
    pub unroll_button: Option<Rect>,
}

/// Everything a host draws for one panel in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub id: PanelId,
    pub title: Option<String>,
    pub phase: TransitionPhase,
    pub style: PhaseStyle,
    pub surface: SurfaceView,
    /// Empty while rolled.
    pub edges: Vec<EdgeView>,
    pub header: HeaderView,
    pub backdrop: Option<BackdropView>,
    pub strip_tab: Option<StripTabView>,
    pub content_visible: bool,
    /// Position/size changes should animate (roll/unroll in progress).
    pub animate_layout: bool,
}

/// Inputs for [`PanelView::build`].
pub(crate) struct ViewInput<'a> {
    pub id: &'a PanelId,
    pub title: Option<&'a str>,
    pub phase: TransitionPhase,
    /// Displayed geometry (committed + live overlay).
    pub geometry: Geometry,
    pub is_open: bool,
    pub wants_backdrop: bool,
    pub animate_layout: bool,
    pub strip_offset: f64,
    pub viewport: Size,
    pub config: &'a PanelConfig,
}

impl PanelView {
    /// Build the view; `None` when the phase is not rendered.
    pub(crate) fn build(input: ViewInput<'_>) -> Option<PanelView> {
        let style = input.phase.style()?;
        let config = input.config;
        let rolled = input.geometry.rolled;

        let surface = if rolled {
            SurfaceView {
                x: input.strip_offset,
                y: input.viewport.height * ROLLED_SURFACE_TOP,
                width: config.strip_unit_width,
                height: Some(config.strip_height),
                rolled: true,
            }
        } else {
            SurfaceView {
                x: input.geometry.position.x,
                y: input.geometry.position.y,
                width: input.geometry.size.width,
                height: input.geometry.size.height.fixed(),
                rolled: false,
            }
        };

        let body = surface.rect(config.header_height);
        let edges = if rolled {
            Vec::new()
        } else {
            edge_views(body, config.edge_thickness)
        };

        let backdrop = (input.wants_backdrop && !rolled).then(|| BackdropView {
            rect: Rect::new(0.0, 0.0, input.viewport.width, input.viewport.height),
            opacity: style.backdrop_opacity,
        });

        let strip_tab = input.is_open.then(|| {
            let rect = Rect::new(
                input.strip_offset,
                input.viewport.height - config.strip_height,
                config.strip_unit_width,
                config.strip_height,
            );
            StripTabView {
                rect,
                rolled,
                unroll_button: rolled.then(|| {
                    Rect::new(
                        rect.right() - config.header_button_width,
                        rect.y,
                        config.header_button_width,
                        rect.height,
                    )
                }),
            }
        });

        Some(PanelView {
            id: input.id.clone(),
            title: input.title.map(str::to_owned),
            phase: input.phase,
            style,
            surface,
            edges,
            header: header_view(body, config),
            backdrop,
            strip_tab,
            content_visible: !rolled,
            animate_layout: input.animate_layout,
        })
    }

    /// Topmost interactive part under `(x, y)`.
    ///
    /// Priority: edges, header controls, drag handle, surface, strip tab,
    /// backdrop.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<PanelPart> {
        if let Some(edge) = self.edges.iter().find(|e| e.rect.contains(x, y)) {
            return Some(PanelPart::Edge(edge.edge));
        }

        let header = &self.header;
        let controls = [
            (header.backdrop_toggle, PanelPart::BackdropToggle),
            (header.roll_button, PanelPart::RollButton),
            (header.close_button, PanelPart::CloseButton),
            (header.drag_handle, PanelPart::DragHandle),
        ];
        if let Some((_, part)) = controls.iter().find(|(rect, _)| rect.contains(x, y)) {
            return Some(*part);
        }

        if self.surface.rect(header.drag_handle.height).contains(x, y) {
            return Some(PanelPart::Surface);
        }

        if let Some(tab) = &self.strip_tab {
            if tab.unroll_button.is_some_and(|b| b.contains(x, y)) {
                return Some(PanelPart::UnrollButton);
            }
            if tab.rect.contains(x, y) {
                return Some(PanelPart::StripTab);
            }
        }

        self.backdrop
            .filter(|b| b.rect.contains(x, y))
            .map(|_| PanelPart::Backdrop)
    }

    /// Rect of the resize strip for `edge`, if shown.
    pub fn edge_rect(&self, edge: ResizeEdge) -> Option<Rect> {
        self.edges.iter().find(|e| e.edge == edge).map(|e| e.rect)
    }
}

fn edge_views(body: Rect, thickness: f64) -> Vec<EdgeView> {
    ResizeEdge::ALL
        .into_iter()
        .map(|edge| {
            let rect = match edge {
                ResizeEdge::Top => Rect::new(body.x, body.y, body.width, thickness),
                ResizeEdge::Bottom => {
                    Rect::new(body.x, body.bottom() - thickness, body.width, thickness)
                }
                ResizeEdge::Left => Rect::new(body.x, body.y, thickness, body.height),
                ResizeEdge::Right => {
                    Rect::new(body.right() - thickness, body.y, thickness, body.height)
                }
            };
            EdgeView { edge, rect }
        })
        .collect()
}

fn header_view(body: Rect, config: &PanelConfig) -> HeaderView {
    let h = config.header_height;
    let bw = config.header_button_width;
    let close_button = Rect::new(body.right() - bw, body.y, bw, h);
    let roll_button = Rect::new(body.right() - 2.0 * bw, body.y, bw, h);
    let backdrop_toggle = Rect::new(body.x, body.y, bw, h);
    let handle_width = (roll_button.x - backdrop_toggle.right()).max(0.0);
    HeaderView {
        backdrop_toggle,
        drag_handle: Rect::new(backdrop_toggle.right(), body.y, handle_width, h),
        roll_button,
        close_button,
    }
}
