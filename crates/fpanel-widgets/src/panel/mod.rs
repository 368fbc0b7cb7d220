#![forbid(unsafe_code)]

//! Floating panel instance.
//!
//! A [`Panel`] composes the core pieces into one interactive window:
//!
//! - committed [`Geometry`] plus a [`GestureController`] for move/resize,
//! - a [`TransitionSource`] driving the open/close phases,
//! - a [`DeferredQueue`] for post-layout work,
//! - registration with the shared [`PanelContext`].
//!
//! The host owns the `is_open` flag. The panel never flips it; it asks via
//! the `on_close` callback and waits for [`Panel::set_open`].
//!
//! # Frame loop
//!
//! ```text
//! host input ──► handle_pointer(event, hit_test(..), now)
//! host timer ──► tick(now)   advance transition, run due tasks
//! host paint ──► view()      PanelView snapshot
//! ```
//!
//! # Invariants
//!
//! 1. A close request is ignored while the gesture controller's moved latch
//!    is engaged, so the click ending a drag never closes the panel.
//! 2. Deferred tasks scheduled before an open/close flip never touch the
//!    state of the next session (generation guard).
//! 3. A gesture still active when the exit transition completes is
//!    abandoned, and its viewport capture is released.

mod view;

pub use view::{
    BackdropView, EdgeView, HeaderView, PanelPart, PanelView, ResizeEdge, StripTabView,
    SurfaceView,
};

use std::fmt;
use std::rc::Rc;

use fpanel_core::deferred::{DeferredQueue, Generation};
use fpanel_core::event::{PointerButton, PointerEvent, PointerEventKind};
use fpanel_core::geometry::{Geometry, GeometryPatch, PanelSize, centered_origin};
use fpanel_core::gesture::{GestureController, GestureMode};
use fpanel_core::transition::{TimedTransition, TransitionPhase, TransitionSource};
use web_time::{Duration, Instant};

use crate::context::PanelContext;
use crate::registry::{PanelId, PanelStatus};
use view::ViewInput;

/// Construction properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelProps {
    pub id: PanelId,
    pub title: Option<String>,
    pub is_open: bool,
    pub wants_backdrop: bool,
}

impl PanelProps {
    /// Closed panel with a backdrop and no title.
    pub fn new(id: impl Into<PanelId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            is_open: false,
            wants_backdrop: true,
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    #[must_use]
    pub fn backdrop(mut self, wants_backdrop: bool) -> Self {
        self.wants_backdrop = wants_backdrop;
        self
    }
}

/// Errors from panel construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Panel ids key the shared registry and must be non-empty.
    EmptyId,
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "panel id must not be empty"),
        }
    }
}

impl std::error::Error for PanelError {}

/// What [`Panel::handle_pointer`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    Ignored,
    GestureStarted(GestureMode),
    GestureUpdated,
    GestureCommitted(Geometry),
    CloseRequested,
    /// A close/action click landed within the moved-latch grace period.
    Suppressed,
    Rolled,
    Unrolled,
    BackdropToggled(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelTask {
    MeasureHeight,
    CenterIfUnplaced,
    ReleaseMovedLatch { sequence: u64 },
    SettleLayout,
    ResetGeometry,
}

impl PanelTask {
    /// Latch release is guarded by the gesture sequence instead, so it must
    /// survive a close/reopen within the grace period.
    const fn is_generation_bound(self) -> bool {
        !matches!(self, Self::ReleaseMovedLatch { .. })
    }

    #[cfg_attr(not(feature = "tracing"), allow(dead_code))]
    const fn as_str(self) -> &'static str {
        match self {
            Self::MeasureHeight => "measure_height",
            Self::CenterIfUnplaced => "center_if_unplaced",
            Self::ReleaseMovedLatch { .. } => "release_moved_latch",
            Self::SettleLayout => "settle_layout",
            Self::ResetGeometry => "reset_geometry",
        }
    }
}

type CloseCallback = Box<dyn FnMut(&PanelId)>;

/// One floating panel.
pub struct Panel {
    id: PanelId,
    title: Option<String>,
    ctx: Rc<PanelContext>,
    geometry: Geometry,
    gesture: GestureController,
    transition: Box<dyn TransitionSource>,
    tasks: DeferredQueue<PanelTask>,
    generation: Generation,
    is_open: bool,
    wants_backdrop: bool,
    animate_layout: bool,
    layout_pending: bool,
    on_close: CloseCallback,
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("id", &self.id)
            .field("geometry", &self.geometry)
            .field("phase", &self.transition.phase())
            .field("is_open", &self.is_open)
            .field("wants_backdrop", &self.wants_backdrop)
            .field("gesture", &self.gesture)
            .finish()
    }
}

impl Panel {
    /// Create a panel driven by a [`TimedTransition`] built from the
    /// context's configuration.
    pub fn new(
        props: PanelProps,
        ctx: Rc<PanelContext>,
        on_close: impl FnMut(&PanelId) + 'static,
    ) -> Result<Self, PanelError> {
        let transition = TimedTransition::new(ctx.config().transition_timings(), props.is_open);
        Self::with_transition(props, ctx, Box::new(transition), on_close)
    }

    /// Create a panel driven by an external phase source.
    pub fn with_transition(
        props: PanelProps,
        ctx: Rc<PanelContext>,
        transition: Box<dyn TransitionSource>,
        on_close: impl FnMut(&PanelId) + 'static,
    ) -> Result<Self, PanelError> {
        if props.id.is_empty() {
            return Err(PanelError::EmptyId);
        }

        let gesture = GestureController::new(Rc::clone(ctx.host()), ctx.config().gesture_config());
        let mut panel = Self {
            geometry: default_geometry(&ctx),
            id: props.id,
            title: props.title,
            ctx,
            gesture,
            transition,
            tasks: DeferredQueue::new(),
            generation: Generation::default(),
            is_open: props.is_open,
            wants_backdrop: props.wants_backdrop,
            animate_layout: false,
            layout_pending: props.is_open,
            on_close: Box::new(on_close),
        };
        panel.publish();
        if panel.transition.phase().is_rendered() {
            panel.ctx.attach(&panel.id);
        }
        Ok(panel)
    }

    #[inline]
    pub fn id(&self) -> &PanelId {
        &self.id
    }

    #[inline]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    /// Committed geometry (without the live gesture overlay).
    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Geometry to render: committed plus the live gesture overlay.
    #[inline]
    pub fn display_geometry(&self) -> Geometry {
        self.gesture.display(&self.geometry)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    #[inline]
    pub fn is_rolled(&self) -> bool {
        self.geometry.rolled
    }

    #[inline]
    pub fn wants_backdrop(&self) -> bool {
        self.wants_backdrop
    }

    #[inline]
    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    #[inline]
    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.next_due()
    }

    /// Mirror the host's `is_open` flag. Redundant calls are no-ops.
    pub fn set_open(&mut self, open: bool, now: Instant) {
        if open == self.is_open {
            return;
        }
        self.is_open = open;
        self.generation = self.generation.next();
        self.transition.set_visible(open, now);

        if open {
            self.animate_layout = false;
            self.layout_pending = false;
            self.schedule_layout(now);
            if self.transition.phase().is_rendered() {
                self.ctx.attach(&self.id);
            }
        } else {
            self.layout_pending = false;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = if open { "panel.open" } else { "panel.close" },
            id = self.id.as_str(),
            generation = self.generation.get()
        );
        self.publish();
    }

    /// Route one pointer event. `target` is the part under the pointer as
    /// reported by [`PanelView::hit_test`].
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        target: Option<PanelPart>,
        now: Instant,
    ) -> PointerOutcome {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event, target),
            PointerEventKind::Move => {
                if self.gesture.pointer_move(event.position(), &self.geometry) {
                    PointerOutcome::GestureUpdated
                } else {
                    PointerOutcome::Ignored
                }
            }
            PointerEventKind::Up => self.pointer_up(now),
            PointerEventKind::Click => self.click(event, target, now),
        }
    }

    fn pointer_down(&mut self, event: &PointerEvent, target: Option<PanelPart>) -> PointerOutcome {
        if event.button != PointerButton::Primary || !self.transition.phase().is_rendered() {
            return PointerOutcome::Ignored;
        }
        let mode = match target {
            Some(PanelPart::DragHandle) => GestureMode::Move,
            Some(PanelPart::Edge(edge)) => edge.gesture_mode(),
            _ => return PointerOutcome::Ignored,
        };
        if self.gesture.begin(mode, event.position(), &self.geometry) {
            PointerOutcome::GestureStarted(mode)
        } else {
            PointerOutcome::Ignored
        }
    }

    fn pointer_up(&mut self, now: Instant) -> PointerOutcome {
        let Some(commit) = self.gesture.end(&self.geometry) else {
            return PointerOutcome::Ignored;
        };
        self.geometry = commit.geometry;
        let grace = self.gesture.config().moved_latch_grace;
        self.tasks.schedule(
            now,
            grace,
            self.generation,
            PanelTask::ReleaseMovedLatch {
                sequence: commit.sequence,
            },
        );
        PointerOutcome::GestureCommitted(commit.geometry)
    }

    fn click(
        &mut self,
        event: &PointerEvent,
        target: Option<PanelPart>,
        now: Instant,
    ) -> PointerOutcome {
        if event.button != PointerButton::Primary {
            return PointerOutcome::Ignored;
        }
        let Some(part) = target else {
            return PointerOutcome::Ignored;
        };
        let acts = matches!(
            part,
            PanelPart::CloseButton
                | PanelPart::Backdrop
                | PanelPart::RollButton
                | PanelPart::UnrollButton
                | PanelPart::BackdropToggle
        );
        if !acts {
            return PointerOutcome::Ignored;
        }
        if self.gesture.is_moved() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "panel.click.suppressed",
                id = self.id.as_str(),
                part = ?part
            );
            return PointerOutcome::Suppressed;
        }

        match part {
            PanelPart::CloseButton | PanelPart::Backdrop => {
                if self.request_close() {
                    PointerOutcome::CloseRequested
                } else {
                    PointerOutcome::Ignored
                }
            }
            PanelPart::RollButton if self.roll() => PointerOutcome::Rolled,
            PanelPart::UnrollButton if self.unroll(now) => PointerOutcome::Unrolled,
            PanelPart::BackdropToggle => PointerOutcome::BackdropToggled(self.toggle_backdrop()),
            _ => PointerOutcome::Ignored,
        }
    }

    /// Ask the host to close the panel. Returns `false` when suppressed by
    /// the moved latch or when the panel is already closed.
    pub fn request_close(&mut self) -> bool {
        if !self.is_open {
            return false;
        }
        if self.gesture.is_moved() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "panel.close.suppressed", id = self.id.as_str());
            return false;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.close.requested", id = self.id.as_str());
        (self.on_close)(&self.id);
        true
    }

    /// Collapse into the strip. Any active gesture is abandoned.
    pub fn roll(&mut self) -> bool {
        if !self.is_open || self.geometry.rolled {
            return false;
        }
        self.gesture.abandon();
        self.geometry = self.geometry.commit(
            GeometryPatch::default().rolled(true),
            self.ctx.config().size_bounds(),
        );
        self.animate_layout = true;
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.roll", id = self.id.as_str());
        self.publish();
        true
    }

    /// Restore from the strip to the pre-roll geometry.
    pub fn unroll(&mut self, now: Instant) -> bool {
        if !self.geometry.rolled {
            return false;
        }
        self.geometry = self.geometry.commit(
            GeometryPatch::default().rolled(false),
            self.ctx.config().size_bounds(),
        );
        self.animate_layout = true;
        self.tasks
            .schedule(now, Duration::ZERO, self.generation, PanelTask::SettleLayout);
        #[cfg(feature = "tracing")]
        tracing::debug!(message = "panel.unroll", id = self.id.as_str());
        self.publish();
        true
    }

    /// Flip the backdrop preference; returns the new value.
    pub fn toggle_backdrop(&mut self) -> bool {
        self.set_wants_backdrop(!self.wants_backdrop);
        self.wants_backdrop
    }

    pub fn set_wants_backdrop(&mut self, wants_backdrop: bool) {
        if self.wants_backdrop == wants_backdrop {
            return;
        }
        self.wants_backdrop = wants_backdrop;
        self.publish();
    }

    /// Advance the transition and run every deferred task due at `now`.
    pub fn tick(&mut self, now: Instant) {
        if std::mem::take(&mut self.layout_pending) {
            self.schedule_layout(now);
        }

        if let Some(phase) = self.transition.poll(now) {
            #[cfg(feature = "tracing")]
            tracing::trace!(message = "panel.phase", id = self.id.as_str(), phase = ?phase);
            if phase.is_rendered() {
                self.ctx.attach(&self.id);
            } else {
                // Exited and Unmounted both end the exit transition.
                self.ctx.detach(self.id.as_str());
                if !self.is_open {
                    self.tasks
                        .schedule(now, Duration::ZERO, self.generation, PanelTask::ResetGeometry);
                }
            }
        }

        for due in self.tasks.drain_due(now) {
            if due.task.is_generation_bound() && due.generation != self.generation {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    message = "panel.task.stale",
                    id = self.id.as_str(),
                    task = due.task.as_str()
                );
                continue;
            }
            self.run_task(due.task);
        }
    }

    /// Snapshot for the renderer; `None` while hidden.
    pub fn view(&self) -> Option<PanelView> {
        PanelView::build(ViewInput {
            id: &self.id,
            title: self.title.as_deref(),
            phase: self.transition.phase(),
            geometry: self.display_geometry(),
            is_open: self.is_open,
            wants_backdrop: self.wants_backdrop,
            animate_layout: self.animate_layout,
            strip_offset: self.ctx.strip_offset(self.id.as_str()),
            viewport: self.ctx.host().viewport(),
            config: self.ctx.config(),
        })
    }

    /// Hit test against the current view.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<PanelPart> {
        self.view().and_then(|view| view.hit_test(x, y))
    }

    fn schedule_layout(&mut self, now: Instant) {
        for task in [PanelTask::MeasureHeight, PanelTask::CenterIfUnplaced] {
            self.tasks.schedule(now, Duration::ZERO, self.generation, task);
        }
    }

    fn run_task(&mut self, task: PanelTask) {
        match task {
            PanelTask::MeasureHeight => self.measure_height(),
            PanelTask::CenterIfUnplaced => self.center_if_unplaced(),
            PanelTask::ReleaseMovedLatch { sequence } => {
                self.gesture.release_moved_latch(sequence);
            }
            PanelTask::SettleLayout => self.animate_layout = false,
            PanelTask::ResetGeometry => {
                if self.is_open {
                    return;
                }
                self.gesture.abandon();
                self.geometry = default_geometry(&self.ctx);
                self.animate_layout = false;
                self.publish();
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "panel.reset", id = self.id.as_str());
            }
        }
    }

    fn measure_height(&mut self) {
        if !self.is_open || !self.geometry.size.height.is_auto() {
            return;
        }
        match self.ctx.host().measure_content(self.id.as_str()) {
            Some(size) => {
                self.geometry = self
                    .geometry
                    .with_measured_height(size.height, self.ctx.config().size_bounds());
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = "panel.measure.skipped", id = self.id.as_str());
            }
        }
    }

    fn center_if_unplaced(&mut self) {
        if !self.is_open || self.geometry.is_placed() {
            return;
        }
        let host = self.ctx.host();
        let Some(content) = host.measure_content(self.id.as_str()) else {
            return;
        };
        let origin = centered_origin(host.viewport(), content);
        self.geometry = self.geometry.commit(
            GeometryPatch::default().position(origin),
            self.ctx.config().size_bounds(),
        );
    }

    fn publish(&self) {
        self.ctx.register(
            &self.id,
            PanelStatus::new(self.is_open, self.geometry.rolled, self.wants_backdrop),
        );
    }
}

impl Drop for Panel {
    fn drop(&mut self) {
        self.gesture.abandon();
        self.ctx.detach(self.id.as_str());
        self.ctx.unregister(self.id.as_str());
    }
}

fn default_geometry(ctx: &PanelContext) -> Geometry {
    Geometry {
        size: PanelSize {
            width: ctx.config().default_width,
            ..PanelSize::default()
        },
        ..Geometry::default()
    }
}
