#![forbid(unsafe_code)]

//! Drag-move and edge-resize gestures for one panel.
//!
//! [`GestureController`] owns the transient gesture state of a single panel:
//! which [`GestureMode`] is active, where the pointer went down, and the live
//! delta accumulated since. The committed [`Geometry`] is never touched while
//! a gesture runs; renderers combine it with the live delta through
//! [`GestureController::display`], and [`GestureController::end`] returns the
//! committed result in one value.
//!
//! # State Machine
//!
//! ```text
//! Idle ──begin──▶ Active(mode, anchor, delta) ──end──▶ Idle
//!                        │  ▲                    └──abandon/drop──▶ Idle
//!                        └──┘ pointer_move
//! ```
//!
//! Mode math lives in a lookup table of [`GestureHandler`]s, one per mode, so
//! each mode's behavior is a pair of pure functions.
//!
//! # Invariants
//!
//! 1. At most one gesture is active per controller; a second `begin` is
//!    rejected, not queued.
//! 2. Every successful `begin` acquires exactly one [`ViewportCapture`]; it is
//!    released by `end`, `abandon`, or dropping the controller.
//! 3. Top/left resizes keep the opposite edge fixed; bottom/right never move
//!    the position.
//! 4. No resize takes a width or numeric height below [`SizeBounds`].
//! 5. The moved latch is engaged from `begin` until the release matching that
//!    gesture's sequence number is applied.
//!
//! # Failure Modes
//!
//! - Non-finite pointer coordinates, rolled panels, and vertical resizes of a
//!   not-yet-measured (`Auto`) height make `begin` a no-op.
//! - `end` and `pointer_move` without an active gesture are no-ops.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use web_time::Duration;

use crate::geometry::{Delta, Geometry, GeometryPatch, Height, Point, SizeBounds};
use crate::host::{Host, ListenerId};

/// Grace period the moved latch outlives a gesture by.
pub const DEFAULT_MOVED_LATCH_GRACE: Duration = Duration::from_millis(100);

/// Global counter for unique viewport listener IDs.
static LISTENER_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_listener_id() -> ListenerId {
    ListenerId::new(LISTENER_COUNTER.fetch_add(1, Ordering::Relaxed))
}

// ---------------------------------------------------------------------------
// Modes and handlers
// ---------------------------------------------------------------------------

/// Gesture kind; exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureMode {
    Move,
    ResizeTop,
    ResizeBottom,
    ResizeLeft,
    ResizeRight,
}

impl GestureMode {
    pub const ALL: [Self; 5] = [
        Self::Move,
        Self::ResizeTop,
        Self::ResizeBottom,
        Self::ResizeLeft,
        Self::ResizeRight,
    ];

    /// The handler implementing this mode.
    #[inline]
    pub fn handler(self) -> &'static GestureHandler {
        &HANDLERS[self as usize]
    }

    /// Whether this mode changes the height.
    #[inline]
    pub const fn is_vertical_resize(self) -> bool {
        matches!(self, Self::ResizeTop | Self::ResizeBottom)
    }

    /// Stable name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::ResizeTop => "resize-top",
            Self::ResizeBottom => "resize-bottom",
            Self::ResizeLeft => "resize-left",
            Self::ResizeRight => "resize-right",
        }
    }
}

impl fmt::Display for GestureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure math for one gesture mode.
///
/// The delta is mode-relative: for `Move` it is the position offset, for the
/// resize modes it is the growth of the affected extent (`dx` for width,
/// `dy` for height).
pub struct GestureHandler {
    pub mode: GestureMode,
    /// Delta for a pointer at `pointer` after going down at `anchor`.
    pub live_delta: fn(anchor: Point, pointer: Point, committed: &Geometry, bounds: SizeBounds) -> Delta,
    /// Geometry that results from applying `delta` to `committed`.
    pub apply: fn(committed: &Geometry, delta: Delta, bounds: SizeBounds) -> Geometry,
}

impl fmt::Debug for GestureHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureHandler")
            .field("mode", &self.mode)
            .finish()
    }
}

static HANDLERS: [GestureHandler; 5] = [
    GestureHandler {
        mode: GestureMode::Move,
        live_delta: move_delta,
        apply: move_apply,
    },
    GestureHandler {
        mode: GestureMode::ResizeTop,
        live_delta: top_delta,
        apply: top_apply,
    },
    GestureHandler {
        mode: GestureMode::ResizeBottom,
        live_delta: bottom_delta,
        apply: bottom_apply,
    },
    GestureHandler {
        mode: GestureMode::ResizeLeft,
        live_delta: left_delta,
        apply: left_apply,
    },
    GestureHandler {
        mode: GestureMode::ResizeRight,
        live_delta: right_delta,
        apply: right_apply,
    },
];

/// Smallest growth that keeps `extent` at or above `min`.
#[inline]
fn clamp_growth(growth: f64, extent: f64, min: f64) -> f64 {
    growth.max(min - extent)
}

fn move_delta(anchor: Point, pointer: Point, _: &Geometry, _: SizeBounds) -> Delta {
    anchor.delta_to(pointer)
}

fn move_apply(committed: &Geometry, delta: Delta, bounds: SizeBounds) -> Geometry {
    committed.commit(
        GeometryPatch::default().position(committed.position.offset(delta)),
        bounds,
    )
}

fn top_delta(anchor: Point, pointer: Point, committed: &Geometry, bounds: SizeBounds) -> Delta {
    let Some(height) = committed.size.height.fixed() else {
        return Delta::ZERO;
    };
    Delta::new(
        0.0,
        clamp_growth(anchor.y - pointer.y, height, bounds.min_height),
    )
}

fn top_apply(committed: &Geometry, delta: Delta, bounds: SizeBounds) -> Geometry {
    let Some(height) = committed.size.height.fixed() else {
        return *committed;
    };
    committed.commit(
        GeometryPatch::default()
            .height(Height::Fixed(height + delta.dy))
            .position(Point::new(committed.position.x, committed.position.y - delta.dy)),
        bounds,
    )
}

fn bottom_delta(anchor: Point, pointer: Point, committed: &Geometry, bounds: SizeBounds) -> Delta {
    let Some(height) = committed.size.height.fixed() else {
        return Delta::ZERO;
    };
    Delta::new(
        0.0,
        clamp_growth(pointer.y - anchor.y, height, bounds.min_height),
    )
}

fn bottom_apply(committed: &Geometry, delta: Delta, bounds: SizeBounds) -> Geometry {
    let Some(height) = committed.size.height.fixed() else {
        return *committed;
    };
    committed.commit(
        GeometryPatch::default().height(Height::Fixed(height + delta.dy)),
        bounds,
    )
}

fn left_delta(anchor: Point, pointer: Point, committed: &Geometry, bounds: SizeBounds) -> Delta {
    Delta::new(
        clamp_growth(anchor.x - pointer.x, committed.size.width, bounds.min_width),
        0.0,
    )
}

fn left_apply(committed: &Geometry, delta: Delta, bounds: SizeBounds) -> Geometry {
    committed.commit(
        GeometryPatch::default()
            .width(committed.size.width + delta.dx)
            .position(Point::new(committed.position.x - delta.dx, committed.position.y)),
        bounds,
    )
}

fn right_delta(anchor: Point, pointer: Point, committed: &Geometry, bounds: SizeBounds) -> Delta {
    Delta::new(
        clamp_growth(pointer.x - anchor.x, committed.size.width, bounds.min_width),
        0.0,
    )
}

fn right_apply(committed: &Geometry, delta: Delta, bounds: SizeBounds) -> Geometry {
    committed.commit(
        GeometryPatch::default().width(committed.size.width + delta.dx),
        bounds,
    )
}

// ---------------------------------------------------------------------------
// Viewport capture
// ---------------------------------------------------------------------------

/// Host-side effects held for the duration of one gesture.
///
/// Acquiring suppresses page text selection and registers a viewport-wide
/// pointer listener; dropping undoes both.
pub struct ViewportCapture {
    host: Rc<dyn Host>,
    listener: ListenerId,
}

impl ViewportCapture {
    fn acquire(host: Rc<dyn Host>, listener: ListenerId) -> Self {
        host.set_text_selection(false);
        host.add_viewport_listener(listener);
        Self { host, listener }
    }

    #[inline]
    pub fn listener(&self) -> ListenerId {
        self.listener
    }
}

impl Drop for ViewportCapture {
    fn drop(&mut self) {
        self.host.remove_viewport_listener(self.listener);
        self.host.set_text_selection(true);
    }
}

impl fmt::Debug for ViewportCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportCapture")
            .field("listener", &self.listener)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Controller configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Minimum committed size.
    pub bounds: SizeBounds,
    /// How long the moved latch outlives a gesture.
    pub moved_latch_grace: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            bounds: SizeBounds::default(),
            moved_latch_grace: DEFAULT_MOVED_LATCH_GRACE,
        }
    }
}

#[derive(Debug)]
struct ActiveGesture {
    mode: GestureMode,
    anchor: Point,
    live: Delta,
    sequence: u64,
    _capture: ViewportCapture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MovedLatch {
    Idle,
    Engaged { sequence: u64 },
}

/// Result of ending a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureCommit {
    pub mode: GestureMode,
    /// New committed geometry (committed + delta, in one step).
    pub geometry: Geometry,
    /// Delta that was folded in.
    pub delta: Delta,
    /// Sequence number to pass to [`GestureController::release_moved_latch`]
    /// once the grace period has elapsed.
    pub sequence: u64,
}

/// Per-panel gesture state machine.
pub struct GestureController {
    config: GestureConfig,
    host: Rc<dyn Host>,
    listener: ListenerId,
    active: Option<ActiveGesture>,
    latch: MovedLatch,
    sequence: u64,
}

impl fmt::Debug for GestureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureController")
            .field("mode", &self.mode())
            .field("live_delta", &self.live_delta())
            .field("latch", &self.latch)
            .finish()
    }
}

impl GestureController {
    #[must_use]
    pub fn new(host: Rc<dyn Host>, config: GestureConfig) -> Self {
        Self {
            config,
            host,
            listener: next_listener_id(),
            active: None,
            latch: MovedLatch::Idle,
            sequence: 0,
        }
    }

    #[inline]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Listener ID this controller registers with the host.
    #[inline]
    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    /// Start a gesture. Returns `false` (and changes nothing) when a gesture
    /// is already active, the panel is rolled, the pointer position is not
    /// finite, or a vertical resize targets an unmeasured height.
    pub fn begin(&mut self, mode: GestureMode, pointer: Point, committed: &Geometry) -> bool {
        let rejected = if self.active.is_some() {
            Some("already_active")
        } else if committed.rolled {
            Some("rolled")
        } else if !pointer.x.is_finite() || !pointer.y.is_finite() {
            Some("invalid_pointer")
        } else if mode.is_vertical_resize() && committed.size.height.is_auto() {
            Some("unmeasured_height")
        } else {
            None
        };
        if let Some(_reason) = rejected {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "panel.gesture.rejected", mode = mode.as_str(), reason = _reason);
            return false;
        }

        self.sequence = self.sequence.wrapping_add(1);
        self.latch = MovedLatch::Engaged {
            sequence: self.sequence,
        };
        self.active = Some(ActiveGesture {
            mode,
            anchor: pointer,
            live: Delta::ZERO,
            sequence: self.sequence,
            _capture: ViewportCapture::acquire(Rc::clone(&self.host), self.listener),
        });

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.gesture.begin",
            mode = mode.as_str(),
            x = pointer.x,
            y = pointer.y,
            sequence = self.sequence
        );
        true
    }

    /// Recompute the live delta. Returns `true` if it changed.
    pub fn pointer_move(&mut self, pointer: Point, committed: &Geometry) -> bool {
        let bounds = self.config.bounds;
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return false;
        }
        let next = (active.mode.handler().live_delta)(active.anchor, pointer, committed, bounds);
        if next == active.live {
            return false;
        }
        active.live = next;
        true
    }

    /// Finish the active gesture: fold the live delta into `committed`,
    /// release the viewport capture, and leave the moved latch engaged until
    /// [`release_moved_latch`](Self::release_moved_latch) is called with the
    /// returned sequence.
    pub fn end(&mut self, committed: &Geometry) -> Option<GestureCommit> {
        let active = self.active.take()?;
        let geometry = (active.mode.handler().apply)(committed, active.live, self.config.bounds);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.gesture.end",
            mode = active.mode.as_str(),
            dx = active.live.dx,
            dy = active.live.dy,
            sequence = active.sequence
        );

        Some(GestureCommit {
            mode: active.mode,
            geometry,
            delta: active.live,
            sequence: active.sequence,
        })
    }

    /// Drop the active gesture without committing. The moved latch is
    /// cleared immediately.
    pub fn abandon(&mut self) -> bool {
        let Some(_active) = self.active.take() else {
            return false;
        };
        self.latch = MovedLatch::Idle;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "panel.gesture.abandon",
            mode = _active.mode.as_str(),
            sequence = _active.sequence
        );
        true
    }

    /// Release the moved latch engaged by gesture `sequence`. A stale
    /// release (a newer gesture has begun since) is ignored.
    pub fn release_moved_latch(&mut self, sequence: u64) -> bool {
        match self.latch {
            MovedLatch::Engaged { sequence: held }
                if held == sequence && self.active.is_none() =>
            {
                self.latch = MovedLatch::Idle;
                true
            }
            _ => false,
        }
    }

    /// Whether a gesture is running or ended within the grace period.
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self.latch, MovedLatch::Engaged { .. })
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[inline]
    pub fn mode(&self) -> Option<GestureMode> {
        self.active.as_ref().map(|a| a.mode)
    }

    #[inline]
    pub fn anchor(&self) -> Option<Point> {
        self.active.as_ref().map(|a| a.anchor)
    }

    /// Live delta of the active gesture, zero when idle.
    #[inline]
    pub fn live_delta(&self) -> Delta {
        self.active.as_ref().map_or(Delta::ZERO, |a| a.live)
    }

    /// Geometry to display: committed geometry plus the live overlay.
    #[must_use]
    pub fn display(&self, committed: &Geometry) -> Geometry {
        match &self.active {
            Some(active) => (active.mode.handler().apply)(committed, active.live, self.config.bounds),
            None => *committed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{PanelSize, Size};
    use crate::host::MountNode;
    use std::cell::{Cell, RefCell};
    use std::collections::BTreeSet;
    #[cfg(feature = "tracing")]
    use std::sync::{Arc, Mutex};
    #[cfg(feature = "tracing")]
    use tracing::Subscriber;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::Layer;
    #[cfg(feature = "tracing")]
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[derive(Default)]
    struct TestHost {
        listeners: RefCell<BTreeSet<ListenerId>>,
        selection: Cell<Option<bool>>,
    }

    impl Host for TestHost {
        fn viewport(&self) -> Size {
            Size::new(1000.0, 800.0)
        }
        fn measure_content(&self, _: &str) -> Option<Size> {
            None
        }
        fn set_text_selection(&self, enabled: bool) {
            self.selection.set(Some(enabled));
        }
        fn add_viewport_listener(&self, id: ListenerId) {
            self.listeners.borrow_mut().insert(id);
        }
        fn remove_viewport_listener(&self, id: ListenerId) {
            self.listeners.borrow_mut().remove(&id);
        }
        fn set_scroll_locked(&self, _: bool) {}
        fn create_mount_node(&self) -> MountNode {
            MountNode::new(1)
        }
        fn set_mount_occupied(&self, _: bool) {}
    }

    fn setup() -> (Rc<TestHost>, GestureController) {
        let host = Rc::new(TestHost::default());
        let ctrl = GestureController::new(host.clone(), GestureConfig::default());
        (host, ctrl)
    }

    fn geom(x: f64, y: f64, w: f64, h: f64) -> Geometry {
        Geometry::new(Point::new(x, y), PanelSize::new(w, Height::Fixed(h)))
    }

    #[test]
    fn handler_table_is_indexed_by_mode() {
        for mode in GestureMode::ALL {
            assert_eq!(mode.handler().mode, mode);
        }
    }

    #[test]
    fn move_tracks_pointer_and_commits() {
        let (host, mut ctrl) = setup();
        let g = geom(200.0, 150.0, 400.0, 300.0);
        assert!(ctrl.begin(GestureMode::Move, Point::new(100.0, 100.0), &g));
        assert!(!host.listeners.borrow().is_empty());
        assert_eq!(host.selection.get(), Some(false));

        ctrl.pointer_move(Point::new(130.0, 145.0), &g);
        assert_eq!(ctrl.live_delta(), Delta::new(30.0, 45.0));
        assert_eq!(ctrl.display(&g).position, Point::new(230.0, 195.0));

        let commit = ctrl.end(&g).expect("active gesture");
        assert_eq!(commit.geometry.position, Point::new(230.0, 195.0));
        assert_eq!(commit.geometry.size, g.size);
        assert!(host.listeners.borrow().is_empty());
        assert_eq!(host.selection.get(), Some(true));
        assert_eq!(ctrl.live_delta(), Delta::ZERO);
        assert_eq!(ctrl.mode(), None);
    }

    #[test]
    fn resize_top_keeps_bottom_edge() {
        let (_host, mut ctrl) = setup();
        let g = geom(100.0, 100.0, 400.0, 300.0);
        ctrl.begin(GestureMode::ResizeTop, Point::new(300.0, 100.0), &g);
        ctrl.pointer_move(Point::new(300.0, 60.0), &g);
        let out = ctrl.end(&g).unwrap().geometry;
        assert_eq!(out.size.height, Height::Fixed(340.0));
        assert_eq!(out.position.y, 60.0);
        assert_eq!(out.bottom(), g.bottom());
    }

    #[test]
    fn resize_bottom_leaves_position() {
        let (_host, mut ctrl) = setup();
        let g = geom(100.0, 100.0, 400.0, 300.0);
        ctrl.begin(GestureMode::ResizeBottom, Point::new(300.0, 400.0), &g);
        ctrl.pointer_move(Point::new(300.0, 450.0), &g);
        let out = ctrl.end(&g).unwrap().geometry;
        assert_eq!(out.size.height, Height::Fixed(350.0));
        assert_eq!(out.position, g.position);
    }

    #[test]
    fn resize_left_keeps_right_edge_and_clamps() {
        let (_host, mut ctrl) = setup();
        let g = geom(100.0, 100.0, 400.0, 300.0);
        ctrl.begin(GestureMode::ResizeLeft, Point::new(100.0, 200.0), &g);
        // Past the minimum: width stops at 50.
        ctrl.pointer_move(Point::new(900.0, 200.0), &g);
        assert_eq!(ctrl.live_delta().dx, -350.0);
        let out = ctrl.end(&g).unwrap().geometry;
        assert_eq!(out.size.width, MIN_WIDTH);
        assert_eq!(out.right(), g.right());
    }

    const MIN_WIDTH: f64 = crate::geometry::MIN_PANEL_EXTENT;

    #[test]
    fn resize_right_clamps_to_minimum() {
        let (_host, mut ctrl) = setup();
        let g = geom(100.0, 100.0, 400.0, 300.0);
        ctrl.begin(GestureMode::ResizeRight, Point::new(500.0, 200.0), &g);
        ctrl.pointer_move(Point::new(0.0, 200.0), &g);
        let out = ctrl.end(&g).unwrap().geometry;
        assert_eq!(out.size.width, MIN_WIDTH);
        assert_eq!(out.position, g.position);
    }

    #[test]
    fn second_begin_is_rejected() {
        let (host, mut ctrl) = setup();
        let g = geom(0.0, 0.0, 400.0, 300.0);
        assert!(ctrl.begin(GestureMode::ResizeRight, Point::new(1.0, 1.0), &g));
        assert!(!ctrl.begin(GestureMode::Move, Point::new(5.0, 5.0), &g));
        assert_eq!(ctrl.mode(), Some(GestureMode::ResizeRight));
        assert_eq!(ctrl.anchor(), Some(Point::new(1.0, 1.0)));
        assert_eq!(host.listeners.borrow().len(), 1);
    }

    #[test]
    fn rolled_and_unmeasured_panels_reject() {
        let (host, mut ctrl) = setup();
        let mut rolled = geom(0.0, 0.0, 400.0, 300.0);
        rolled.rolled = true;
        assert!(!ctrl.begin(GestureMode::Move, Point::new(1.0, 1.0), &rolled));

        let auto = Geometry::default();
        assert!(!ctrl.begin(GestureMode::ResizeTop, Point::new(1.0, 1.0), &auto));
        assert!(ctrl.begin(GestureMode::ResizeRight, Point::new(1.0, 1.0), &auto));
        ctrl.abandon();

        assert!(!ctrl.begin(GestureMode::Move, Point::new(f64::NAN, 1.0), &auto));
        assert!(host.listeners.borrow().is_empty());
    }

    #[test]
    fn end_without_gesture_is_noop() {
        let (_host, mut ctrl) = setup();
        assert!(ctrl.end(&Geometry::default()).is_none());
        assert!(!ctrl.pointer_move(Point::new(1.0, 1.0), &Geometry::default()));
        assert!(!ctrl.abandon());
    }

    #[test]
    fn latch_release_is_sequence_guarded() {
        let (_host, mut ctrl) = setup();
        let g = geom(0.0, 0.0, 400.0, 300.0);
        ctrl.begin(GestureMode::Move, Point::new(0.0, 0.0), &g);
        assert!(ctrl.is_moved());
        let first = ctrl.end(&g).unwrap().sequence;
        assert!(ctrl.is_moved());

        ctrl.begin(GestureMode::Move, Point::new(0.0, 0.0), &g);
        // Stale release from the first gesture must not clear the latch.
        assert!(!ctrl.release_moved_latch(first));
        assert!(ctrl.is_moved());
        let second = ctrl.end(&g).unwrap().sequence;
        assert!(ctrl.release_moved_latch(second));
        assert!(!ctrl.is_moved());
    }

    #[test]
    fn dropping_controller_releases_capture() {
        let (host, mut ctrl) = setup();
        ctrl.begin(
            GestureMode::Move,
            Point::new(0.0, 0.0),
            &geom(0.0, 0.0, 100.0, 100.0),
        );
        drop(ctrl);
        assert!(host.listeners.borrow().is_empty());
        assert_eq!(host.selection.get(), Some(true));
    }

    #[cfg(feature = "tracing")]
    struct GestureTraceCapture {
        events: Arc<Mutex<Vec<(String, Option<String>)>>>,
    }

    #[cfg(feature = "tracing")]
    impl<S> Layer<S> for GestureTraceCapture
    where
        S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
    {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            #[derive(Default)]
            struct Fields {
                message: Option<String>,
                reason: Option<String>,
            }
            impl tracing::field::Visit for Fields {
                fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                    match field.name() {
                        "message" => self.message = Some(value.to_string()),
                        "reason" => self.reason = Some(value.to_string()),
                        _ => {}
                    }
                }

                fn record_debug(
                    &mut self,
                    field: &tracing::field::Field,
                    value: &dyn std::fmt::Debug,
                ) {
                    let value = format!("{value:?}").trim_matches('"').to_string();
                    match field.name() {
                        "message" => self.message = Some(value),
                        "reason" => self.reason = Some(value),
                        _ => {}
                    }
                }
            }
            let mut fields = Fields::default();
            event.record(&mut fields);
            if let Some(message) = fields.message {
                self.events
                    .lock()
                    .expect("gesture trace lock")
                    .push((message, fields.reason));
            }
        }
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn gesture_lifecycle_is_traced() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(GestureTraceCapture {
            events: Arc::clone(&events),
        });
        let _guard = tracing::subscriber::set_default(subscriber);

        let (_host, mut ctrl) = setup();
        let g = geom(100.0, 100.0, 400.0, 300.0);
        assert!(ctrl.begin(GestureMode::Move, Point::new(10.0, 10.0), &g));
        assert!(!ctrl.begin(GestureMode::Move, Point::new(10.0, 10.0), &g));
        ctrl.pointer_move(Point::new(20.0, 30.0), &g);
        assert!(ctrl.end(&g).is_some());

        assert!(ctrl.begin(GestureMode::ResizeLeft, Point::new(100.0, 200.0), &g));
        assert!(ctrl.abandon());

        let seen = events.lock().expect("gesture trace lock");
        let messages: Vec<&str> = seen.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(
            messages,
            [
                "panel.gesture.begin",
                "panel.gesture.rejected",
                "panel.gesture.end",
                "panel.gesture.begin",
                "panel.gesture.abandon",
            ]
        );
        assert_eq!(seen[1].1.as_deref(), Some("already_active"));
    }
}
