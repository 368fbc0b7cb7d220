//! Property-based laws for the gesture controller.
//!
//! 1. Consecutive right-resizes accumulate: width_N = max(width_{N-1} + Δ_N, min)
//! 2. A left-resize preserves the right edge
//! 3. A top-resize preserves the bottom edge
//! 4. A second `begin` without `end` leaves the active mode untouched
//! 5. Displayed geometry at the last move equals the committed result
//! 6. No sequence of gestures leaves a viewport listener behind

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use fpanel_core::geometry::{Geometry, Height, PanelSize, Point, Size, SizeBounds};
use fpanel_core::gesture::{GestureConfig, GestureController, GestureMode};
use fpanel_core::host::{Host, ListenerId, MountNode};
use proptest::prelude::*;

#[derive(Default)]
struct ListenerHost {
    listeners: RefCell<BTreeSet<ListenerId>>,
}

impl Host for ListenerHost {
    fn viewport(&self) -> Size {
        Size::new(1920.0, 1080.0)
    }
    fn measure_content(&self, _: &str) -> Option<Size> {
        None
    }
    fn set_text_selection(&self, _: bool) {}
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

fn controller() -> (Rc<ListenerHost>, GestureController) {
    let host = Rc::new(ListenerHost::default());
    let ctrl = GestureController::new(host.clone(), GestureConfig::default());
    (host, ctrl)
}

fn geometry(x: f64, y: f64, w: f64, h: f64) -> Geometry {
    Geometry::new(Point::new(x, y), PanelSize::new(w, Height::Fixed(h)))
}

fn run(ctrl: &mut GestureController, g: &Geometry, mode: GestureMode, from: Point, to: Point) -> Geometry {
    assert!(ctrl.begin(mode, from, g));
    ctrl.pointer_move(to, g);
    let commit = ctrl.end(g).expect("gesture was active");
    ctrl.release_moved_latch(commit.sequence);
    commit.geometry
}

fn mode_strategy() -> impl Strategy<Value = GestureMode> {
    prop_oneof![
        Just(GestureMode::Move),
        Just(GestureMode::ResizeTop),
        Just(GestureMode::ResizeBottom),
        Just(GestureMode::ResizeLeft),
        Just(GestureMode::ResizeRight),
    ]
}

proptest! {
    #[test]
    fn right_resizes_accumulate(
        start_width in 50.0f64..1200.0,
        deltas in prop::collection::vec(-600.0f64..600.0, 1..8),
    ) {
        let (_host, mut ctrl) = controller();
        let min = SizeBounds::default().min_width;
        let mut g = geometry(40.0, 40.0, start_width, 300.0);
        for d in deltas {
            let before = g.size.width;
            g = run(&mut ctrl, &g, GestureMode::ResizeRight, Point::new(500.0, 10.0), Point::new(500.0 + d, 10.0));
            prop_assert!((g.size.width - (before + d).max(min)).abs() < 1e-9);
            prop_assert_eq!(g.position, Point::new(40.0, 40.0));
        }
    }

    #[test]
    fn left_resize_preserves_right_edge(
        x in -500.0f64..500.0,
        width in 50.0f64..1200.0,
        d in -1500.0f64..1500.0,
    ) {
        let (_host, mut ctrl) = controller();
        let g = geometry(x, 10.0, width, 200.0);
        let out = run(&mut ctrl, &g, GestureMode::ResizeLeft, Point::new(x, 50.0), Point::new(x + d, 50.0));
        prop_assert!((out.right() - g.right()).abs() < 1e-9);
        prop_assert!(out.size.width >= SizeBounds::default().min_width);
    }

    #[test]
    fn top_resize_preserves_bottom_edge(
        y in -500.0f64..500.0,
        height in 50.0f64..900.0,
        d in -1200.0f64..1200.0,
    ) {
        let (_host, mut ctrl) = controller();
        let g = geometry(10.0, y, 300.0, height);
        let out = run(&mut ctrl, &g, GestureMode::ResizeTop, Point::new(20.0, y), Point::new(20.0, y + d));
        let (Some(before), Some(after)) = (g.bottom(), out.bottom()) else {
            return Err(TestCaseError::fail("height must stay numeric"));
        };
        prop_assert!((after - before).abs() < 1e-9);
    }

    #[test]
    fn second_begin_keeps_first_mode(first in mode_strategy(), second in mode_strategy()) {
        let (host, mut ctrl) = controller();
        let g = geometry(100.0, 100.0, 400.0, 300.0);
        prop_assert!(ctrl.begin(first, Point::new(1.0, 1.0), &g));
        prop_assert!(!ctrl.begin(second, Point::new(9.0, 9.0), &g));
        prop_assert_eq!(ctrl.mode(), Some(first));
        prop_assert_eq!(host.listeners.borrow().len(), 1);
    }

    #[test]
    fn display_matches_commit(
        mode in mode_strategy(),
        moves in prop::collection::vec((-400.0f64..400.0, -400.0f64..400.0), 1..12),
    ) {
        let (_host, mut ctrl) = controller();
        let g = geometry(300.0, 200.0, 400.0, 300.0);
        ctrl.begin(mode, Point::new(300.0, 200.0), &g);
        for (dx, dy) in moves {
            ctrl.pointer_move(Point::new(300.0 + dx, 200.0 + dy), &g);
        }
        let shown = ctrl.display(&g);
        let committed = ctrl.end(&g).expect("active").geometry;
        prop_assert_eq!(shown, committed);
        prop_assert_eq!(ctrl.display(&committed), committed);
    }

    #[test]
    fn no_listener_survives(
        ops in prop::collection::vec((mode_strategy(), 0u8..4), 0..40),
    ) {
        let (host, mut ctrl) = controller();
        let mut g = geometry(100.0, 100.0, 400.0, 300.0);
        for (mode, op) in ops {
            match op {
                0 => { ctrl.begin(mode, Point::new(150.0, 150.0), &g); }
                1 => { ctrl.pointer_move(Point::new(180.0, 120.0), &g); }
                2 => {
                    if let Some(commit) = ctrl.end(&g) {
                        g = commit.geometry;
                    }
                }
                _ => { ctrl.abandon(); }
            }
            prop_assert_eq!(host.listeners.borrow().len(), usize::from(ctrl.is_active()));
        }
        drop(ctrl);
        prop_assert!(host.listeners.borrow().is_empty());
    }
}
