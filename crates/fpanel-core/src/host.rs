#![forbid(unsafe_code)]

//! Host surface contract.
//!
//! The engine never touches a DOM or window directly. Everything it needs
//! from the page (viewport size, content measurement, text-selection and
//! scroll suppression, global pointer listeners, the shared mount node) goes
//! through [`Host`]. Hosts are shared by every panel on a page via
//! `Rc<dyn Host>`, so all methods take `&self`.
//!
//! # Failure Modes
//!
//! - [`Host::measure_content`] returns `None` when the panel is not laid out
//!   (e.g. unmounted between pointer-down and the measurement). Callers treat
//!   that as "skip this step", never as an error.

use crate::geometry::Size;

/// Identifier for one viewport-wide pointer listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Handle to the shared node panels render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MountNode(u64);

impl MountNode {
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Page-level services consumed by panels.
pub trait Host {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Laid-out (unscaled) size of a panel's rendered content.
    fn measure_content(&self, panel_id: &str) -> Option<Size>;

    /// Enable or suppress text selection on the page.
    fn set_text_selection(&self, enabled: bool);

    /// Start delivering viewport-wide pointer-move/up events for `id`.
    fn add_viewport_listener(&self, id: ListenerId);

    /// Stop delivering viewport-wide pointer events for `id`.
    fn remove_viewport_listener(&self, id: ListenerId);

    /// Lock or unlock page scrolling.
    fn set_scroll_locked(&self, locked: bool);

    /// Create the shared mount node. Called at most once per page session.
    fn create_mount_node(&self) -> MountNode;

    /// Mark whether the mount node currently has rendered children.
    fn set_mount_occupied(&self, occupied: bool);
}

#[cfg(feature = "test-helpers")]
pub use recording::{HostCall, RecordingHost};

#[cfg(feature = "test-helpers")]
mod recording {
    use std::cell::{Cell, RefCell};
    use std::collections::{BTreeSet, HashMap};

    use super::{Host, ListenerId, MountNode};
    use crate::geometry::Size;

    /// One recorded host call.
    #[derive(Debug, Clone, PartialEq)]
    pub enum HostCall {
        TextSelection(bool),
        AddListener(ListenerId),
        RemoveListener(ListenerId),
        ScrollLocked(bool),
        CreateMountNode(MountNode),
        MountOccupied(bool),
    }

    /// In-memory host that records every side effect.
    #[derive(Debug)]
    pub struct RecordingHost {
        viewport: Cell<Size>,
        content: RefCell<HashMap<String, Size>>,
        listeners: RefCell<BTreeSet<ListenerId>>,
        calls: RefCell<Vec<HostCall>>,
        text_selection: Cell<bool>,
        scroll_locked: Cell<bool>,
        mount_occupied: Cell<bool>,
        next_node: Cell<u64>,
    }

    impl Default for RecordingHost {
        fn default() -> Self {
            Self::new(Size::new(1280.0, 800.0))
        }
    }

    impl RecordingHost {
        pub fn new(viewport: Size) -> Self {
            Self {
                viewport: Cell::new(viewport),
                content: RefCell::new(HashMap::new()),
                listeners: RefCell::new(BTreeSet::new()),
                calls: RefCell::new(Vec::new()),
                text_selection: Cell::new(true),
                scroll_locked: Cell::new(false),
                mount_occupied: Cell::new(false),
                next_node: Cell::new(1),
            }
        }

        pub fn set_viewport(&self, viewport: Size) {
            self.viewport.set(viewport);
        }

        /// Simulate a rendered content size for `panel_id`.
        pub fn set_content_size(&self, panel_id: &str, size: Size) {
            self.content.borrow_mut().insert(panel_id.to_owned(), size);
        }

        /// Simulate the panel's content disappearing from layout.
        pub fn clear_content_size(&self, panel_id: &str) {
            self.content.borrow_mut().remove(panel_id);
        }

        pub fn active_listeners(&self) -> usize {
            self.listeners.borrow().len()
        }

        pub fn text_selection_enabled(&self) -> bool {
            self.text_selection.get()
        }

        pub fn scroll_locked(&self) -> bool {
            self.scroll_locked.get()
        }

        pub fn mount_occupied(&self) -> bool {
            self.mount_occupied.get()
        }

        pub fn calls(&self) -> Vec<HostCall> {
            self.calls.borrow().clone()
        }

        pub fn count(&self, pred: impl Fn(&HostCall) -> bool) -> usize {
            self.calls.borrow().iter().filter(|c| pred(c)).count()
        }

        fn record(&self, call: HostCall) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl Host for RecordingHost {
        fn viewport(&self) -> Size {
            self.viewport.get()
        }

        fn measure_content(&self, panel_id: &str) -> Option<Size> {
            self.content.borrow().get(panel_id).copied()
        }

        fn set_text_selection(&self, enabled: bool) {
            self.text_selection.set(enabled);
            self.record(HostCall::TextSelection(enabled));
        }

        fn add_viewport_listener(&self, id: ListenerId) {
            self.listeners.borrow_mut().insert(id);
            self.record(HostCall::AddListener(id));
        }

        fn remove_viewport_listener(&self, id: ListenerId) {
            self.listeners.borrow_mut().remove(&id);
            self.record(HostCall::RemoveListener(id));
        }

        fn set_scroll_locked(&self, locked: bool) {
            self.scroll_locked.set(locked);
            self.record(HostCall::ScrollLocked(locked));
        }

        fn create_mount_node(&self) -> MountNode {
            let node = MountNode::new(self.next_node.get());
            self.next_node.set(self.next_node.get() + 1);
            self.record(HostCall::CreateMountNode(node));
            node
        }

        fn set_mount_occupied(&self, occupied: bool) {
            self.mount_occupied.set(occupied);
            self.record(HostCall::MountOccupied(occupied));
        }
    }
}
