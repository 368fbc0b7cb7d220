#![forbid(unsafe_code)]

//! The single shared node every panel renders into.

use ahash::AHashSet;
use fpanel_core::host::{Host, MountNode};

use crate::registry::PanelId;

/// Lazily created mount node plus the set of panels currently rendered in it.
#[derive(Debug, Default)]
pub struct MountSurface {
    node: Option<MountNode>,
    children: AHashSet<PanelId>,
}

impl MountSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the mount node, creating it through `host` on first use.
    pub fn get_or_create_mount_node(&mut self, host: &dyn Host) -> MountNode {
        *self.node.get_or_insert_with(|| host.create_mount_node())
    }

    /// Record that `id` renders into the surface. Returns `true` when the
    /// surface went from empty to occupied.
    pub fn attach(&mut self, id: &PanelId, host: &dyn Host) -> bool {
        self.get_or_create_mount_node(host);
        let was_empty = self.children.is_empty();
        self.children.insert(id.clone());
        let flipped = was_empty && !self.children.is_empty();
        if flipped {
            host.set_mount_occupied(true);
        }
        flipped
    }

    /// Record that `id` no longer renders. Returns `true` when the surface
    /// became empty.
    pub fn detach(&mut self, id: &str, host: &dyn Host) -> bool {
        let flipped = self.children.remove(id) && self.children.is_empty();
        if flipped {
            host.set_mount_occupied(false);
        }
        flipped
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
