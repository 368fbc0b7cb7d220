#![forbid(unsafe_code)]

//! Shared registry of panels on one page.
//!
//! Independent panel instances never reference each other. Each one upserts
//! its own [`PanelStatus`] here, and reads back the derived shared state:
//! its slot in the rolled-panel strip and whether any panel currently needs a
//! backdrop (which locks page scrolling).
//!
//! # Invariants
//!
//! 1. A panel id appears at most once in [`PanelRegistry::open_panel_ids`].
//! 2. Open order is first-registered-first; closing a panel closes the gap.
//! 3. `backdrop_active()` is true iff some registered panel is open, unrolled,
//!    and wants a backdrop.
//! 4. Updates are last-write-wins per id.

use std::borrow::Borrow;
use std::fmt;

use ahash::{AHashMap, AHashSet};

/// Identifier of one panel instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PanelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for PanelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The three facts a panel publishes about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelStatus {
    pub open: bool,
    pub rolled: bool,
    pub wants_backdrop: bool,
}

impl PanelStatus {
    #[inline]
    pub const fn new(open: bool, rolled: bool, wants_backdrop: bool) -> Self {
        Self {
            open,
            rolled,
            wants_backdrop,
        }
    }

    /// Open, unrolled, and asking for a backdrop.
    #[inline]
    pub const fn needs_backdrop(self) -> bool {
        self.open && !self.rolled && self.wants_backdrop
    }
}

/// What a registry update changed in the derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryChange {
    pub order_changed: bool,
    pub backdrop_changed: bool,
}

impl RegistryChange {
    #[inline]
    pub const fn any(self) -> bool {
        self.order_changed || self.backdrop_changed
    }
}

/// Page-wide panel registry.
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    statuses: AHashMap<PanelId, PanelStatus>,
    open_order: Vec<PanelId>,
    needing_backdrop: AHashSet<PanelId>,
    revision: u64,
}

impl PanelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent upsert of `id`'s status.
    pub fn register(&mut self, id: &PanelId, status: PanelStatus) -> RegistryChange {
        let was_active = self.backdrop_active();
        let mut change = RegistryChange::default();

        let listed = self.open_order.iter().position(|open| open == id);
        match (status.open, listed) {
            (true, None) => {
                self.open_order.push(id.clone());
                change.order_changed = true;
            }
            (false, Some(idx)) => {
                self.open_order.remove(idx);
                change.order_changed = true;
            }
            _ => {}
        }

        if status.needs_backdrop() {
            self.needing_backdrop.insert(id.clone());
        } else {
            self.needing_backdrop.remove(id.as_str());
        }
        change.backdrop_changed = was_active != self.backdrop_active();

        self.statuses.insert(id.clone(), status);
        if change.any() {
            self.revision = self.revision.wrapping_add(1);
        }
        change
    }

    /// Remove every trace of `id`.
    pub fn unregister(&mut self, id: &str) -> RegistryChange {
        let was_active = self.backdrop_active();
        let mut change = RegistryChange::default();

        self.statuses.remove(id);
        if let Some(idx) = self.open_order.iter().position(|open| open.as_str() == id) {
            self.open_order.remove(idx);
            change.order_changed = true;
        }
        self.needing_backdrop.remove(id);
        change.backdrop_changed = was_active != self.backdrop_active();

        if change.any() {
            self.revision = self.revision.wrapping_add(1);
        }
        change
    }

    /// Open panels in strip order.
    #[inline]
    pub fn open_panel_ids(&self) -> &[PanelId] {
        &self.open_order
    }

    /// Whether any panel needs a backdrop (page scroll must be locked).
    #[inline]
    pub fn backdrop_active(&self) -> bool {
        !self.needing_backdrop.is_empty()
    }

    /// Strip slot of `id`; unknown or closed panels report slot 0.
    pub fn strip_index(&self, id: &str) -> usize {
        self.open_order
            .iter()
            .position(|open| open.as_str() == id)
            .unwrap_or(0)
    }

    /// Horizontal strip offset of `id`.
    #[inline]
    pub fn strip_offset(&self, id: &str, unit_width: f64) -> f64 {
        self.strip_index(id) as f64 * unit_width
    }

    pub fn status(&self, id: &str) -> Option<PanelStatus> {
        self.statuses.get(id).copied()
    }

    /// Counter bumped whenever derived state changes.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: PanelStatus = PanelStatus::new(true, false, true);
    const UNIT: f64 = 200.0;

    fn ids(reg: &PanelRegistry) -> Vec<&str> {
        reg.open_panel_ids().iter().map(PanelId::as_str).collect()
    }

    #[test]
    fn strip_offsets_close_gaps() {
        let mut reg = PanelRegistry::new();
        for id in ["a", "b", "c"] {
            reg.register(&id.into(), OPEN);
        }
        assert_eq!(reg.strip_offset("c", UNIT), 2.0 * UNIT);
        reg.unregister("b");
        assert_eq!(ids(&reg), vec!["a", "c"]);
        assert_eq!(reg.strip_offset("c", UNIT), UNIT);
    }

    #[test]
    fn register_is_idempotent() {
        let mut reg = PanelRegistry::new();
        let a = PanelId::from("a");
        assert!(reg.register(&a, OPEN).any());
        let rev = reg.revision();
        assert!(!reg.register(&a, OPEN).any());
        assert_eq!(reg.revision(), rev);
        assert_eq!(ids(&reg), vec!["a"]);
    }

    #[test]
    fn closing_removes_from_order_and_reopen_appends() {
        let mut reg = PanelRegistry::new();
        let (a, b) = (PanelId::from("a"), PanelId::from("b"));
        reg.register(&a, OPEN);
        reg.register(&b, OPEN);
        reg.register(&a, PanelStatus::new(false, false, true));
        assert_eq!(ids(&reg), vec!["b"]);
        reg.register(&a, OPEN);
        assert_eq!(ids(&reg), vec!["b", "a"]);
    }

    #[test]
    fn backdrop_follows_sole_requester() {
        let mut reg = PanelRegistry::new();
        let (a, b) = (PanelId::from("a"), PanelId::from("b"));
        reg.register(&a, OPEN);
        reg.register(&b, PanelStatus::new(true, false, false));
        assert!(reg.backdrop_active());

        let change = reg.register(&a, PanelStatus::new(true, false, false));
        assert!(change.backdrop_changed);
        assert!(!change.order_changed);
        assert!(!reg.backdrop_active());
    }

    #[test]
    fn rolled_or_closed_panels_do_not_need_backdrop() {
        let mut reg = PanelRegistry::new();
        let a = PanelId::from("a");
        reg.register(&a, PanelStatus::new(true, true, true));
        assert!(!reg.backdrop_active());
        reg.register(&a, PanelStatus::new(false, false, true));
        assert!(!reg.backdrop_active());
        reg.register(&a, OPEN);
        assert!(reg.backdrop_active());
        reg.unregister("a");
        assert!(!reg.backdrop_active());
        assert!(reg.is_empty());
    }

    #[test]
    fn unknown_panel_reports_slot_zero() {
        let reg = PanelRegistry::new();
        assert_eq!(reg.strip_index("missing"), 0);
    }
}
