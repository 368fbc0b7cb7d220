#![forbid(unsafe_code)]

//! Shared panel context (the page-level provider).
//!
//! One [`PanelContext`] exists per page session. Panels receive it as
//! `Rc<PanelContext>` and go through it for every shared concern: the
//! registry, the mount surface, and the host. After each registry update the
//! context re-derives `backdrop_active` and forwards changes to
//! [`Host::set_scroll_locked`].
//!
//! All mutation is synchronous and single-threaded; `RefCell` borrows never
//! escape a method.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use fpanel_core::config::{ConfigError, PanelConfig};
use fpanel_core::host::{Host, MountNode};

use crate::mount::MountSurface;
use crate::registry::{PanelId, PanelRegistry, PanelStatus, RegistryChange};

/// Page-level state shared by all panels.
pub struct PanelContext {
    host: Rc<dyn Host>,
    config: PanelConfig,
    registry: RefCell<PanelRegistry>,
    mount: RefCell<MountSurface>,
    scroll_locked: Cell<bool>,
}

impl fmt::Debug for PanelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelContext")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("scroll_locked", &self.scroll_locked.get())
            .finish()
    }
}

impl PanelContext {
    /// Create a context after validating `config`.
    pub fn new(host: Rc<dyn Host>, config: PanelConfig) -> Result<Rc<Self>, ConfigError> {
        config.validate()?;
        Ok(Self::build(host, config))
    }

    /// Create a context with the default configuration.
    pub fn with_defaults(host: Rc<dyn Host>) -> Rc<Self> {
        Self::build(host, PanelConfig::default())
    }

    fn build(host: Rc<dyn Host>, config: PanelConfig) -> Rc<Self> {
        Rc::new(Self {
            host,
            config,
            registry: RefCell::new(PanelRegistry::new()),
            mount: RefCell::new(MountSurface::new()),
            scroll_locked: Cell::new(false),
        })
    }

    #[inline]
    pub fn host(&self) -> &Rc<dyn Host> {
        &self.host
    }

    #[inline]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Upsert `id`'s status and re-sync the page scroll lock.
    pub fn register(&self, id: &PanelId, status: PanelStatus) -> RegistryChange {
        let change = self.registry.borrow_mut().register(id, status);
        #[cfg(feature = "tracing")]
        if change.any() {
            tracing::trace!(
                message = "panel.registry.update",
                id = id.as_str(),
                open = status.open,
                rolled = status.rolled,
                wants_backdrop = status.wants_backdrop
            );
        }
        self.sync_scroll_lock();
        change
    }

    /// Remove `id` and re-sync the page scroll lock.
    pub fn unregister(&self, id: &str) -> RegistryChange {
        let change = self.registry.borrow_mut().unregister(id);
        self.sync_scroll_lock();
        change
    }

    /// Open panels in strip order.
    pub fn open_panel_ids(&self) -> Vec<PanelId> {
        self.registry.borrow().open_panel_ids().to_vec()
    }

    pub fn backdrop_active(&self) -> bool {
        self.registry.borrow().backdrop_active()
    }

    /// Strip offset of `id` in pixels.
    pub fn strip_offset(&self, id: &str) -> f64 {
        self.registry
            .borrow()
            .strip_offset(id, self.config.strip_unit_width)
    }

    pub fn status(&self, id: &str) -> Option<PanelStatus> {
        self.registry.borrow().status(id)
    }

    /// Whether the context currently holds the page scroll lock.
    #[inline]
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    /// The shared mount node, created on first request.
    pub fn mount_node(&self) -> MountNode {
        self.mount
            .borrow_mut()
            .get_or_create_mount_node(self.host.as_ref())
    }

    pub fn mount_has_children(&self) -> bool {
        self.mount.borrow().has_children()
    }

    pub(crate) fn attach(&self, id: &PanelId) {
        self.mount.borrow_mut().attach(id, self.host.as_ref());
    }

    pub(crate) fn detach(&self, id: &str) {
        self.mount.borrow_mut().detach(id, self.host.as_ref());
    }

    fn sync_scroll_lock(&self) {
        let active = self.backdrop_active();
        if active != self.scroll_locked.get() {
            self.scroll_locked.set(active);
            self.host.set_scroll_locked(active);
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "panel.scroll_lock", locked = active);
        }
    }
}

impl Drop for PanelContext {
    fn drop(&mut self) {
        if self.scroll_locked.get() {
            self.host.set_scroll_locked(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpanel_core::host::{HostCall, RecordingHost};

    #[test]
    fn scroll_lock_follows_backdrop() {
        let host = Rc::new(RecordingHost::default());
        let ctx = PanelContext::with_defaults(host.clone());
        let a = PanelId::from("a");

        ctx.register(&a, PanelStatus::new(true, false, true));
        assert!(host.scroll_locked());
        ctx.register(&a, PanelStatus::new(true, false, true));
        ctx.register(&a, PanelStatus::new(true, true, true));
        assert!(!host.scroll_locked());
        assert_eq!(host.count(|c| matches!(c, HostCall::ScrollLocked(_))), 2);
    }

    #[test]
    fn drop_releases_lock() {
        let host = Rc::new(RecordingHost::default());
        let ctx = PanelContext::with_defaults(host.clone());
        ctx.register(&PanelId::from("a"), PanelStatus::new(true, false, true));
        drop(ctx);
        assert!(!host.scroll_locked());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let host = Rc::new(RecordingHost::default());
        let config = PanelConfig {
            strip_unit_width: -1.0,
            ..PanelConfig::default()
        };
        assert!(PanelContext::new(host, config).is_err());
    }

    #[test]
    fn strip_offset_uses_configured_unit() {
        let host = Rc::new(RecordingHost::default());
        let config = PanelConfig {
            strip_unit_width: 120.0,
            ..PanelConfig::default()
        };
        let ctx = PanelContext::new(host, config).expect("valid config");
        for id in ["a", "b"] {
            ctx.register(&id.into(), PanelStatus::new(true, false, false));
        }
        assert_eq!(ctx.strip_offset("b"), 120.0);
    }
}
