#![forbid(unsafe_code)]

//! Pointer input as delivered by the host.
//!
//! The host is expected to already normalize mouse, touch and pen input into
//! page-pixel pointer coordinates; no further normalization happens here.

use crate::geometry::Point;

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed.
    Down,
    /// Pointer moved (with or without a held button).
    Move,
    /// Button released.
    Up,
    /// Synthetic click the host emits after a down/up pair on the same target.
    Click,
}

/// A pointer event in page pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub button: PointerButton,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    #[must_use]
    pub const fn click(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Click, x, y)
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Pointer coordinates.
    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
