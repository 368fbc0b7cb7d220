#![forbid(unsafe_code)]

//! Geometric primitives for floating panels.
//!
//! All coordinates are page pixels (`f64`, origin at the top-left of the
//! viewport). A panel's committed [`Geometry`] is owned by exactly one panel
//! instance and only changes through [`Geometry::commit`] or the auto-height
//! resolution step.
//!
//! # Invariants
//!
//! - Committed width and numeric height never drop below [`SizeBounds`].
//! - `Height::Auto` is replaced at most once by a measured value; a numeric
//!   height is never overwritten by measurement.
//! - Position `{0, 0}` means "not yet placed".

/// Default panel width in pixels.
pub const DEFAULT_PANEL_WIDTH: f64 = 500.0;

/// Minimum width/height a resize may shrink a panel to.
pub const MIN_PANEL_EXTENT: f64 = 50.0;

/// A point in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The page origin.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset between `self` (origin) and `other`.
    #[inline]
    pub fn delta_to(self, other: Point) -> Delta {
        Delta::new(other.x - self.x, other.y - self.y)
    }

    /// Translate by a delta.
    #[inline]
    pub fn offset(self, delta: Delta) -> Self {
        Self::new(self.x + delta.dx, self.y + delta.dy)
    }
}

/// A pointer offset accumulated during a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[inline]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// A width/height pair (viewport or measured content).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Panel height: measured from content once, then numeric.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Height {
    /// Not yet measured; the rendered content decides.
    #[default]
    Auto,
    /// Fixed height in pixels.
    Fixed(f64),
}

impl Height {
    /// Numeric height, if resolved.
    #[inline]
    pub fn fixed(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Fixed(h) => Some(h),
        }
    }

    #[inline]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Panel size; width is always numeric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSize {
    pub width: f64,
    pub height: Height,
}

impl PanelSize {
    #[inline]
    pub const fn new(width: f64, height: Height) -> Self {
        Self { width, height }
    }
}

impl Default for PanelSize {
    fn default() -> Self {
        Self::new(DEFAULT_PANEL_WIDTH, Height::Auto)
    }
}

/// Lower bounds applied to every committed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    pub min_width: f64,
    pub min_height: f64,
}

impl SizeBounds {
    #[inline]
    pub const fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    #[inline]
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.max(self.min_width)
    }

    #[inline]
    pub fn clamp_height(&self, height: Height) -> Height {
        match height {
            Height::Auto => Height::Auto,
            Height::Fixed(h) => Height::Fixed(h.max(self.min_height)),
        }
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self::new(MIN_PANEL_EXTENT, MIN_PANEL_EXTENT)
    }
}

/// Partial geometry update; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryPatch {
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<Height>,
    pub rolled: Option<bool>,
}

impl GeometryPatch {
    #[must_use]
    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn height(mut self, height: Height) -> Self {
        self.height = Some(height);
        self
    }

    #[must_use]
    pub fn rolled(mut self, rolled: bool) -> Self {
        self.rolled = Some(rolled);
        self
    }
}

/// Committed geometry of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub position: Point,
    pub size: PanelSize,
    pub rolled: bool,
}

impl Geometry {
    #[inline]
    pub const fn new(position: Point, size: PanelSize) -> Self {
        Self {
            position,
            size,
            rolled: false,
        }
    }

    /// Pure merge of `patch` into `self`, clamped to `bounds`.
    #[must_use]
    pub fn commit(&self, patch: GeometryPatch, bounds: SizeBounds) -> Geometry {
        Geometry {
            position: patch.position.unwrap_or(self.position),
            size: PanelSize {
                width: bounds.clamp_width(patch.width.unwrap_or(self.size.width)),
                height: bounds.clamp_height(patch.height.unwrap_or(self.size.height)),
            },
            rolled: patch.rolled.unwrap_or(self.rolled),
        }
    }

    /// Resolve an `Auto` height to the measured value. Numeric heights are kept.
    #[must_use]
    pub fn with_measured_height(&self, measured: f64, bounds: SizeBounds) -> Geometry {
        match self.size.height {
            Height::Auto => self.commit(
                GeometryPatch::default().height(Height::Fixed(measured)),
                bounds,
            ),
            Height::Fixed(_) => *self,
        }
    }

    /// Whether the panel has been given a position other than the placeholder.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.position != Point::ORIGIN
    }

    /// Right edge in page pixels.
    #[inline]
    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    /// Bottom edge in page pixels, once the height is numeric.
    #[inline]
    pub fn bottom(&self) -> Option<f64> {
        self.size.height.fixed().map(|h| self.position.y + h)
    }
}

/// Top-left origin that centers `content` inside `viewport`.
#[must_use]
pub fn centered_origin(viewport: Size, content: Size) -> Point {
    Point::new(
        (viewport.width - content.width) / 2.0,
        (viewport.height - content.height) / 2.0,
    )
}
