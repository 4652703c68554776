//! Geometry and the display ↔ bitmap coordinate transform.
//!
//! Two coordinate systems meet on the overlay:
//!
//! - **Bitmap space**: the page's native pixel grid at render scale 1. All
//!   annotations are stored here.
//! - **Display space**: on-screen CSS pixels after the surface is stretched by
//!   layout.
//!
//! Pointer input is converted with [`client_to_bitmap`], which derives the
//! ratio from the surface's measured bounding rectangle rather than from
//! [`PageSurface::scale`], so a drifting scale can never skew hit positions.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

/// A point in either bitmap or display space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero (or negative, or NaN).
    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Axis-aligned rectangle with a top-left origin and non-negative extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Bounding box of two corner points, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }
}

/// The overlay element's on-screen bounding rectangle, as reported by
/// `getBoundingClientRect()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Native page dimensions plus the current display scale.
///
/// `width_px` / `height_px` are the page's bitmap size at render scale 1.
/// `scale` is displayed size divided by native size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSurface {
    pub width_px: f64,
    pub height_px: f64,
    pub scale: f64,
}

impl Default for PageSurface {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PageSurface {
    /// No page rendered; the overlay is inert.
    pub const ZERO: Self = Self { width_px: 0.0, height_px: 0.0, scale: 1.0 };

    /// Build a surface, clamping negative sizes to zero and falling back to
    /// scale 1 for non-positive or non-finite scales.
    ///
    /// Sizes are rounded to whole pixels to match the canvas backing store,
    /// which cannot hold a fractional row or column.
    #[must_use]
    pub fn new(width_px: f64, height_px: f64, scale: f64) -> Self {
        Self {
            width_px: width_px.max(0.0).round(),
            height_px: height_px.max(0.0).round(),
            scale: if scale.is_finite() && scale > 0.0 { scale } else { 1.0 },
        }
    }

    /// Native (bitmap) size.
    #[must_use]
    pub fn bitmap_size(&self) -> Size {
        Size::new(self.width_px, self.height_px)
    }

    /// Displayed size: bitmap size stretched by `scale`.
    #[must_use]
    pub fn display_size(&self) -> Size {
        Size::new(self.width_px * self.scale, self.height_px * self.scale)
    }

    /// Whether there is a page to annotate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bitmap_size().is_empty()
    }

    /// Same native dimensions, regardless of scale.
    #[must_use]
    pub fn same_bitmap(&self, other: &Self) -> bool {
        self.width_px == other.width_px && self.height_px == other.height_px
    }

    /// Copy of this surface displayed at a different scale.
    #[must_use]
    pub fn with_scale(&self, scale: f64) -> Self {
        Self::new(self.width_px, self.height_px, scale)
    }
}

/// Convert a client-space pointer position to bitmap space.
///
/// Returns `None` when the element has no on-screen extent, so callers drop
/// the event instead of producing non-finite coordinates.
#[must_use]
pub fn client_to_bitmap(client: Point, bounds: DisplayRect, bitmap: Size) -> Option<Point> {
    if !(bounds.width > 0.0 && bounds.height > 0.0) {
        return None;
    }
    Some(Point {
        x: (client.x - bounds.left) * (bitmap.width / bounds.width),
        y: (client.y - bounds.top) * (bitmap.height / bounds.height),
    })
}

/// Convert a bitmap-space point to display space (relative to the surface's
/// top-left corner).
#[must_use]
pub fn bitmap_to_display(bitmap: Point, scale: f64) -> Point {
    Point { x: bitmap.x * scale, y: bitmap.y * scale }
}
