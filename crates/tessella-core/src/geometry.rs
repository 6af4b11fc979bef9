#![forbid(unsafe_code)]

//! Geometric primitives for partition layouts.

use std::f64::consts::FRAC_PI_2;

/// A point in canvas coordinates (origin at center for radial layouts,
/// top-left for rectangular ones; y axis pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from the origin, `angle` radians clockwise from
    /// 12 o'clock.
    #[inline]
    #[must_use]
    pub fn from_polar(angle: f64, radius: f64) -> Self {
        Self {
            x: (angle - FRAC_PI_2).cos() * radius,
            y: (angle - FRAC_PI_2).sin() * radius,
        }
    }
}

/// An axis-aligned rectangle stored as edges.
///
/// Edges rather than origin + size, so subdivision can carve exact spans
/// without accumulating size drift. Invariant: `x0 <= x1`, `y0 <= y1`;
/// constructors and insets collapse degenerate extents instead of crossing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RectF {
    /// Left edge.
    pub x0: f64,
    /// Top edge.
    pub y0: f64,
    /// Right edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
}

impl RectF {
    /// Create a new rectangle from its edges.
    #[inline]
    #[must_use]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Create a rectangle from origin with the given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Width; never negative.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).max(0.0)
    }

    /// Height; never negative.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).max(0.0)
    }

    /// Area in square canvas units.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if a point is inside the rectangle (left/top edges inclusive,
    /// right/bottom exclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x < self.x1 && p.y >= self.y0 && p.y < self.y1
    }

    /// Compute the overlap with another rectangle, `None` if disjoint.
    ///
    /// Shared edges do not count as overlap.
    #[must_use]
    pub fn intersection_opt(&self, other: &RectF) -> Option<RectF> {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);

        if x0 < x1 && y0 < y1 {
            Some(RectF::new(x0, y0, x1, y1))
        } else {
            None
        }
    }

    /// Shrink by the given insets, collapsing each axis to its midpoint
    /// when the insets meet or cross.
    #[must_use]
    pub fn inset(&self, insets: Insets) -> RectF {
        let mut x0 = self.x0 + insets.left;
        let mut y0 = self.y0 + insets.top;
        let mut x1 = self.x1 - insets.right;
        let mut y1 = self.y1 - insets.bottom;

        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }

        RectF { x0, y0, x1, y1 }
    }

    /// Round every edge to the nearest whole canvas unit.
    #[must_use]
    pub fn round(&self) -> RectF {
        let x0 = self.x0.round();
        let y0 = self.y0.round();
        RectF::new(x0, y0, self.x1.round().max(x0), self.y1.round().max(y0))
    }
}

/// Per-side insets for padding and header bands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    /// Equal insets on all sides.
    #[must_use]
    pub const fn all(val: f64) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Explicit insets per side.
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    #[must_use]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    #[must_use]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

/// An annular sector: the radial analog of a rectangle.
///
/// Angles are radians clockwise from 12 o'clock; `a0 <= a1`, `r0 <= r1`.
/// A full turn is `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcBand {
    /// Start angle.
    pub a0: f64,
    /// End angle.
    pub a1: f64,
    /// Inner radius.
    pub r0: f64,
    /// Outer radius.
    pub r1: f64,
}

impl ArcBand {
    /// Create a new annular sector.
    #[inline]
    #[must_use]
    pub const fn new(a0: f64, a1: f64, r0: f64, r1: f64) -> Self {
        Self { a0, a1, r0, r1 }
    }

    /// Angular span in radians; never negative.
    #[inline]
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.a1 - self.a0).max(0.0)
    }

    /// Radial thickness; never negative.
    #[inline]
    #[must_use]
    pub fn thickness(&self) -> f64 {
        (self.r1 - self.r0).max(0.0)
    }

    /// Angle halfway through the sector.
    #[inline]
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.a0 + self.a1) / 2.0
    }

    /// Radius halfway through the band.
    #[inline]
    #[must_use]
    pub fn mid_radius(&self) -> f64 {
        (self.r0 + self.r1) / 2.0
    }

    /// Arc length along the band's middle radius.
    #[inline]
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.span() * self.mid_radius()
    }

    /// Area of the sector.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.span() / 2.0 * (self.r1 * self.r1 - self.r0 * self.r0).max(0.0)
    }

    /// Check if the sector has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span() == 0.0 || self.thickness() == 0.0 || self.r1 == 0.0
    }

    /// Midpoint of the band in canvas coordinates.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point {
        Point::from_polar(self.mid_angle(), self.mid_radius())
    }

    /// Midpoint of the outer edge in canvas coordinates.
    #[inline]
    #[must_use]
    pub fn outer_midpoint(&self) -> Point {
        Point::from_polar(self.mid_angle(), self.r1)
    }

    /// Check if two sectors on the same band overlap angularly.
    ///
    /// Shared boundary angles do not count as overlap.
    #[must_use]
    pub fn overlaps_angle(&self, other: &ArcBand) -> bool {
        self.a0.max(other.a0) < self.a1.min(other.a1)
    }
}

/// Geometry allotted to one node by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frame {
    /// Rectangular tile.
    Rect(RectF),
    /// Annular sector.
    Arc(ArcBand),
}

impl Frame {
    /// Area of the underlying shape.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Frame::Rect(r) => r.area(),
            Frame::Arc(a) => a.area(),
        }
    }

    /// Check if the frame has zero area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Frame::Rect(r) => r.is_empty(),
            Frame::Arc(a) => a.is_empty(),
        }
    }

    /// Visual center of the frame.
    #[must_use]
    pub fn centroid(&self) -> Point {
        match self {
            Frame::Rect(r) => r.center(),
            Frame::Arc(a) => a.centroid(),
        }
    }

    /// Round rectangle edges to whole canvas units. Sectors pass through
    /// unchanged; angles are not pixel-aligned quantities.
    #[must_use]
    pub fn round(&self) -> Frame {
        match self {
            Frame::Rect(r) => Frame::Rect(r.round()),
            Frame::Arc(a) => Frame::Arc(*a),
        }
    }

    /// The rectangle, if this frame is rectangular.
    #[inline]
    #[must_use]
    pub const fn as_rect(&self) -> Option<&RectF> {
        match self {
            Frame::Rect(r) => Some(r),
            Frame::Arc(_) => None,
        }
    }

    /// The sector, if this frame is radial.
    #[inline]
    #[must_use]
    pub const fn as_arc(&self) -> Option<&ArcBand> {
        match self {
            Frame::Rect(_) => None,
            Frame::Arc(a) => Some(a),
        }
    }
}
