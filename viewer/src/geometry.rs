//! Geometry primitives shared by the decoder, viewport, and edit session.
//!
//! Both types are plain `Copy` values. Operations return new instances; there
//! are no setters that alias one field onto another.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point in screen space, world space, or atlas pixel space.
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

    /// Component-wise floor.
    #[must_use]
    pub fn floor(self) -> Self {
        Self { x: self.x.floor(), y: self.y.floor() }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Axis-aligned rectangle stored as two corners.
///
/// `(x, y)` is the top-left corner and `(u, v)` the bottom-right corner. The
/// width and height are derived and may come out negative for boxes built by
/// intermediate math; only boxes with a positive [`area`](Self::area) are
/// drawn or hit-tested.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub u: f64,
    pub v: f64,
}

impl BBox {
    #[must_use]
    pub fn new(x: f64, y: f64, u: f64, v: f64) -> Self {
        Self { x, y, u, v }
    }

    /// Build a box from its top-left and bottom-right corners.
    #[must_use]
    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self { x: top_left.x, y: top_left.y, u: bottom_right.x, v: bottom_right.y }
    }

    /// Build a box from its top-left corner and a size.
    #[must_use]
    pub fn from_origin_and_size(origin: Point, width: f64, height: f64) -> Self {
        Self { x: origin.x, y: origin.y, u: origin.x + width, v: origin.y + height }
    }

    /// Smallest box enclosing every point, or `None` for an empty set.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bbox = Self::from_corners(*first, *first);
        for p in rest {
            bbox.x = bbox.x.min(p.x);
            bbox.y = bbox.y.min(p.y);
            bbox.u = bbox.u.max(p.x);
            bbox.v = bbox.v.max(p.y);
        }
        Some(bbox)
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Bottom-right corner.
    #[must_use]
    pub fn corner(&self) -> Point {
        Point::new(self.u, self.v)
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.u - self.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.v - self.y
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether the box has no positive width or height. Inverted boxes are
    /// empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Length of the diagonal between the two corners.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.origin().distance(self.corner())
    }

    #[must_use]
    pub fn midpoint(&self) -> Point {
        Point::new((self.x + self.u) / 2.0, (self.y + self.v) / 2.0)
    }

    /// Half-open containment: the top and left edges are inside, the bottom
    /// and right edges are not.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.x <= pt.x && pt.x < self.u && self.y <= pt.y && pt.y < self.v
    }

    /// The same box moved by `by` on both corners.
    #[must_use]
    pub fn translate(&self, by: Point) -> Self {
        Self::from_corners(self.origin() + by, self.corner() + by)
    }

    /// Component-wise floor of all four coordinates.
    #[must_use]
    pub fn floor(&self) -> Self {
        Self::from_corners(self.origin().floor(), self.corner().floor())
    }
}
