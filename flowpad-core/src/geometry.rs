//! Shape geometry - outlines and centers derived from a node's bounding box.
//!
//! Everything here is pure and recomputed on demand; nothing is cached.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::ShapeKind;

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Displacement between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// Horizontal component.
    pub dx: f32,
    /// Vertical component.
    pub dy: f32,
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Axis-aligned bounding box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left X.
    pub x: f32,
    /// Top-left Y.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Bounds {
    /// Check if a point lies within the box, edges included.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }

    fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Midpoint of a bounding box. Identical for every shape kind.
#[must_use]
pub fn center(bounds: &Bounds) -> Point {
    Point::new(
        bounds.x + bounds.width / 2.0,
        bounds.y + bounds.height / 2.0,
    )
}

/// Outline polygon of a shape occupying `bounds`.
///
/// Rectangles yield their corners clockwise from the top-left. Diamonds yield
/// the edge midpoints in the order top, right, bottom, left.
#[must_use]
pub fn outline(kind: ShapeKind, bounds: &Bounds) -> [Point; 4] {
    let c = center(bounds);
    match kind {
        ShapeKind::Rectangle => [
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.y),
            Point::new(bounds.right(), bounds.bottom()),
            Point::new(bounds.x, bounds.bottom()),
        ],
        ShapeKind::Diamond => [
            Point::new(c.x, bounds.y),
            Point::new(bounds.right(), c.y),
            Point::new(c.x, bounds.bottom()),
            Point::new(bounds.x, c.y),
        ],
    }
}

/// Midpoint of the segment `a`-`b`.
#[must_use]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}
