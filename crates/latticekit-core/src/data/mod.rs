//! Data models for LatticeKit
//!
//! Value types shared across crates: lattice site coordinates, scene-space
//! points and rectangles, and RGBA colours used by previews.

mod lattice_coord;

pub use lattice_coord::LatticeCoord;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A point in scene (canvas) space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenePoint {
    /// Horizontal position
    pub x: f64,
    /// Vertical position, growing downwards
    pub y: f64,
}

impl ScenePoint {
    /// The scene origin
    pub const ORIGIN: ScenePoint = ScenePoint { x: 0.0, y: 0.0 };

    /// Create a new scene point
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(
            x.is_finite() && y.is_finite(),
            "ScenePoint must be finite: x={x}, y={y}"
        );
        Self { x, y }
    }

    /// Sum of the absolute values of both components
    pub fn manhattan_length(&self) -> f64 {
        self.x.abs() + self.y.abs()
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &ScenePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Component-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &ScenePoint, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add for ScenePoint {
    type Output = ScenePoint;

    fn add(self, rhs: ScenePoint) -> ScenePoint {
        ScenePoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for ScenePoint {
    fn add_assign(&mut self, rhs: ScenePoint) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for ScenePoint {
    type Output = ScenePoint;

    fn sub(self, rhs: ScenePoint) -> ScenePoint {
        ScenePoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for ScenePoint {
    fn sub_assign(&mut self, rhs: ScenePoint) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for ScenePoint {
    type Output = ScenePoint;

    fn neg(self) -> ScenePoint {
        ScenePoint::new(-self.x, -self.y)
    }
}

impl fmt::Display for ScenePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Axis-aligned rectangle in scene space
///
/// `min` is the top-left corner, `max` the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneRect {
    pub min: ScenePoint,
    pub max: ScenePoint,
}

impl SceneRect {
    /// Create a rectangle from a top-left corner and a size
    pub fn new(top_left: ScenePoint, width: f64, height: f64) -> Self {
        Self {
            min: top_left,
            max: ScenePoint::new(top_left.x + width, top_left.y + height),
        }
    }

    /// Create a rectangle of the given size centred on `center`
    pub fn centered(center: ScenePoint, width: f64, height: f64) -> Self {
        Self::new(
            ScenePoint::new(center.x - 0.5 * width, center.y - 0.5 * height),
            width,
            height,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Geometric centre
    pub fn center(&self) -> ScenePoint {
        ScenePoint::new(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }

    /// Smallest rectangle enclosing both
    pub fn union(&self, other: &SceneRect) -> SceneRect {
        SceneRect {
            min: ScenePoint::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: ScenePoint::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Same rectangle shifted by `delta`
    pub fn translated(&self, delta: ScenePoint) -> SceneRect {
        SceneRect {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    pub fn contains(&self, p: &ScenePoint) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// 8-bit RGBA colour
///
/// Serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02x}{:02x}{:02x}{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
