//! Planar coordinate and orientation primitives shared by the graph store,
//! the sensor engine, and the agent runtime.
//!
//! Coordinates are Euclidean `(x, y)` pairs (spec's node/edge positions are
//! "real" numbers on a plane, not geographic lat/lon), stored as `f64` since
//! nothing here is bulk-array-indexed the way a dense per-agent table would be
//! geography was.

use std::fmt;

/// A point in the plane. Used for node positions and polyline vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    /// Bearing of `other` as seen from `self`, in radians, via `atan2`.
    #[inline]
    pub fn bearing_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A unit-scale 2-vector used for orientation. Not normalized by
/// construction — `(0,0)` is a valid, meaningful value ("no orientation").
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Default sensor orientation: unit vector along +x.
    pub const UNIT_X: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn from_points(from: Point, to: Point) -> Self {
        Self {
            x: to.x - from.x,
            y: to.y - from.y,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Return the unit vector in this direction, or `ZERO` if degenerate.
    #[inline]
    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            Vec2::ZERO
        } else {
            Vec2::new(self.x / len, self.y / len)
        }
    }

    /// Complex-number product `self * other`, used to compose a sensor's
    /// configured orientation with its owner's orientation: the effective
    /// orientation is the complex product of the two unit vectors.
    #[inline]
    pub fn compose(self, other: Vec2) -> Vec2 {
        Vec2::new(
            self.x * other.x - self.y * other.y,
            self.x * other.y + self.y * other.x,
        )
    }

    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Normalize an angle into `(-π, π]`.
#[inline]
pub fn normalize_angle(mut theta: f64) -> f64 {
    use std::f64::consts::PI;
    theta %= 2.0 * PI;
    if theta > PI {
        theta -= 2.0 * PI;
    } else if theta <= -PI {
        theta += 2.0 * PI;
    }
    theta
}
