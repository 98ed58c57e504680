//! Geometric primitives: vectors, unit directions, radii and stage bounds.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lengths below this are treated as zero when normalizing.
pub const EPSILON: f32 = 1e-6;

/// A 2D point or displacement in stage coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `radians` (0 is +x).
    #[must_use]
    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    /// Squared length.
    #[must_use]
    pub fn length_squared(self) -> f32 {
        self.x.mul_add(self.x, self.y * self.y)
    }

    /// Length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared distance to `other`.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f32 {
        (self - other).length_squared()
    }

    /// Distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    /// Dot product.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Unit-length copy, or `None` for a (near) zero vector.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let length = self.length();
        if length <= EPSILON || !length.is_finite() {
            None
        } else {
            Some(Self::new(self.x / length, self.y / length))
        }
    }

    /// Counter-clockwise perpendicular `(-y, x)`.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Angle of the vector in radians.
    #[must_use]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Distance from this point to the segment `a`–`b`.
    #[must_use]
    pub fn distance_to_segment(self, a: Self, b: Self) -> f32 {
        let ab = b - a;
        let len_sq = ab.length_squared();
        if len_sq <= EPSILON {
            return self.distance(a);
        }
        let t = ((self - a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.distance(a + ab * t)
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// A unit-length vector.
///
/// The only ways to obtain one normalize their input, so `vector()` always
/// has length 1 (within float precision).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Direction(Vec2);

impl Direction {
    /// +x.
    pub const RIGHT: Self = Self(Vec2::new(1.0, 0.0));
    /// -x.
    pub const LEFT: Self = Self(Vec2::new(-1.0, 0.0));
    /// -y (screen up).
    pub const UP: Self = Self(Vec2::new(0.0, -1.0));
    /// +y (screen down).
    pub const DOWN: Self = Self(Vec2::new(0.0, 1.0));

    /// Normalize `vector` into a direction; `None` for a zero vector.
    #[must_use]
    pub fn from_vector(vector: Vec2) -> Option<Self> {
        vector.normalized().map(Self)
    }

    /// Direction at `radians`.
    #[must_use]
    pub fn from_angle(radians: f32) -> Self {
        Self(Vec2::from_angle(radians))
    }

    /// Direction from `from` toward `to`, if the points differ.
    #[must_use]
    pub fn between(from: Vec2, to: Vec2) -> Option<Self> {
        Self::from_vector(to - from)
    }

    /// The underlying unit vector.
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        self.0
    }

    /// Angle in radians.
    #[must_use]
    pub fn angle(self) -> f32 {
        self.0.angle()
    }

    /// Rotate counter-clockwise by `radians`.
    #[must_use]
    pub fn rotated(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        let Vec2 { x, y } = self.0;
        let rotated = Vec2::new(x.mul_add(cos, -(y * sin)), x.mul_add(sin, y * cos));
        rotated.normalized().map_or(self, Self)
    }

    /// Counter-clockwise perpendicular direction.
    #[must_use]
    pub const fn perpendicular(self) -> Self {
        Self(self.0.perpendicular())
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::RIGHT
    }
}

/// A strictly positive circle radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Radius(f32);

impl Radius {
    /// Validate a radius.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotPositive`] for zero, negative or non-finite values.
    pub fn new(value: f32) -> Result<Self, ConfigError> {
        ConfigError::require_positive("radius", value).map(Self)
    }

    /// The radius value.
    #[must_use]
    pub const fn get(self) -> f32 {
        self.0
    }
}

/// Axis-aligned stage rectangle with `right > left` and `bottom > top`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

impl Bounds {
    /// Validate and create bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] when the rectangle is empty,
    /// inverted or not finite.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Result<Self, ConfigError> {
        let finite = [left, top, right, bottom].iter().all(|v| v.is_finite());
        if !finite || right <= left || bottom <= top {
            return Err(ConfigError::InvalidBounds {
                left,
                top,
                right,
                bottom,
            });
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.left
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.top
    }

    /// Right edge.
    #[must_use]
    pub const fn right(&self) -> f32 {
        self.right
    }

    /// Bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> f32 {
        self.bottom
    }

    /// Width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    /// Top-right corner.
    #[must_use]
    pub const fn top_right(&self) -> Vec2 {
        Vec2::new(self.right, self.top)
    }

    /// Bottom-left corner.
    #[must_use]
    pub const fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.left, self.bottom)
    }

    /// Bottom-right corner.
    #[must_use]
    pub const fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.right, self.bottom)
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// Clamp `point` onto the rectangle.
    #[must_use]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.left, self.right),
            point.y.clamp(self.top, self.bottom),
        )
    }
}
