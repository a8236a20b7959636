use std::ops::{Add, Div, Mul, Neg, Sub};

use ultraviolet::DVec2;

/// A 2D vector with both Cartesian and polar views.
///
/// Vectors are plain values: every operation returns a new vector and never
/// mutates the receiver.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector2D(DVec2);

impl Default for Vector2D {
    fn default() -> Self {
        Self::zero()
    }
}

impl Vector2D {
    /// Creates a vector from Cartesian components.
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn zero() -> Self {
        Self(DVec2::zero())
    }

    /// Creates a vector from a magnitude and a direction in radians.
    /// A negative magnitude points the opposite way.
    pub fn from_polar(magnitude: f64, direction: f64) -> Self {
        let (sin, cos) = direction.sin_cos();
        Self::new(magnitude * cos, magnitude * sin)
    }

    pub fn x(self) -> f64 {
        self.0.x
    }

    pub fn y(self) -> f64 {
        self.0.y
    }

    /// Euclidean length, `sqrt(x² + y²)`.
    pub fn magnitude(self) -> f64 {
        self.0.mag()
    }

    /// Angle from the positive x axis, `atan2(y, x)`. Zero for the zero vector.
    pub fn direction(self) -> f64 {
        self.0.y.atan2(self.0.x)
    }

    /// Same direction, new magnitude.
    pub fn with_magnitude(self, magnitude: f64) -> Self {
        Self::from_polar(magnitude, self.direction())
    }

    /// Same magnitude, new direction.
    pub fn with_direction(self, direction: f64) -> Self {
        Self::from_polar(self.magnitude(), direction)
    }

    pub fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    pub fn subtract(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }

    /// Multiplies both components by `k`. Negative factors reflect through the origin.
    pub fn scale(self, k: f64) -> Self {
        Self(self.0 * k)
    }

    pub fn divide(self, k: f64) -> Self {
        self.scale(1.0 / k)
    }

    /// Reflection through the origin.
    pub fn inverse(self) -> Self {
        Self(-self.0)
    }

    pub fn distance_to(self, other: Self) -> f64 {
        (other.0 - self.0).mag()
    }

    /// Angle of the ray from `self` toward `other`, `atan2(Δy, Δx)`.
    pub fn bearing_to(self, other: Self) -> f64 {
        let d = other.0 - self.0;
        d.y.atan2(d.x)
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        v.0
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2D::add(self, rhs)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        self.inverse()
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        self.scale(k)
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, k: f64) -> Self {
        self.divide(k)
    }
}
