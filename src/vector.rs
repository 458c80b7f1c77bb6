/*
 * Vector Module
 *
 * This module defines Vector2D, the 2D value type used by every other part
 * of the simulation. It has two families of operations:
 * - Mutating forms (`+=`, `-=`, `*=`, `/=`, `set_mag`, `limit`, `normalize`, `rotate`)
 *   that work in place. These are used for per-frame accumulation such as
 *   `acceleration += force`.
 * - Allocating forms (`+`, `-`, `*`, `/`, `unit`, `with_mag`, `limited`, `rotated`,
 *   `polar_offset`, ...) that leave the receiver untouched and return a new vector.
 */

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

// Magnitudes below this are treated as zero
pub const EPSILON: f32 = 1.0e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Builds a vector of length `radius` pointing along `angle` (radians).
    pub fn from_polar(radius: f32, angle: f32) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Heading of the vector in radians, in (-PI, PI].
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Angle of the vector pointing from `self` to `other`.
    pub fn angle_to(&self, other: Vector2D) -> f32 {
        (other - *self).angle()
    }

    pub fn distance(&self, other: Vector2D) -> f32 {
        (*self - other).magnitude()
    }

    pub fn dot(&self, other: Vector2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude_squared() <= EPSILON * EPSILON
    }

    // ---- mutating forms -------------------------------------------------

    /// Rescales in place to `magnitude`. A zero vector stays zero.
    pub fn set_mag(&mut self, magnitude: f32) -> &mut Self {
        let current = self.magnitude();
        if current <= EPSILON || !magnitude.is_finite() {
            *self = Self::ZERO;
        } else {
            *self *= magnitude / current;
        }
        self
    }

    /// Clamps the length to at most `max`.
    pub fn limit(&mut self, max: f32) -> &mut Self {
        let current_sq = self.magnitude_squared();
        if current_sq > max * max {
            self.set_mag(max);
        }
        self
    }

    pub fn normalize(&mut self) -> &mut Self {
        self.set_mag(1.0)
    }

    pub fn rotate(&mut self, angle: f32) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        let x = self.x * cos - self.y * sin;
        let y = self.x * sin + self.y * cos;
        self.x = x;
        self.y = y;
        self
    }

    // ---- allocating forms -----------------------------------------------

    pub fn unit(self) -> Self {
        self.with_mag(1.0)
    }

    pub fn with_mag(mut self, magnitude: f32) -> Self {
        self.set_mag(magnitude);
        self
    }

    pub fn limited(mut self, max: f32) -> Self {
        self.limit(max);
        self
    }

    pub fn rotated(mut self, angle: f32) -> Self {
        self.rotate(angle);
        self
    }

    /// The point at `radius` from `self` in direction `angle`.
    pub fn polar_offset(self, radius: f32, angle: f32) -> Self {
        self + Self::from_polar(radius, angle)
    }

    pub fn lerp(self, other: Vector2D, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Perpendicular vector rotated a quarter turn counter-clockwise.
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Component-wise clamp into the rectangle spanned by `min` and `max`.
    pub fn clamped(self, min: Vector2D, max: Vector2D) -> Self {
        Self::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }
}

impl Add for Vector2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2D {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vector2D {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f32> for Vector2D {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl DivAssign<f32> for Vector2D {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl From<(f32, f32)> for Vector2D {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}
