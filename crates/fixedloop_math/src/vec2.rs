//! 2D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::arg::VecArg;

/// 2D Vector with x, y components
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn splat(s: f64) -> Self {
        Self { x: s, y: s }
    }

    #[inline]
    pub fn from_arg<'a>(arg: impl Into<VecArg<'a, Vec2>>) -> Self {
        arg.into().resolve()
    }

    #[inline]
    pub fn set<'a>(&mut self, arg: impl Into<VecArg<'a, Vec2>>) -> &mut Self {
        *self = arg.into().resolve();
        self
    }

    #[inline]
    pub fn copy_from(&mut self, other: &Self) -> &mut Self {
        *self = *other;
        self
    }

    /// Write `v1 + v2` into `target` (or a fresh copy of `v1`) and return the result
    pub fn sum(v1: Self, v2: Self, target: Option<&mut Self>) -> Self {
        match target {
            Some(target) => {
                target.copy_from(&v1).add_in_place(v2);
                *target
            }
            None => v1.add(v2),
        }
    }

    #[inline]
    pub fn add<'a>(self, arg: impl Into<VecArg<'a, Vec2>>) -> Self {
        let p = arg.into().resolve();
        Self::new(self.x + p.x, self.y + p.y)
    }

    #[inline]
    pub fn add_scalar(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s)
    }

    #[inline]
    pub fn add_in_place<'a>(&mut self, arg: impl Into<VecArg<'a, Vec2>>) -> &mut Self {
        let p = arg.into().resolve();
        self.x += p.x;
        self.y += p.y;
        self
    }

    #[inline]
    pub fn add_scalar_in_place(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self
    }

    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[inline]
    pub fn sub_scalar(self, s: f64) -> Self {
        Self::new(self.x - s, self.y - s)
    }

    #[inline]
    pub fn sub_in_place(&mut self, other: Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    #[inline]
    pub fn sub_scalar_in_place(&mut self, s: f64) -> &mut Self {
        self.x -= s;
        self.y -= s;
        self
    }

    /// Component-wise multiplication
    #[inline]
    pub fn multiply(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    #[inline]
    pub fn multiply_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    #[inline]
    pub fn multiply_in_place(&mut self, other: Self) -> &mut Self {
        self.x *= other.x;
        self.y *= other.y;
        self
    }

    #[inline]
    pub fn multiply_scalar_in_place(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction (non-finite for a zero vector)
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        Self::new(self.x / len, self.y / len)
    }

    #[inline]
    pub fn normalize_in_place(&mut self) -> &mut Self {
        let len = self.length();
        self.x /= len;
        self.y /= len;
        self
    }

    #[inline]
    pub fn set_length(self, s: f64) -> Self {
        self.normalize().multiply_scalar(s)
    }

    #[inline]
    pub fn set_length_in_place(&mut self, s: f64) -> &mut Self {
        self.normalize_in_place().multiply_scalar_in_place(s)
    }

    /// Clamp the length to at most `s`, in place
    #[inline]
    pub fn limit(&mut self, s: f64) -> &mut Self {
        if self.length() > s {
            self.set_length_in_place(s);
        }
        self
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl VecArg<'_, Vec2> {
    /// Resolve to a concrete vector
    pub fn resolve(&self) -> Vec2 {
        match *self {
            VecArg::Vector(v) => v,
            VecArg::Sequence(values) => Vec2::new(
                Self::sequence_component(values, 0),
                Self::sequence_component(values, 1),
            ),
            VecArg::Splat(s) => Vec2::splat(s),
        }
    }
}

impl From<Vec2> for VecArg<'_, Vec2> {
    fn from(v: Vec2) -> Self {
        VecArg::Vector(v)
    }
}

impl From<&Vec2> for VecArg<'_, Vec2> {
    fn from(v: &Vec2) -> Self {
        VecArg::Vector(*v)
    }
}

impl From<(f64, f64)> for VecArg<'_, Vec2> {
    fn from((x, y): (f64, f64)) -> Self {
        VecArg::Vector(Vec2::new(x, y))
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::MulAssign<f64> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl std::ops::Div<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
