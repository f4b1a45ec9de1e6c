//! 3D Vector type

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::arg::VecArg;

/// 3D Vector with x, y, z components
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0, z: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a new Vec3
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector with every component set to `s`
    #[inline]
    pub const fn splat(s: f64) -> Self {
        Self { x: s, y: s, z: s }
    }

    /// Build from any supported argument shape
    ///
    /// ```
    /// use fixedloop_math::Vec3;
    ///
    /// assert_eq!(Vec3::from_arg(2.0), Vec3::new(2.0, 2.0, 2.0));
    /// assert_eq!(Vec3::from_arg(&[1.0, 2.0]), Vec3::new(1.0, 2.0, 0.0));
    /// assert_eq!(Vec3::from_arg((1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    /// ```
    #[inline]
    pub fn from_arg<'a>(arg: impl Into<VecArg<'a, Vec3>>) -> Self {
        arg.into().resolve()
    }

    /// Overwrite all components from any supported argument shape
    #[inline]
    pub fn set<'a>(&mut self, arg: impl Into<VecArg<'a, Vec3>>) -> &mut Self {
        *self = arg.into().resolve();
        self
    }

    /// Copy the components of `other` into `self`
    #[inline]
    pub fn copy_from(&mut self, other: &Self) -> &mut Self {
        *self = *other;
        self
    }

    /// Write `v1 + v2` into `target` (or a fresh copy of `v1`) and return the result
    ///
    /// Neither `v1` nor `v2` is modified.
    pub fn sum(v1: Self, v2: Self, target: Option<&mut Self>) -> Self {
        match target {
            Some(target) => {
                target.copy_from(&v1).add_in_place(v2);
                *target
            }
            None => v1.add(v2),
        }
    }

    // --- addition ---

    /// Sum with any supported argument shape
    #[inline]
    pub fn add<'a>(self, arg: impl Into<VecArg<'a, Vec3>>) -> Self {
        let p = arg.into().resolve();
        Self::new(self.x + p.x, self.y + p.y, self.z + p.z)
    }

    #[inline]
    pub fn add_scalar(self, s: f64) -> Self {
        Self::new(self.x + s, self.y + s, self.z + s)
    }

    #[inline]
    pub fn add_in_place<'a>(&mut self, arg: impl Into<VecArg<'a, Vec3>>) -> &mut Self {
        let p = arg.into().resolve();
        self.x += p.x;
        self.y += p.y;
        self.z += p.z;
        self
    }

    #[inline]
    pub fn add_scalar_in_place(&mut self, s: f64) -> &mut Self {
        self.x += s;
        self.y += s;
        self.z += s;
        self
    }

    // --- subtraction ---

    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[inline]
    pub fn sub_scalar(self, s: f64) -> Self {
        Self::new(self.x - s, self.y - s, self.z - s)
    }

    #[inline]
    pub fn sub_in_place(&mut self, other: Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
        self
    }

    #[inline]
    pub fn sub_scalar_in_place(&mut self, s: f64) -> &mut Self {
        self.x -= s;
        self.y -= s;
        self.z -= s;
        self
    }

    // --- multiplication ---

    /// Component-wise multiplication (Hadamard product)
    #[inline]
    pub fn multiply(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    #[inline]
    pub fn multiply_scalar(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[inline]
    pub fn multiply_in_place(&mut self, other: Self) -> &mut Self {
        self.x *= other.x;
        self.y *= other.y;
        self.z *= other.z;
        self
    }

    #[inline]
    pub fn multiply_scalar_in_place(&mut self, s: f64) -> &mut Self {
        self.x *= s;
        self.y *= s;
        self.z *= s;
        self
    }

    // --- length ---

    /// Dot product
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length (Euclidean norm)
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction
    ///
    /// A zero-length vector yields non-finite components.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        Self::new(self.x / len, self.y / len, self.z / len)
    }

    /// Normalize in place; see [`Vec3::normalize`] for the zero-length case
    #[inline]
    pub fn normalize_in_place(&mut self) -> &mut Self {
        let len = self.length();
        self.x /= len;
        self.y /= len;
        self.z /= len;
        self
    }

    /// Vector in the same direction with length `s`
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

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self * (1.0 - t) + other * t
    }

    /// True when every component is finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Components as an array
    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl VecArg<'_, Vec3> {
    /// Resolve to a concrete vector
    pub fn resolve(&self) -> Vec3 {
        match *self {
            VecArg::Vector(v) => v,
            VecArg::Sequence(values) => Vec3::new(
                Self::sequence_component(values, 0),
                Self::sequence_component(values, 1),
                Self::sequence_component(values, 2),
            ),
            VecArg::Splat(s) => Vec3::splat(s),
        }
    }
}

impl From<Vec3> for VecArg<'_, Vec3> {
    fn from(v: Vec3) -> Self {
        VecArg::Vector(v)
    }
}

impl From<&Vec3> for VecArg<'_, Vec3> {
    fn from(v: &Vec3) -> Self {
        VecArg::Vector(*v)
    }
}

impl From<(f64, f64, f64)> for VecArg<'_, Vec3> {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        VecArg::Vector(Vec3::new(x, y, z))
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

// Operator overloads

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::MulAssign<f64> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
        self.z *= scalar;
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_new_and_defaults() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(Vec3::default(), Vec3::ZERO);
    }

    #[test]
    fn test_from_arg_shapes() {
        let base = Vec3::new(7.0, 8.0, 9.0);
        assert_eq!(Vec3::from_arg(base), base);
        assert_eq!(Vec3::from_arg(&base), base);
        assert_eq!(Vec3::from_arg(4.0), Vec3::splat(4.0));
        assert_eq!(Vec3::from_arg(&[1.0]), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(Vec3::from_arg(&[1.0, 2.0, 3.0, 4.0]), Vec3::new(1.0, 2.0, 3.0));

        let empty: &[f64] = &[];
        assert_eq!(Vec3::from_arg(empty), Vec3::ZERO);

        let owned = vec![5.0, 6.0];
        assert_eq!(Vec3::from_arg(&owned), Vec3::new(5.0, 6.0, 0.0));
    }

    #[test]
    fn test_set_shares_argument_shape() {
        let mut v = Vec3::new(1.0, 1.0, 1.0);
        v.set(3.0);
        assert_eq!(v, Vec3::splat(3.0));
        v.set((0.0, 1.0, 2.0));
        assert_eq!(v, Vec3::new(0.0, 1.0, 2.0));
        v.set(&[9.0]);
        assert_eq!(v, Vec3::new(9.0, 0.0, 0.0));
    }

    #[test]
    fn test_add_is_pure() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let c = a.add(b);
        assert_eq!(c, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_add_in_place() {
        let mut a = Vec3::new(1.0, 2.0, 3.0);
        a.add_in_place(1.0).add_in_place(&[1.0, 0.0, -1.0]);
        assert_eq!(a, Vec3::new(3.0, 3.0, 3.0));

        a.add_scalar_in_place(-3.0);
        assert_eq!(a, Vec3::ZERO);
        assert_eq!(Vec3::ONE.add_scalar(1.0), Vec3::splat(2.0));
    }

    #[test]
    fn test_sub() {
        let a = Vec3::new(5.0, 6.0, 7.0);
        let b = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a.sub(b), Vec3::splat(4.0));
        assert_eq!(a.sub_scalar(5.0), Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(a, Vec3::new(5.0, 6.0, 7.0));

        let mut c = a;
        c.sub_in_place(b).sub_scalar_in_place(4.0);
        assert_eq!(c, Vec3::ZERO);
    }

    #[test]
    fn test_multiply() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(2.0, 3.0, 4.0);
        assert_eq!(a.multiply(b), Vec3::new(2.0, 6.0, 12.0));
        assert_eq!(a.multiply_scalar(2.0), Vec3::new(2.0, 4.0, 6.0));

        let mut c = a;
        c.multiply_in_place(b);
        assert_eq!(c, Vec3::new(2.0, 6.0, 12.0));
        c.multiply_scalar_in_place(0.5);
        assert_eq!(c, Vec3::new(1.0, 3.0, 6.0));
    }

    #[test]
    fn test_length() {
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Vec3::ZERO.length(), 0.0);
        assert_eq!(Vec3::new(-3.0, 0.0, -4.0).length(), 5.0);
    }

    #[test]
    fn test_normalize_has_unit_length() {
        for v in [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.001, 0.002, 1e-5),
            Vec3::new(1e6, -2e6, 3e6),
        ] {
            let n = v.normalize();
            assert!((n.length() - 1.0).abs() < EPS);

            let mut m = v;
            m.normalize_in_place();
            assert!((m.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn test_normalize_zero_is_not_finite() {
        assert!(!Vec3::ZERO.normalize().is_finite());

        let mut v = Vec3::ZERO;
        v.set_length_in_place(2.0);
        assert!(!v.is_finite());
    }

    #[test]
    fn test_set_length() {
        let v = Vec3::new(0.0, 3.0, 4.0);
        let r = v.set_length(10.0);
        assert!((r.length() - 10.0).abs() < EPS);
        assert!((r.y - 6.0).abs() < EPS);
        assert_eq!(v.length(), 5.0);

        let mut w = v;
        w.set_length_in_place(1.0);
        assert!((w.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_limit() {
        let mut v = Vec3::new(0.0, 30.0, 40.0);
        v.limit(5.0);
        assert!((v.length() - 5.0).abs() < EPS);

        let mut short = Vec3::new(0.1, 0.2, 0.0);
        short.limit(5.0);
        assert_eq!(short, Vec3::new(0.1, 0.2, 0.0));
    }

    #[test]
    fn test_limit_idempotent() {
        for s in [0.5, 1.0, 3.0, 100.0] {
            let mut once = Vec3::new(2.0, -7.0, 3.5);
            once.limit(s);
            let mut twice = once;
            twice.limit(s);
            assert!((once - twice).length() < EPS);
            assert!(twice.length() <= s + EPS);
        }
    }

    #[test]
    fn test_sum_with_and_without_target() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(Vec3::sum(a, b, None), Vec3::new(2.0, 3.0, 4.0));

        let mut target = Vec3::splat(100.0);
        let r = Vec3::sum(a, b, Some(&mut target));
        assert_eq!(target, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(r, target);
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_lerp() {
        let a = Vec3::ZERO;
        let b = Vec3::splat(10.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 0.5), Vec3::splat(5.0));
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_operators() {
        let a = Vec3::new(1.0, -2.0, 3.0);
        assert_eq!(a + a, Vec3::new(2.0, -4.0, 6.0));
        assert_eq!(a - a, Vec3::ZERO);
        assert_eq!(a * 2.0, Vec3::new(2.0, -4.0, 6.0));
        assert_eq!(a / 2.0, Vec3::new(0.5, -1.0, 1.5));
        assert_eq!(-a, Vec3::new(-1.0, 2.0, -3.0));

        let mut b = a;
        b += Vec3::ONE;
        b -= Vec3::X;
        b *= 2.0;
        assert_eq!(b, Vec3::new(2.0, -2.0, 8.0));
    }
}
