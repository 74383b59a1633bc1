use rand::Rng;
use std::ops::{Add, Mul, Sub};

/*
Requirements for memory compatibility with GPU buffers:
   1. Standard layout (like C structs).
   2. Alignment that matches shader expectations.
   3. Sized correctly for GPU buffers.
   4. Can be safely cast to [f32; N] or bytes.
*/

#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec3(pub [f32; 3]);

impl Vec3 {
    pub const ZERO: Vec3 = Vec3([0.0, 0.0, 0.0]);

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Vec3([x, y, z])
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vec3([
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        ])
    }

    pub fn length(&self) -> f32 {
        (self.x().powi(2) + self.y().powi(2) + self.z().powi(2)).sqrt()
    }

    /// Returns the zero vector when the input has zero length, never NaN.
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::ZERO;
        }

        Self([self.x() / length, self.y() / length, self.z() / length])
    }

    pub fn distance_to(&self, other: &Self) -> f32 {
        (*other - *self).length()
    }

    /// Rounds each component to `decimals` decimal places.
    ///
    /// Used to clamp floating point drift when a direction vector is scaled
    /// to an exact step size.
    pub fn round_to(&self, decimals: u32) -> Self {
        let factor = 10f32.powi(decimals as i32);
        Vec3([
            (self.x() * factor).round() / factor,
            (self.y() * factor).round() / factor,
            (self.z() * factor).round() / factor,
        ])
    }

    pub fn as_array(&self) -> &[f32; 3] {
        &self.0
    }
    pub fn x(&self) -> f32 {
        self.0[0]
    }
    pub fn y(&self) -> f32 {
        self.0[1]
    }
    pub fn z(&self) -> f32 {
        self.0[2]
    }
}

/// Generates a uniformly distributed point on the disc of the given planar
/// radius around `center`.
///
/// The offset is applied on the X/Z plane; the returned point keeps the
/// center's y component. Callers that need a ground-level point force y to
/// the ground plane themselves.
pub fn random_point_within(center: Vec3, radius: f32) -> Vec3 {
    let mut rng = rand::thread_rng();
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    // sqrt keeps the distribution uniform over the disc area
    let r = radius * rng.gen_range(0.0f32..=1.0).sqrt();
    Vec3::new(
        center.x() + r * angle.cos(),
        center.y(),
        center.z() + r * angle.sin(),
    )
}

impl From<[f32; 3]> for Vec3 {
    fn from(values: [f32; 3]) -> Self {
        Vec3(values)
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(vec: Vec3) -> Self {
        vec.0
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self([
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        ])
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self([
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        ])
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self([self.x() * scalar, self.y() * scalar, self.z() * scalar])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that normalizing a zero-length vector yields the zero vector
    /// instead of NaN components.
    #[test]
    fn test_normalize_zero_vector_is_guarded() {
        let v = Vec3::ZERO.normalize();
        assert_eq!(v, Vec3::ZERO);
        assert!(v.x().is_finite() && v.y().is_finite() && v.z().is_finite());
    }

    /// Tests that a normalized vector has unit length.
    #[test]
    fn test_normalize_unit_length() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    /// Tests component rounding to a fixed decimal precision.
    #[test]
    fn test_round_to() {
        let v = Vec3::new(0.123456, -0.987654, 2.000049);
        let r = v.round_to(4);
        assert_eq!(r, Vec3::new(0.1235, -0.9877, 2.0));
    }

    /// Tests distance against a 3-4-5 triangle.
    #[test]
    fn test_distance_to() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
    }

    /// Tests cross product orthogonality and handedness.
    #[test]
    fn test_cross() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
    }

    /// Tests that random points stay within the requested planar radius and
    /// keep the center's y component.
    #[test]
    fn test_random_point_within_radius() {
        let center = Vec3::new(2.0, 7.0, -3.0);
        for _ in 0..200 {
            let p = random_point_within(center, 5.0);
            assert_eq!(p.y(), center.y());
            let dx = p.x() - center.x();
            let dz = p.z() - center.z();
            assert!((dx * dx + dz * dz).sqrt() <= 5.0 + 1e-4);
        }
    }
}
