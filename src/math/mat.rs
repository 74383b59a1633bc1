use crate::math::deg_to_rad;
use crate::math::vec::Vec3;

// Row-major layout with the translation in the last row; points transform as
// row vectors (v' = v * M). Matches the layout the rendering collaborator
// expects for uniform buffers.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [tx, ty, tz, 1.0],
        ])
    }

    pub fn rotation_x(angle_in_degrees: f32) -> Mat4 {
        let c = deg_to_rad(angle_in_degrees).cos();
        let s = deg_to_rad(angle_in_degrees).sin();
        Mat4([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(angle_in_degrees: f32) -> Mat4 {
        let c = deg_to_rad(angle_in_degrees).cos();
        let s = deg_to_rad(angle_in_degrees).sin();
        Mat4([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn multiply(&self, b: &Mat4) -> Mat4 {
        let mut result = [[0.0; 4]; 4];
        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[i][k] * b.0[k][j]).sum();
            }
        }
        Mat4(result)
    }

    /// Inverts an affine transform (rotation/scale plus translation).
    ///
    /// Falls back to the identity matrix when the linear part is singular.
    pub fn inverse(&self) -> Mat4 {
        let m = self.0;

        // Extract the 3x3 linear part (A) and translation (t)
        let a = [
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ];
        let t = [m[3][0], m[3][1], m[3][2]];

        let det = a[0][0] * (a[1][1] * a[2][2] - a[1][2] * a[2][1])
            - a[0][1] * (a[1][0] * a[2][2] - a[1][2] * a[2][0])
            + a[0][2] * (a[1][0] * a[2][1] - a[1][1] * a[2][0]);

        if det.abs() < f32::EPSILON {
            return Mat4::identity(); // Fallback if singular
        }

        let inv_det = 1.0 / det;
        let mut a_inv = [[0.0; 3]; 3];

        // Adjugate of A divided by the determinant
        a_inv[0][0] = (a[1][1] * a[2][2] - a[1][2] * a[2][1]) * inv_det;
        a_inv[0][1] = -(a[0][1] * a[2][2] - a[0][2] * a[2][1]) * inv_det;
        a_inv[0][2] = (a[0][1] * a[1][2] - a[0][2] * a[1][1]) * inv_det;
        a_inv[1][0] = -(a[1][0] * a[2][2] - a[1][2] * a[2][0]) * inv_det;
        a_inv[1][1] = (a[0][0] * a[2][2] - a[0][2] * a[2][0]) * inv_det;
        a_inv[1][2] = -(a[0][0] * a[1][2] - a[0][2] * a[1][0]) * inv_det;
        a_inv[2][0] = (a[1][0] * a[2][1] - a[1][1] * a[2][0]) * inv_det;
        a_inv[2][1] = -(a[0][0] * a[2][1] - a[0][1] * a[2][0]) * inv_det;
        a_inv[2][2] = (a[0][0] * a[1][1] - a[0][1] * a[1][0]) * inv_det;

        // New translation: -t * A⁻¹ (row-vector convention)
        let new_t = [
            -(t[0] * a_inv[0][0] + t[1] * a_inv[1][0] + t[2] * a_inv[2][0]),
            -(t[0] * a_inv[0][1] + t[1] * a_inv[1][1] + t[2] * a_inv[2][1]),
            -(t[0] * a_inv[0][2] + t[1] * a_inv[1][2] + t[2] * a_inv[2][2]),
        ];

        Mat4([
            [a_inv[0][0], a_inv[0][1], a_inv[0][2], 0.0],
            [a_inv[1][0], a_inv[1][1], a_inv[1][2], 0.0],
            [a_inv[2][0], a_inv[2][1], a_inv[2][2], 0.0],
            [new_t[0], new_t[1], new_t[2], 1.0],
        ])
    }

    pub fn perspective(field_of_view_y_in_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4 {
        let f = 1.0 / (deg_to_rad(field_of_view_y_in_degrees) * 0.5).tan();
        let range_reciprocal = 1.0 / (z_near - z_far);

        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (z_near + z_far) * range_reciprocal, -1.0],
            [0.0, 0.0, z_near * z_far * range_reciprocal * 2.0, 0.0],
        ])
    }

    /// Builds a camera-to-world matrix looking from `eye` toward `target`.
    ///
    /// Invert the result to get a view matrix.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis).normalize();

        Mat4([
            [x_axis.x(), x_axis.y(), x_axis.z(), 0.0],
            [y_axis.x(), y_axis.y(), y_axis.z(), 0.0],
            [z_axis.x(), z_axis.y(), z_axis.z(), 0.0],
            [eye.x(), eye.y(), eye.z(), 1.0],
        ])
    }

    /// Transforms `point` by this matrix about `pivot`.
    ///
    /// The point is expressed relative to the pivot, transformed, and moved
    /// back. Rotating one point around another (a camera target around the
    /// camera position, for instance) is `rotation.transform_point(p, pivot)`.
    pub fn transform_point(&self, point: Vec3, pivot: Vec3) -> Vec3 {
        let rel = point - pivot;
        let m = self.0;
        let out = Vec3::new(
            rel.x() * m[0][0] + rel.y() * m[1][0] + rel.z() * m[2][0] + m[3][0],
            rel.x() * m[0][1] + rel.y() * m[1][1] + rel.z() * m[2][1] + m[3][1],
            rel.x() * m[0][2] + rel.y() * m[1][2] + rel.z() * m[2][2] + m[3][2],
        );
        out + pivot
    }
}

impl From<[[f32; 4]; 4]> for Mat4 {
    fn from(matrix: [[f32; 4]; 4]) -> Self {
        Mat4(matrix)
    }
}

impl From<Mat4> for [[f32; 4]; 4] {
    fn from(matrix: Mat4) -> Self {
        matrix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!(
            a.distance_to(&b) < 1e-4,
            "expected {:?} to be close to {:?}",
            a,
            b
        );
    }

    /// Tests that multiplying by the identity leaves a matrix unchanged.
    #[test]
    fn test_multiply_identity() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m.multiply(&Mat4::identity()), m);
        assert_eq!(Mat4::identity().multiply(&m), m);
    }

    /// Tests rotating a point about a pivot: a point one unit along +X from
    /// the pivot rotated 90° about Y lands one unit along +Z.
    #[test]
    fn test_transform_point_about_pivot() {
        let pivot = Vec3::new(5.0, 1.0, -2.0);
        let point = pivot + Vec3::new(1.0, 0.0, 0.0);
        let rotated = Mat4::rotation_y(90.0).transform_point(point, pivot);
        assert_vec_close(rotated, pivot + Vec3::new(0.0, 0.0, 1.0));
    }

    /// Tests that the pivot itself is a fixed point of rotation about it.
    #[test]
    fn test_transform_point_pivot_fixed() {
        let pivot = Vec3::new(-3.0, 0.5, 8.0);
        let rotated = Mat4::rotation_y(137.0).transform_point(pivot, pivot);
        assert_vec_close(rotated, pivot);
    }

    /// Tests the affine inverse by mapping a transformed point back.
    #[test]
    fn test_inverse_round_trip() {
        let m = Mat4::rotation_y(30.0).multiply(&Mat4::translation(2.0, -1.0, 4.0));
        let p = Vec3::new(1.0, 2.0, 3.0);
        let forward = m.transform_point(p, Vec3::ZERO);
        let back = m.inverse().transform_point(forward, Vec3::ZERO);
        assert_vec_close(back, p);
    }

    /// Tests that inverting a look-at matrix maps the eye to the origin.
    #[test]
    fn test_look_at_inverse_maps_eye_to_origin() {
        let eye = Vec3::new(4.0, 2.0, 9.0);
        let camera = Mat4::look_at(eye, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let view = camera.inverse();
        assert_vec_close(view.transform_point(eye, Vec3::ZERO), Vec3::ZERO);
    }
}
