use std::ops::Mul;

use crate::Vec3;

/// Eye and center closer than this on every axis collapse the view to identity.
const LOOK_AT_EPSILON: f32 = 0.000001;

/// A 4x4 matrix stored column-major, as expected by `uniformMatrix4fv`.
///
/// Matrices are post-multiplied: every transform method right-multiplies the
/// receiver, so the last transform applied is the first one a vertex sees.
///
/// # Aliasing
/// Operations come in two flavors:
/// * in-place methods (`translate`, `scale`, `rotate_x`, ...) update `self`,
///   which acts as both the output and the input operand;
/// * `*_from` methods treat `self` as the output and read a distinct input
///   matrix, copying every element the operation leaves untouched.
///
/// All operand values are read into locals before the output is written. Use
/// the [`Mul`] impl when a product needs to overwrite one of its operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn new_identity() -> Self {
        let mut data = [0.0; 16];
        data[0] = 1.0;
        data[5] = 1.0;
        data[10] = 1.0;
        data[15] = 1.0;
        Self { data }
    }

    pub fn from_cols_array(data: [f32; 16]) -> Self {
        Self { data }
    }

    pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut result = Self::new_identity();
        result.set_frustum(left, right, bottom, top, near, far);
        result
    }

    pub fn perspective(fovy: f32, aspect: f32, near: f32, far: Option<f32>) -> Self {
        let mut result = Self::new_identity();
        result.set_perspective(fovy, aspect, near, far);
        result
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut result = Self::new_identity();
        result.set_ortho(left, right, bottom, top, near, far);
        result
    }

    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        let mut result = Self::new_identity();
        result.set_look_at(eye, center, up);
        result
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Resets the matrix to identity.
    pub fn set_identity(&mut self) -> &mut Self {
        *self = Self::new_identity();
        self
    }

    /// Sets `self = a · b`.
    ///
    /// Applied to a column vector, the result transforms by `b` first and
    /// then by `a`; `mv.multiply(&view, &model)` yields "view after model".
    pub fn multiply(&mut self, a: &Mat4, b: &Mat4) -> &mut Self {
        let a = &a.data;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);
        let (a30, a31, a32, a33) = (a[12], a[13], a[14], a[15]);

        let out = &mut self.data;
        for col in 0..4 {
            let (b0, b1, b2, b3) = (
                b.data[col * 4],
                b.data[col * 4 + 1],
                b.data[col * 4 + 2],
                b.data[col * 4 + 3],
            );
            out[col * 4] = b0 * a00 + b1 * a10 + b2 * a20 + b3 * a30;
            out[col * 4 + 1] = b0 * a01 + b1 * a11 + b2 * a21 + b3 * a31;
            out[col * 4 + 2] = b0 * a02 + b1 * a12 + b2 * a22 + b3 * a32;
            out[col * 4 + 3] = b0 * a03 + b1 * a13 + b2 * a23 + b3 * a33;
        }
        self
    }

    /// Right-multiplies by a translation, updating only the translation column.
    pub fn translate(&mut self, v: Vec3) -> &mut Self {
        let (x, y, z) = (v.x, v.y, v.z);
        let out = &mut self.data;
        out[12] = out[0] * x + out[4] * y + out[8] * z + out[12];
        out[13] = out[1] * x + out[5] * y + out[9] * z + out[13];
        out[14] = out[2] * x + out[6] * y + out[10] * z + out[14];
        out[15] = out[3] * x + out[7] * y + out[11] * z + out[15];
        self
    }

    /// Sets `self` to `a` right-multiplied by a translation by `v`.
    pub fn translate_from(&mut self, a: &Mat4, v: Vec3) -> &mut Self {
        self.data = a.data;
        self.translate(v)
    }

    /// Scales the first three columns by `v.x`, `v.y` and `v.z`.
    pub fn scale(&mut self, v: Vec3) -> &mut Self {
        let a = *self;
        self.scale_from(&a, v)
    }

    pub fn scale_from(&mut self, a: &Mat4, v: Vec3) -> &mut Self {
        let a = &a.data;
        let out = &mut self.data;
        for (i, factor) in [v.x, v.y, v.z].into_iter().enumerate() {
            for row in 0..4 {
                out[i * 4 + row] = a[i * 4 + row] * factor;
            }
        }
        out[12..].copy_from_slice(&a[12..]);
        self
    }

    /// Right-multiplies by a rotation of `rad` radians around the X axis.
    pub fn rotate_x(&mut self, rad: f32) -> &mut Self {
        let a = *self;
        self.rotate_x_from(&a, rad)
    }

    pub fn rotate_x_from(&mut self, a: &Mat4, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let a = &a.data;
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);

        let out = &mut self.data;
        out[..4].copy_from_slice(&a[..4]);
        out[12..].copy_from_slice(&a[12..]);

        out[4] = a10 * c + a20 * s;
        out[5] = a11 * c + a21 * s;
        out[6] = a12 * c + a22 * s;
        out[7] = a13 * c + a23 * s;
        out[8] = a20 * c - a10 * s;
        out[9] = a21 * c - a11 * s;
        out[10] = a22 * c - a12 * s;
        out[11] = a23 * c - a13 * s;
        self
    }

    /// Right-multiplies by a rotation of `rad` radians around the Y axis.
    pub fn rotate_y(&mut self, rad: f32) -> &mut Self {
        let a = *self;
        self.rotate_y_from(&a, rad)
    }

    pub fn rotate_y_from(&mut self, a: &Mat4, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let a = &a.data;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a20, a21, a22, a23) = (a[8], a[9], a[10], a[11]);

        let out = &mut self.data;
        out[4..8].copy_from_slice(&a[4..8]);
        out[12..].copy_from_slice(&a[12..]);

        out[0] = a00 * c - a20 * s;
        out[1] = a01 * c - a21 * s;
        out[2] = a02 * c - a22 * s;
        out[3] = a03 * c - a23 * s;
        out[8] = a00 * s + a20 * c;
        out[9] = a01 * s + a21 * c;
        out[10] = a02 * s + a22 * c;
        out[11] = a03 * s + a23 * c;
        self
    }

    /// Right-multiplies by a rotation of `rad` radians around the Z axis.
    pub fn rotate_z(&mut self, rad: f32) -> &mut Self {
        let a = *self;
        self.rotate_z_from(&a, rad)
    }

    pub fn rotate_z_from(&mut self, a: &Mat4, rad: f32) -> &mut Self {
        let (s, c) = rad.sin_cos();
        let a = &a.data;
        let (a00, a01, a02, a03) = (a[0], a[1], a[2], a[3]);
        let (a10, a11, a12, a13) = (a[4], a[5], a[6], a[7]);

        let out = &mut self.data;
        out[8..].copy_from_slice(&a[8..]);

        out[0] = a00 * c + a10 * s;
        out[1] = a01 * c + a11 * s;
        out[2] = a02 * c + a12 * s;
        out[3] = a03 * c + a13 * s;
        out[4] = a10 * c - a00 * s;
        out[5] = a11 * c - a01 * s;
        out[6] = a12 * c - a02 * s;
        out[7] = a13 * c - a03 * s;
        self
    }

    /// Perspective projection from explicit frustum bounds.
    ///
    /// Equal `left`/`right`, `bottom`/`top` or `near`/`far` produce non-finite
    /// elements; no error is raised.
    pub fn set_frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        #[rustfmt::skip]
        let data = [
            near * 2.0 * rl,      0.0,                  0.0,                 0.0,
            0.0,                  near * 2.0 * tb,      0.0,                 0.0,
            (right + left) * rl,  (top + bottom) * tb,  (far + near) * nf,  -1.0,
            0.0,                  0.0,                  far * near * 2.0 * nf, 0.0,
        ];
        self.data = data;
        self
    }

    /// Symmetric perspective projection from a vertical field of view in radians.
    ///
    /// A `far` of `None` or infinity yields the infinite far plane variant.
    pub fn set_perspective(
        &mut self,
        fovy: f32,
        aspect: f32,
        near: f32,
        far: Option<f32>,
    ) -> &mut Self {
        let f = 1.0 / (fovy / 2.0).tan();

        let out = &mut self.data;
        *out = [0.0; 16];
        out[0] = f / aspect;
        out[5] = f;
        out[11] = -1.0;

        match far.filter(|far| *far != f32::INFINITY) {
            Some(far) => {
                let nf = 1.0 / (near - far);
                out[10] = (far + near) * nf;
                out[14] = 2.0 * far * near * nf;
            },
            None => {
                out[10] = -1.0;
                out[14] = -2.0 * near;
            },
        }
        self
    }

    pub fn set_ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        #[rustfmt::skip]
        let data = [
            -2.0 * lr,            0.0,                  0.0,                0.0,
            0.0,                  -2.0 * bt,            0.0,                0.0,
            0.0,                  0.0,                  2.0 * nf,           0.0,
            (left + right) * lr,  (top + bottom) * bt,  (far + near) * nf,  1.0,
        ];
        self.data = data;
        self
    }

    /// View matrix for a viewer at `eye` looking at `center`.
    ///
    /// When `eye` and `center` coincide the result is the identity. A basis
    /// axis whose cross product has zero length is left as the zero vector.
    pub fn set_look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) -> &mut Self {
        if (eye.x - center.x).abs() < LOOK_AT_EPSILON
            && (eye.y - center.y).abs() < LOOK_AT_EPSILON
            && (eye.z - center.z).abs() < LOOK_AT_EPSILON
        {
            return self.set_identity();
        }

        let z = normalize_or_zero([eye.x - center.x, eye.y - center.y, eye.z - center.z]);
        let x = normalize_or_zero(cross([up.x, up.y, up.z], z));
        let y = normalize_or_zero(cross(z, x));
        let eye = [eye.x, eye.y, eye.z];

        #[rustfmt::skip]
        let data = [
            x[0], y[0], z[0], 0.0,
            x[1], y[1], z[1], 0.0,
            x[2], y[2], z[2], 0.0,
            -dot(x, eye), -dot(y, eye), -dot(z, eye), 1.0,
        ];
        self.data = data;
        self
    }

    /// Transforms the column vector `v`.
    pub fn transform_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.data;
        let mut out = [0.0; 4];
        for (row, value) in out.iter_mut().enumerate() {
            *value = m[row] * v[0] + m[4 + row] * v[1] + m[8 + row] * v[2] + m[12 + row] * v[3];
        }
        out
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::new_identity()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = Mat4::new_identity();
        out.multiply(&self, &rhs);
        out
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize_or_zero(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len == 0.0 {
        [0.0; 3]
    } else {
        let inv = 1.0 / len;
        [v[0] * inv, v[1] * inv, v[2] * inv]
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

    use super::*;

    fn assert_mat_eq(a: &Mat4, b: &Mat4, eps: f32) {
        for (i, (x, y)) in a.data.iter().zip(b.data.iter()).enumerate() {
            assert!((x - y).abs() <= eps, "element {i}: {x} != {y}\n{a:?}\n{b:?}");
        }
    }

    fn sample_transform() -> Mat4 {
        let mut m = Mat4::new_identity();
        m.translate(Vec3::new(1.0, -2.0, 3.0))
            .rotate_x(0.3)
            .rotate_y(-1.1)
            .rotate_z(2.0)
            .scale(Vec3::new(0.5, 2.0, 1.5));
        m
    }

    #[test]
    fn test_identity_layout() {
        let m = Mat4::new_identity();
        for i in 0..16 {
            let expected = if i % 5 == 0 { 1.0 } else { 0.0 };
            assert_eq!(m.data[i], expected);
        }
        assert_eq!(Mat4::default(), m);
    }

    #[test]
    fn test_multiply_identity_is_neutral() {
        let x = sample_transform();
        let mut out = Mat4::from_cols_array([9.0; 16]);
        out.multiply(&Mat4::new_identity(), &x);
        assert_mat_eq(&out, &x, 0.0);

        out.multiply(&x, &Mat4::new_identity());
        assert_mat_eq(&out, &x, 0.0);
    }

    #[test]
    fn test_multiply_is_associative() {
        let a = sample_transform();
        let b = Mat4::look_at(Vec3::new(1.0, 2.0, 5.0), Vec3::ZERO, Vec3::Y);
        let c = Mat4::perspective(FRAC_PI_3, 1.5, 1.0, Some(10.0));

        assert_mat_eq(&((a * b) * c), &(a * (b * c)), 1e-4);
    }

    #[test]
    fn test_multiply_applies_right_operand_first() {
        let mut view = Mat4::new_identity();
        view.rotate_y(FRAC_PI_2);
        let mut model = Mat4::new_identity();
        model.translate(Vec3::new(1.0, 0.0, 0.0));

        let mut mv = Mat4::new_identity();
        mv.multiply(&view, &model);

        // translate to (1,0,0), then rotate about +Y: x -> -z
        let p = mv.transform_vec4([0.0, 0.0, 0.0, 1.0]);
        assert!(p[0].abs() < 1e-6);
        assert!((p[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_translate_origin() {
        let mut m = Mat4::new_identity();
        m.translate(Vec3::new(3.0, -4.0, 0.5));
        assert_eq!(m.transform_vec4([0.0, 0.0, 0.0, 1.0]), [3.0, -4.0, 0.5, 1.0]);
    }

    #[test]
    fn test_translate_from_matches_in_place() {
        let a = sample_transform();
        let v = Vec3::new(-0.25, 4.0, 1.0);

        let mut in_place = a;
        in_place.translate(v);

        let mut copied = Mat4::from_cols_array([f32::NAN; 16]);
        copied.translate_from(&a, v);

        assert_mat_eq(&in_place, &copied, 0.0);
        assert_eq!(in_place.data[..12], a.data[..12]);
    }

    #[test]
    fn test_scale_leaves_last_column() {
        let a = sample_transform();
        let mut out = Mat4::new_identity();
        out.scale_from(&a, Vec3::new(2.0, 3.0, 4.0));

        assert_eq!(out.data[12..], a.data[12..]);
        assert_eq!(out.data[0], a.data[0] * 2.0);
        assert_eq!(out.data[5], a.data[5] * 3.0);
        assert_eq!(out.data[10], a.data[10] * 4.0);
    }

    #[test]
    fn test_zero_rotation_is_noop() {
        let a = sample_transform();

        let mut m = a;
        m.rotate_x(0.0).rotate_y(0.0).rotate_z(0.0);
        assert_mat_eq(&m, &a, 1e-6);

        let mut out = Mat4::new_identity();
        out.rotate_x_from(&a, 0.0);
        assert_mat_eq(&out, &a, 1e-6);
        out.rotate_y_from(&a, 0.0);
        assert_mat_eq(&out, &a, 1e-6);
        out.rotate_z_from(&a, 0.0);
        assert_mat_eq(&out, &a, 1e-6);
    }

    #[test]
    fn test_rotation_follows_right_hand_rule() {
        let mut rz = Mat4::new_identity();
        rz.rotate_z(FRAC_PI_2);
        let p = rz.transform_vec4([1.0, 0.0, 0.0, 1.0]);
        assert!(p[0].abs() < 1e-6 && (p[1] - 1.0).abs() < 1e-6);

        let mut rx = Mat4::new_identity();
        rx.rotate_x(FRAC_PI_2);
        let p = rx.transform_vec4([0.0, 1.0, 0.0, 1.0]);
        assert!(p[1].abs() < 1e-6 && (p[2] - 1.0).abs() < 1e-6);

        let mut ry = Mat4::new_identity();
        ry.rotate_y(FRAC_PI_2);
        let p = ry.transform_vec4([0.0, 0.0, 1.0, 1.0]);
        assert!((p[0] - 1.0).abs() < 1e-6 && p[2].abs() < 1e-6);
    }

    #[test]
    fn test_rotate_from_copies_untouched_columns() {
        let a = sample_transform();
        let mut out = Mat4::from_cols_array([f32::NAN; 16]);

        out.rotate_x_from(&a, 0.7);
        assert_eq!(out.data[..4], a.data[..4]);
        assert_eq!(out.data[12..], a.data[12..]);

        out.rotate_y_from(&a, 0.7);
        assert_eq!(out.data[4..8], a.data[4..8]);

        out.rotate_z_from(&a, 0.7);
        assert_eq!(out.data[8..], a.data[8..]);
    }

    #[test]
    fn test_look_at_singularity_returns_identity() {
        let eye = Vec3::new(1.5, -2.0, 7.0);
        let mut m = sample_transform();
        m.set_look_at(eye, eye, Vec3::Y);
        assert_eq!(m, Mat4::new_identity());

        let nearly = Vec3::new(eye.x + 1e-7, eye.y, eye.z);
        assert_eq!(Mat4::look_at(eye, nearly, Vec3::new(0.0, 0.0, 1.0)), Mat4::new_identity());
    }

    #[test]
    fn test_look_at_moves_eye_to_origin() {
        let eye = Vec3::new(0.0, 0.0, 4.0);
        let view = Mat4::look_at(eye, Vec3::ZERO, Vec3::Y);

        let p = view.transform_vec4([eye.x, eye.y, eye.z, 1.0]);
        assert!(p[..3].iter().all(|c| c.abs() < 1e-6));

        // center lies on the negative z axis in view space
        let c = view.transform_vec4([0.0, 0.0, 0.0, 1.0]);
        assert!((c[2] + 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_up_parallel_to_forward() {
        let view = Mat4::look_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y);
        // right and up axes collapse to zero, forward stays +Y
        assert_eq!([view.data[0], view.data[4], view.data[8]], [0.0; 3]);
        assert_eq!([view.data[1], view.data[5], view.data[9]], [0.0; 3]);
        assert_eq!([view.data[2], view.data[6], view.data[10]], [0.0, 1.0, 0.0]);
        assert_eq!(view.data[14], -5.0);
    }

    #[test]
    fn test_perspective_infinite_far() {
        let near = 0.5;
        for far in [None, Some(f32::INFINITY)] {
            let p = Mat4::perspective(FRAC_PI_3, 2.0, near, far);
            assert_eq!(p.data[10], -1.0);
            assert_eq!(p.data[14], -2.0 * near);
            assert_eq!(p.data[11], -1.0);
            assert_eq!(p.data[15], 0.0);
        }
    }

    #[test]
    fn test_perspective_finite_far() {
        let (near, far) = (1.0, 10.0);
        let p = Mat4::perspective(FRAC_PI_3, 1.5, near, Some(far));
        let f = 1.0 / (FRAC_PI_3 / 2.0).tan();

        assert!((p.data[10] - (far + near) / (near - far)).abs() < 1e-6);
        assert!((p.data[14] - 2.0 * far * near / (near - far)).abs() < 1e-6);
        assert!((p.data[5] - f).abs() < 1e-6);
        assert!((p.data[0] - f / 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_frustum_maps_near_plane_corners() {
        let p = Mat4::frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        let clip = p.transform_vec4([1.0, 1.0, -1.0, 1.0]);
        let ndc = [clip[0] / clip[3], clip[1] / clip[3], clip[2] / clip[3]];
        assert!((ndc[0] - 1.0).abs() < 1e-6);
        assert!((ndc[1] - 1.0).abs() < 1e-6);
        assert!((ndc[2] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frustum_degenerate_bounds_are_silent() {
        let p = Mat4::frustum(1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        assert!(!p.data[0].is_finite());
        assert!(p.data[5].is_finite());
    }

    #[test]
    fn test_ortho_maps_box_to_unit_cube() {
        let p = Mat4::orthographic(-2.0, 2.0, -2.0, 2.0, -10.0, 10.0);
        assert_eq!(p.transform_vec4([2.0, -2.0, 0.0, 1.0]), [1.0, -1.0, 0.0, 1.0]);
        let far = p.transform_vec4([0.0, 0.0, -10.0, 1.0]);
        assert!((far[2] - 1.0).abs() < 1e-6);
    }
}
