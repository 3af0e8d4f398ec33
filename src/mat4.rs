//! 4×4 matrix math for the model/view/projection pipeline.
//!
//! Matrices are plain `[f32; 16]` buffers in column-major order
//! (`m[column * 4 + row]`), the layout WGSL `mat4x4<f32>` expects, so they can
//! be written to a uniform buffer unchanged. Angles are in degrees.
//!
//! The constructors return fresh matrices. [`translate`] is the only mutating
//! operation and writes through an exclusive borrow of the caller's buffer.

use crate::error::{Error, Result};
use glam::{Vec3, Vec4};

/// 4×4 column-major matrix.
pub type Matrix4x4 = [f32; 16];

/// Multiplicative identity.
#[rustfmt::skip]
pub const IDENTITY: Matrix4x4 = [
    1.0, 0.0, 0.0, 0.0, // col 0
    0.0, 1.0, 0.0, 0.0, // col 1
    0.0, 0.0, 1.0, 0.0, // col 2
    0.0, 0.0, 0.0, 1.0, // col 3
];

/// Squared length below which a look-at axis is treated as degenerate.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Returns a fresh identity matrix.
pub fn identity() -> Matrix4x4 {
    IDENTITY
}

/// OpenGL-style right-handed perspective projection onto the `[-1, 1]` clip cube.
///
/// wgpu clips normalized depth to `[0, 1]`, not `[-1, 1]`. Under wgpu the
/// visible range therefore starts where this matrix maps depth to 0, at eye
/// distance `2 * near * far / (far + near)` (about `2 * near` when
/// `far >> near`), instead of at `near`.
///
/// # Errors
///
/// [`Error::InvalidParameter`] when `fov_y_degrees` is outside `(0, 180)`,
/// `aspect` is not a finite positive number, either clip plane is not finite,
/// or `near == far`.
pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<Matrix4x4> {
    if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
        return Err(Error::invalid(
            "fov_y_degrees",
            format!("must be inside (0, 180), got {fov_y_degrees}"),
        ));
    }
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(Error::invalid(
            "aspect",
            format!("must be a finite positive number, got {aspect}"),
        ));
    }
    if !near.is_finite() || !far.is_finite() {
        return Err(Error::invalid(
            "near/far",
            format!("clip planes must be finite, got {near} and {far}"),
        ));
    }
    if near == far {
        return Err(Error::invalid(
            "near/far",
            format!("clip planes must differ, both are {near}"),
        ));
    }

    let tan_half_fov = (fov_y_degrees / 2.0).to_radians().tan();
    let depth = far - near;

    let mut m = [0.0; 16];
    m[0] = 1.0 / (aspect * tan_half_fov);
    m[5] = 1.0 / tan_half_fov;
    m[10] = -(far + near) / depth;
    m[11] = -1.0;
    m[14] = -(2.0 * far * near) / depth;
    Ok(m)
}

/// Right-handed view matrix looking from `eye` toward `center`.
///
/// The translation column is the rotation applied to `-eye`, composed through
/// [`translate`].
///
/// # Errors
///
/// [`Error::InvalidParameter`] when any component is NaN or infinite, or when
/// `eye` and `center` are so far apart that their distance overflows.
/// [`Error::DegenerateBasis`] when `eye == center` or when the view direction
/// is parallel to `up`.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Result<Matrix4x4> {
    for (name, v) in [("eye", eye), ("center", center), ("up", up)] {
        if !v.is_finite() {
            return Err(Error::invalid(name, format!("must be finite, got {v}")));
        }
    }

    let forward = center - eye;
    let distance_squared = forward.length_squared();
    if !distance_squared.is_finite() {
        return Err(Error::invalid(
            "eye/center",
            format!("distance between {eye} and {center} overflows f32"),
        ));
    }
    if distance_squared <= DEGENERATE_EPSILON {
        return Err(Error::DegenerateBasis("eye and center coincide"));
    }
    let f = forward.normalize();

    let side = f.cross(up);
    if side.length_squared() <= DEGENERATE_EPSILON {
        return Err(Error::DegenerateBasis("view direction is parallel to up"));
    }
    let s = side.normalize();
    let u = s.cross(f);

    #[rustfmt::skip]
    let mut m = [
        s.x, u.x, -f.x, 0.0,
        s.y, u.y, -f.y, 0.0,
        s.z, u.z, -f.z, 0.0,
        0.0, 0.0,  0.0, 1.0,
    ];
    translate(&mut m, -eye.x, -eye.y, -eye.z);
    Ok(m)
}

/// Right-multiplies `matrix` by a translation, in place.
///
/// Column 3 becomes `col0 * x + col1 * y + col2 * z + col3`; the upper 3×3
/// block is left untouched.
pub fn translate(matrix: &mut Matrix4x4, x: f32, y: f32, z: f32) {
    for row in 0..4 {
        matrix[12 + row] =
            matrix[row] * x + matrix[4 + row] * y + matrix[8 + row] * z + matrix[12 + row];
    }
}

/// Column-major product `a × b`.
pub fn multiply(a: &Matrix4x4, b: &Matrix4x4) -> Matrix4x4 {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            let mut sum = 0.0;
            for k in 0..4 {
                sum += a[k * 4 + row] * b[col * 4 + k];
            }
            out[col * 4 + row] = sum;
        }
    }
    out
}

/// Applies `m` to the column vector `v`.
pub fn transform(m: &Matrix4x4, v: Vec4) -> Vec4 {
    glam::Mat4::from_cols_array(m) * v
}

/// Inverse-transpose of `model`, used to carry normals into world space.
///
/// A singular `model` yields a non-finite matrix, as `glam` does.
pub fn normal_matrix(model: &Matrix4x4) -> Matrix4x4 {
    glam::Mat4::from_cols_array(model)
        .inverse()
        .transpose()
        .to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx_eq(a: &Matrix4x4, b: &Matrix4x4, eps: f32) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < eps)
    }

    fn approx_vec(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn identity_is_column_major_unit_diagonal() {
        let m = identity();
        for col in 0..4 {
            for row in 0..4 {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert_eq!(m[col * 4 + row], expected);
            }
        }
        assert_eq!(m, glam::Mat4::IDENTITY.to_cols_array());
    }

    #[test]
    fn zero_translate_leaves_identity_unchanged() {
        let mut m = identity();
        translate(&mut m, 0.0, 0.0, 0.0);
        assert_eq!(m, IDENTITY);
    }

    #[test]
    fn translate_identity_sets_translation_column() {
        let mut m = identity();
        translate(&mut m, 1.0, 2.0, 3.0);
        assert_eq!(&m[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(&m[..12], &IDENTITY[..12]);
    }

    #[test]
    fn translate_follows_the_matrix_basis() {
        // 90 degrees about Y: +X maps to -Z
        let mut m = glam::Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2).to_cols_array();
        let rotation = m;
        translate(&mut m, 1.0, 0.0, 0.0);

        assert!(m[12].abs() < EPS);
        assert!(m[13].abs() < EPS);
        assert!((m[14] + 1.0).abs() < EPS);
        assert_eq!(&m[..12], &rotation[..12]);
    }

    #[test]
    fn translate_round_trip_restores_column() {
        let mut m = look_at(Vec3::new(3.0, 1.5, -2.0), Vec3::ZERO, Vec3::Y).unwrap();
        let original = m;

        translate(&mut m, 1.0, 0.0, 0.0);
        translate(&mut m, -1.0, 0.0, 0.0);

        assert!(approx_eq(&m, &original, EPS));
    }

    #[test]
    fn translate_matches_right_multiplication() {
        let base = look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y).unwrap();
        let mut m = base;
        translate(&mut m, 0.5, -1.5, 2.0);

        let expected = glam::Mat4::from_cols_array(&base)
            * glam::Mat4::from_translation(Vec3::new(0.5, -1.5, 2.0));
        assert!(approx_eq(&m, &expected.to_cols_array(), EPS));
    }

    #[test]
    fn perspective_square_aspect_has_equal_scales() {
        let p = perspective(90.0, 1.0, 0.1, 100.0).unwrap();
        assert_eq!(p[0], p[5]);
        assert_eq!(p[11], -1.0);
        assert_eq!(p[15], 0.0);
        // tan(45 degrees) = 1
        assert!((p[5] - 1.0).abs() < EPS);
    }

    #[test]
    fn perspective_layout() {
        let (fov, aspect, near, far) = (45.0f32, 16.0 / 9.0, 0.1, 100.0);
        let p = perspective(fov, aspect, near, far).unwrap();
        let f = 1.0 / (fov / 2.0).to_radians().tan();

        assert!((p[0] - f / aspect).abs() < EPS);
        assert!((p[5] - f).abs() < EPS);
        assert!((p[10] + (far + near) / (far - near)).abs() < EPS);
        assert!((p[14] + 2.0 * far * near / (far - near)).abs() < EPS);
        for i in [1, 2, 3, 4, 6, 7, 8, 9, 12, 13, 15] {
            assert_eq!(p[i], 0.0, "entry {i}");
        }
    }

    #[test]
    fn perspective_agrees_with_glam() {
        let p = perspective(60.0, 1.5, 0.5, 50.0).unwrap();
        let expected = glam::Mat4::perspective_rh_gl(60f32.to_radians(), 1.5, 0.5, 50.0);
        assert!(approx_eq(&p, &expected.to_cols_array(), EPS));
    }

    #[test]
    fn perspective_maps_near_and_far_to_clip_cube() {
        let p = perspective(45.0, 1.0, 0.1, 100.0).unwrap();

        let near = transform(&p, Vec4::new(0.0, 0.0, -0.1, 1.0));
        assert!((near.z / near.w + 1.0).abs() < 1e-4);

        let far = transform(&p, Vec4::new(0.0, 0.0, -100.0, 1.0));
        assert!((far.z / far.w - 1.0).abs() < 1e-4);
    }

    #[test]
    fn perspective_zero_depth_sits_at_doubled_near() {
        let (near, far) = (0.1f32, 100.0f32);
        let p = perspective(45.0, 1.0, near, far).unwrap();
        let d = 2.0 * near * far / (far + near);

        let clip = transform(&p, Vec4::new(0.0, 0.0, -d, 1.0));
        assert!((clip.z / clip.w).abs() < 1e-4);
    }

    #[test]
    fn perspective_rejects_bad_parameters() {
        assert!(matches!(
            perspective(45.0, 0.0, 0.1, 100.0),
            Err(Error::InvalidParameter { name: "aspect", .. })
        ));
        assert!(matches!(
            perspective(45.0, -1.0, 0.1, 100.0),
            Err(Error::InvalidParameter { name: "aspect", .. })
        ));
        assert!(matches!(
            perspective(45.0, 1.0, 5.0, 5.0),
            Err(Error::InvalidParameter { name: "near/far", .. })
        ));
        assert!(matches!(
            perspective(45.0, 1.0, 0.1, f32::INFINITY),
            Err(Error::InvalidParameter { name: "near/far", .. })
        ));
        for fov in [0.0, 180.0, -10.0, f32::NAN] {
            assert!(matches!(
                perspective(fov, 1.0, 0.1, 100.0),
                Err(Error::InvalidParameter { name: "fov_y_degrees", .. })
            ));
        }
    }

    #[test]
    fn look_at_rejects_non_finite_vectors() {
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(matches!(
                look_at(Vec3::new(bad, 1.5, 3.0), Vec3::ZERO, Vec3::Y),
                Err(Error::InvalidParameter { name: "eye", .. })
            ));
            assert!(matches!(
                look_at(Vec3::new(0.0, 1.5, 3.0), Vec3::new(0.0, bad, 0.0), Vec3::Y),
                Err(Error::InvalidParameter { name: "center", .. })
            ));
            assert!(matches!(
                look_at(Vec3::new(0.0, 1.5, 3.0), Vec3::ZERO, Vec3::new(0.0, 0.0, bad)),
                Err(Error::InvalidParameter { name: "up", .. })
            ));
        }
    }

    #[test]
    fn look_at_rejects_overflowing_distance() {
        let eye = Vec3::new(f32::MAX, 0.0, 0.0);
        let center = Vec3::new(-f32::MAX, 0.0, 0.0);
        assert!(matches!(
            look_at(eye, center, Vec3::Y),
            Err(Error::InvalidParameter { name: "eye/center", .. })
        ));
    }

    #[test]
    fn look_at_moves_eye_to_origin() {
        let view = look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y).unwrap();
        let eye = transform(&view, Vec4::new(0.0, 0.0, 5.0, 1.0));
        assert!(approx_vec(eye, Vec4::new(0.0, 0.0, 0.0, 1.0)));

        // The target ends up straight ahead on -Z.
        let target = transform(&view, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert!(approx_vec(target, Vec4::new(0.0, 0.0, -5.0, 1.0)));
    }

    #[test]
    fn look_at_agrees_with_glam() {
        let eye = Vec3::new(2.1, 1.5, 2.1);
        let view = look_at(eye, Vec3::ZERO, Vec3::Y).unwrap();
        let expected = glam::Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        assert!(approx_eq(&view, &expected.to_cols_array(), EPS));
    }

    #[test]
    fn look_at_translation_is_rotated_negative_eye() {
        let eye = Vec3::new(-1.0, 4.0, 2.0);
        let view = look_at(eye, Vec3::new(0.5, 0.0, 0.0), Vec3::Y).unwrap();

        let mut rotation = view;
        rotation[12] = 0.0;
        rotation[13] = 0.0;
        rotation[14] = 0.0;
        let expected = transform(&rotation, (-eye).extend(0.0));

        assert!((view[12] - expected.x).abs() < EPS);
        assert!((view[13] - expected.y).abs() < EPS);
        assert!((view[14] - expected.z).abs() < EPS);
        assert_eq!(view[15], 1.0);
    }

    #[test]
    fn look_at_rejects_degenerate_basis() {
        assert!(matches!(
            look_at(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, Vec3::Y),
            Err(Error::DegenerateBasis(_))
        ));
        assert!(matches!(
            look_at(Vec3::ONE, Vec3::ONE, Vec3::Y),
            Err(Error::DegenerateBasis(_))
        ));
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        let p = perspective(45.0, 1.0, 0.1, 100.0).unwrap();
        assert!(approx_eq(&multiply(&p, &IDENTITY), &p, 1e-6));
        assert!(approx_eq(&multiply(&IDENTITY, &p), &p, 1e-6));
    }

    #[test]
    fn multiply_agrees_with_glam() {
        let a = look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y).unwrap();
        let b = perspective(70.0, 1.3, 0.2, 30.0).unwrap();
        let expected = glam::Mat4::from_cols_array(&a) * glam::Mat4::from_cols_array(&b);
        assert!(approx_eq(&multiply(&a, &b), &expected.to_cols_array(), 1e-4));
    }

    #[test]
    fn normal_matrix_of_identity_is_identity() {
        assert!(approx_eq(&normal_matrix(&IDENTITY), &IDENTITY, 1e-6));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = glam::Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)).to_cols_array();
        let n = normal_matrix(&model);
        assert!((n[0] - 0.5).abs() < 1e-6);
        assert!((n[5] - 1.0).abs() < 1e-6);
    }
}
