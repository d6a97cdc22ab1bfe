use nalgebra::{UnitQuaternion, Vector3};

/// Extracts intrinsic-XYZ (Tait-Bryan) Euler angles from a unit quaternion:
/// x = atan2(-m23, m33), y = asin(m13), z = atan2(-m12, m11).
///
/// This is the readout convention of classic scene-graph engines, and it is
/// *not* the same as nalgebra's `euler_angles` (which is ZYX). The y angle is
/// confined to [-pi/2, pi/2]; a pure y-rotation past that range folds y back
/// and reflects through x = z = +-pi instead.
///
/// The matrix entries are computed inline from the quaternion components
/// rather than through `to_rotation_matrix`. For a quaternion whose x and z
/// components are exact zeros (anything built purely from y-axis rotations),
/// m23 is then a signed zero whose sign records which half-turn the rotation
/// is in, and atan2 turns that into exactly 0.0, -0.0, pi, or -pi. The
/// calendar readout branches on those exact values, so this arithmetic must
/// not be "simplified".
pub fn to_euler_xyz(q: &UnitQuaternion<f64>) -> Vector3<f64> {
    let (i, j, k, w) = (q.i, q.j, q.k, q.w);

    let m11 = 1.0 - 2.0 * (j * j + k * k);
    let m12 = 2.0 * (i * j - w * k);
    let m13 = 2.0 * (i * k + w * j);
    let m23 = 2.0 * (j * k - w * i);
    let m33 = 1.0 - 2.0 * (i * i + j * j);

    let x = (-m23).atan2(m33);
    let y = m13.clamp(-1.0, 1.0).asin();
    let z = (-m12).atan2(m11);

    Vector3::new(x, y, z)
}
