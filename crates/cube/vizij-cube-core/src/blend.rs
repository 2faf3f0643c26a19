//! Blending utilities for channel values.
//! - f32 convex combination for floats and vector components
//! - quaternion NLERP with shortest-arc sign correction
//! - transform TRS blending (translation/scale lerp, rotation nlerp)
//! - elementwise blending for generic Vector of equal length
//! - step blending for Bool/Text and mismatched kinds (left for t < 0.5)
//!
//! Endpoints are exact: `t <= 0` yields `a` and `t >= 1` yields `b` unchanged.

use crate::value::Value;

/// Convex combination of two scalars.
///
/// Written as `a*(1-t) + b*t` so that both endpoints reproduce their input
/// bit-for-bit, unlike `a + (b - a) * t`.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Lerp for fixed-size arrays
#[inline]
fn lerp_array<const N: usize>(a: &[f32; N], b: &[f32; N], t: f32) -> [f32; N] {
    let mut out = [0.0f32; N];
    for i in 0..N {
        out[i] = lerp_f32(a[i], b[i], t);
    }
    out
}

#[inline]
fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2] + a[3] * b[3]
}

#[inline]
fn normalize4(mut q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 > 0.0 {
        let inv_len = len2.sqrt().recip();
        q[0] *= inv_len;
        q[1] *= inv_len;
        q[2] *= inv_len;
        q[3] *= inv_len;
    } else {
        q = [0.0, 0.0, 0.0, 1.0];
    }
    q
}

/// Quaternion NLERP with shortest-arc correction.
/// If dot < 0, negate the second quaternion to ensure the shortest path.
/// Returns a normalized quaternion (x,y,z,w).
#[inline]
pub fn nlerp_quat(a: [f32; 4], mut b: [f32; 4], t: f32) -> [f32; 4] {
    if dot4(a, b) < 0.0 {
        b = [-b[0], -b[1], -b[2], -b[3]];
    }
    normalize4(lerp_array(&a, &b, t))
}

/// Step blending: choose `a` for t < 0.5, else `b`.
#[inline]
pub fn step_blend(a: &Value, b: &Value, t: f32) -> Value {
    if t < 0.5 {
        a.clone()
    } else {
        b.clone()
    }
}

/// Blend two values with factor `t` in [0,1] (clamped; NaN counts as 0).
///
/// Matching numeric kinds blend continuously. Bool/Text, mismatched kinds and
/// Vectors of different length fall back to [`step_blend`].
pub fn blend_values(a: &Value, b: &Value, t: f32) -> Value {
    if t.is_nan() || t <= 0.0 {
        return a.clone();
    }
    if t >= 1.0 {
        return b.clone();
    }
    match (a, b) {
        (Value::Float(af), Value::Float(bf)) => Value::Float(lerp_f32(*af, *bf, t)),
        (Value::Vec2(aa), Value::Vec2(bb)) => Value::Vec2(lerp_array(aa, bb, t)),
        (Value::Vec3(aa), Value::Vec3(bb)) => Value::Vec3(lerp_array(aa, bb, t)),
        (Value::Vec4(aa), Value::Vec4(bb)) => Value::Vec4(lerp_array(aa, bb, t)),
        (Value::ColorRgba(ac), Value::ColorRgba(bc)) => Value::ColorRgba(lerp_array(ac, bc, t)),
        (Value::Quat(aq), Value::Quat(bq)) => Value::Quat(nlerp_quat(*aq, *bq, t)),
        (
            Value::Transform {
                translation: ap,
                rotation: ar,
                scale: ascale,
            },
            Value::Transform {
                translation: bp,
                rotation: br,
                scale: bscale,
            },
        ) => Value::Transform {
            translation: lerp_array(ap, bp, t),
            rotation: nlerp_quat(*ar, *br, t),
            scale: lerp_array(ascale, bscale, t),
        },
        (Value::Vector(va), Value::Vector(vb)) if va.len() == vb.len() => Value::Vector(
            va.iter()
                .zip(vb.iter())
                .map(|(x, y)| lerp_f32(*x, *y, t))
                .collect(),
        ),
        _ => step_blend(a, b, t),
    }
}
