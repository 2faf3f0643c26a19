//! Value: one animation channel sample carried inside a [`Pose`](crate::Pose).
//! All numeric types use f32.

use serde::{Deserialize, Serialize};

/// Coarse kind of a [`Value`], used for quick dispatch when blending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    Float,
    Bool,
    Vec2,
    Vec3,
    Vec4,
    Quat,
    ColorRgba,
    Transform,
    Vector,
    Text,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float
    Float(f32),

    /// Boolean (step)
    Bool(bool),

    /// 2D vector
    Vec2([f32; 2]),

    /// 3D vector
    Vec3([f32; 3]),

    /// 4D vector
    Vec4([f32; 4]),

    /// Quaternion (x, y, z, w)
    Quat([f32; 4]),

    /// RGBA color (linear by convention)
    ColorRgba([f32; 4]),

    /// Transform split to TRS for blending
    Transform {
        translation: [f32; 3],
        rotation: [f32; 4], // quat (x,y,z,w)
        scale: [f32; 3],
    },

    /// Generic, variable-length numeric vector
    Vector(Vec<f32>),

    /// Text / string; step-only for interpolation
    Text(String),
}

impl Value {
    /// Return the coarse kind of this value.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Vec4(_) => ValueKind::Vec4,
            Value::Quat(_) => ValueKind::Quat,
            Value::ColorRgba(_) => ValueKind::ColorRgba,
            Value::Transform { .. } => ValueKind::Transform,
            Value::Vector(_) => ValueKind::Vector,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// True for kinds that never blend continuously.
    #[inline]
    pub fn is_step(&self) -> bool {
        matches!(self.kind(), ValueKind::Bool | ValueKind::Text)
    }

    pub fn quat(x: f32, y: f32, z: f32, w: f32) -> Self {
        Value::Quat([x, y, z, w])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bool_and_text_are_step_kinds() {
        assert!(Value::Bool(true).is_step());
        assert!(Value::Text("x".into()).is_step());
        for v in [
            Value::Float(1.0),
            Value::Vec2([0.0; 2]),
            Value::Quat([0.0, 0.0, 0.0, 1.0]),
            Value::Vector(vec![1.0]),
        ] {
            assert!(!v.is_step(), "{:?}", v.kind());
        }
        assert_eq!(
            Value::Transform {
                translation: [0.0; 3],
                rotation: [0.0, 0.0, 0.0, 1.0],
                scale: [1.0; 3],
            }
            .kind(),
            ValueKind::Transform
        );
    }

    #[test]
    fn json_uses_type_and_data_tags() {
        let json = serde_json::to_value(Value::quat(0.0, 0.0, 0.0, 1.0)).expect("serialize");
        assert_eq!(json["type"], "Quat");
        assert_eq!(json["data"][3], 1.0_f64);
        let back: Value = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back.kind(), ValueKind::Quat);
    }
}
