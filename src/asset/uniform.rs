//! Uniform values
//!
//! Typed scalar/vector/matrix values used for material uniform defaults and
//! per-instance overrides. Serialized with an explicit type tag so a file
//! can't silently flip a `vec3` into a `vec4`:
//!
//! ```json
//! { "type": "float", "value": 2.0 }
//! { "type": "vec3", "value": [1.0, 0.5, 0.0] }
//! ```

use serde::{Deserialize, Serialize};

/// A typed uniform value.
///
/// Matrices are column arrays (`[[f32; N]; N]` is N columns of N rows).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Mat2([[f32; 2]; 2]),
    Mat3([[f32; 3]; 3]),
    Mat4([[f32; 4]; 4]),
}

impl UniformValue {
    /// The type tag of this value.
    pub fn ty(&self) -> UniformType {
        match self {
            UniformValue::Bool(_) => UniformType::Bool,
            UniformValue::Int(_) => UniformType::Int,
            UniformValue::Float(_) => UniformType::Float,
            UniformValue::Vec2(_) => UniformType::Vec2,
            UniformValue::Vec3(_) => UniformType::Vec3,
            UniformValue::Vec4(_) => UniformType::Vec4,
            UniformValue::Mat2(_) => UniformType::Mat2,
            UniformValue::Mat3(_) => UniformType::Mat3,
            UniformValue::Mat4(_) => UniformType::Mat4,
        }
    }
}

/// The bare type of a uniform, as reflected by the shader backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniformType {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl std::fmt::Display for UniformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            UniformType::Bool => "bool",
            UniformType::Int => "int",
            UniformType::Float => "float",
            UniformType::Vec2 => "vec2",
            UniformType::Vec3 => "vec3",
            UniformType::Vec4 => "vec4",
            UniformType::Mat2 => "mat2",
            UniformType::Mat3 => "mat3",
            UniformType::Mat4 => "mat4",
        };
        write!(f, "{}", tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let v = UniformValue::Float(2.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"type":"float","value":2.0}"#);

        let back: UniformValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_vector_and_matrix_round_trip() {
        for v in [
            UniformValue::Bool(true),
            UniformValue::Int(-3),
            UniformValue::Vec3([1.0, 0.5, 0.0]),
            UniformValue::Mat2([[1.0, 0.0], [0.0, 1.0]]),
            UniformValue::Mat4([[0.0; 4]; 4]),
        ] {
            let json = serde_json::to_string(&v).unwrap();
            let back: UniformValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, v);
        }
    }

    #[test]
    fn test_wrong_payload_shape_rejected() {
        // vec2 tag with three components must not parse
        let result: Result<UniformValue, _> =
            serde_json::from_str(r#"{"type":"vec2","value":[1.0,2.0,3.0]}"#);
        assert!(result.is_err());
    }
}
