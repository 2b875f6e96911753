//! Asset kind tags and the file extension table
//!
//! The kind is the closed set of asset types the bank can hold. It doubles
//! as the on-disk dispatch key: the `"type"` tag inside every asset file
//! and the file extension both map to exactly one kind.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of asset types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Shader,
    Texture2d,
    Cubemap,
    Material,
    Mesh,
    Scene,
}

impl AssetKind {
    /// Every kind, in serialization-tag order.
    pub const ALL: [AssetKind; 6] = [
        AssetKind::Shader,
        AssetKind::Texture2d,
        AssetKind::Cubemap,
        AssetKind::Material,
        AssetKind::Mesh,
        AssetKind::Scene,
    ];

    /// Canonical file extension (without the leading dot).
    pub fn extension(self) -> &'static str {
        match self {
            AssetKind::Shader => "shader",
            AssetKind::Texture2d => "tex2d",
            AssetKind::Cubemap => "cubemap",
            AssetKind::Material => "material",
            AssetKind::Mesh => "mesh",
            AssetKind::Scene => "scene",
        }
    }

    /// Look up the kind for a file extension (without the leading dot).
    ///
    /// Returns `None` for unrecognized extensions; the project skips those
    /// files rather than failing the whole load.
    pub fn from_extension(ext: &str) -> Option<AssetKind> {
        AssetKind::ALL.iter().copied().find(|k| k.extension() == ext)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AssetKind::Shader => "shader",
            AssetKind::Texture2d => "texture2d",
            AssetKind::Cubemap => "cubemap",
            AssetKind::Material => "material",
            AssetKind::Mesh => "mesh",
            AssetKind::Scene => "scene",
        };
        write!(f, "{}", tag)
    }
}
