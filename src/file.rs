//! Asset file format
//!
//! One JSON object per asset: the kind tag, the identity, the name, and
//! the type-specific fields flattened alongside them.
//!
//! ```json
//! {
//!   "type": "material",
//!   "id": 7,
//!   "name": "rock",
//!   "shader": 3,
//!   "uniforms": { "intensity": { "type": "float", "value": 2.0 } },
//!   "textures": { "uAlbedo": 5 }
//! }
//! ```
//!
//! Serialization always goes through the payload's snapshot, so a loaded
//! asset writes its live field values, not the configuration it was
//! originally built from. Parsing populates configuration only - the
//! runtime instance stays lazy.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::asset::material::MaterialDef;
use crate::asset::mesh::MeshDef;
use crate::asset::scene::SceneDef;
use crate::asset::shader::ShaderDef;
use crate::asset::texture::{CubemapDef, Texture2dDef};
use crate::asset::{AnyAsset, Asset, AssetKind, AssetPayload};
use crate::error::AssetError;

/// The common envelope around every asset file.
#[derive(Serialize, Deserialize)]
struct AssetFile<P> {
    #[serde(rename = "type")]
    kind: AssetKind,
    id: crate::id::AssetId,
    name: String,
    #[serde(flatten)]
    payload: P,
}

fn encode<P>(asset: &Asset<P>) -> Result<String, AssetError>
where
    P: AssetPayload + Serialize,
{
    let file = AssetFile {
        kind: P::KIND,
        id: asset.id(),
        name: asset.name().to_string(),
        payload: asset.snapshot_payload(),
    };
    serde_json::to_string_pretty(&file)
        .map_err(|e| AssetError::MalformedSource(format!("serializing asset {}: {}", asset.id(), e)))
}

fn decode<P>(text: &str) -> Result<Asset<P>, AssetError>
where
    P: AssetPayload + DeserializeOwned,
{
    let file: AssetFile<P> =
        serde_json::from_str(text).map_err(|e| AssetError::MalformedSource(e.to_string()))?;
    if file.kind != P::KIND {
        return Err(AssetError::MalformedSource(format!(
            "type tag '{}' does not match the expected kind '{}'",
            file.kind,
            P::KIND
        )));
    }
    Ok(Asset::new(file.id, file.name, file.payload))
}

/// Serialize a bank entry to its on-disk JSON (effective field values).
pub fn to_json(any: &AnyAsset) -> Result<String, AssetError> {
    match any {
        AnyAsset::Shader(a) => encode(a),
        AnyAsset::Texture2d(a) => encode(a),
        AnyAsset::Cubemap(a) => encode(a),
        AnyAsset::Material(a) => encode(a),
        AnyAsset::Mesh(a) => encode(a),
        AnyAsset::Scene(a) => encode(a),
    }
}

/// Parse an asset file as the given kind (derived from the file extension
/// by the project). The embedded type tag must agree with the kind.
pub fn from_json(kind: AssetKind, text: &str) -> Result<AnyAsset, AssetError> {
    match kind {
        AssetKind::Shader => decode::<ShaderDef>(text).map(ShaderDef::into_any),
        AssetKind::Texture2d => decode::<Texture2dDef>(text).map(Texture2dDef::into_any),
        AssetKind::Cubemap => decode::<CubemapDef>(text).map(CubemapDef::into_any),
        AssetKind::Material => decode::<MaterialDef>(text).map(MaterialDef::into_any),
        AssetKind::Mesh => decode::<MeshDef>(text).map(MeshDef::into_any),
        AssetKind::Scene => decode::<SceneDef>(text).map(SceneDef::into_any),
    }
}
