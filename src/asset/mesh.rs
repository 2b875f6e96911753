//! Mesh assets
//!
//! A mesh asset points at a 3D-model container file and selects one
//! sub-mesh out of it by index. The backend parses the container and
//! uploads the selected sub-mesh; the asset keeps the buffer handle plus a
//! few counts for diagnostics.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::container::{AnyAsset, Asset, AssetPayload};
use super::context::LoadContext;
use super::kind::AssetKind;
use crate::backend::MeshHandle;
use crate::error::AssetError;
use crate::id::AssetId;

/// Mesh asset configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeshDef {
    /// Path to the model container file.
    pub filepath: PathBuf,
    /// Which sub-mesh to take from a multi-mesh container.
    #[serde(rename = "meshIndex", default)]
    pub mesh_index: usize,
}

/// An uploaded mesh.
#[derive(Debug)]
pub struct GpuMesh {
    pub handle: MeshHandle,
    pub vertex_count: usize,
    pub index_count: usize,
}

impl AssetPayload for MeshDef {
    const KIND: AssetKind = AssetKind::Mesh;
    type Runtime = GpuMesh;

    fn create(
        &self,
        id: AssetId,
        _name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError> {
        if !self.filepath.exists() {
            return Err(AssetError::NotFound(format!(
                "model file '{}' does not exist",
                self.filepath.display()
            )));
        }
        let submeshes = ctx.backend.load_model(&self.filepath).map_err(|e| {
            AssetError::MalformedSource(format!("parsing '{}': {}", self.filepath.display(), e))
        })?;
        let submesh = submeshes.get(self.mesh_index).ok_or_else(|| {
            AssetError::MalformedSource(format!(
                "mesh {}: '{}' has {} sub-meshes, index {} is out of range",
                id,
                self.filepath.display(),
                submeshes.len(),
                self.mesh_index
            ))
        })?;
        let handle = ctx.backend.create_mesh(submesh).map_err(|e| {
            AssetError::MalformedSource(format!("uploading '{}': {}", self.filepath.display(), e))
        })?;
        Ok(GpuMesh {
            handle,
            vertex_count: submesh.positions.len(),
            index_count: submesh.indices.len(),
        })
    }

    fn snapshot(&self, _instance: Option<&GpuMesh>) -> Self {
        self.clone()
    }

    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>> {
        match any {
            AnyAsset::Mesh(a) => Some(a),
            _ => None,
        }
    }

    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>> {
        match any {
            AnyAsset::Mesh(a) => Some(a),
            _ => None,
        }
    }

    fn into_any(asset: Asset<Self>) -> AnyAsset {
        AnyAsset::Mesh(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::Headless;
    use crate::bank::AssetBank;
    use crate::factory;

    #[test]
    fn test_load_selects_submesh() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("rock.obj");
        std::fs::write(&model, b"o rock").unwrap();

        let mut bank = AssetBank::new();
        let id = factory::create_asset(
            &mut bank,
            "rock",
            MeshDef {
                filepath: model,
                mesh_index: 0,
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        bank.load::<MeshDef>(id, &mut backend).unwrap();
        assert_eq!(backend.models_parsed, 1);
        assert_eq!(backend.meshes_created, 1);

        let mesh = bank.get::<MeshDef>(id).unwrap();
        assert_eq!(mesh.instance().unwrap().vertex_count, 3);
    }

    #[test]
    fn test_out_of_range_index_is_malformed_source() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("rock.obj");
        std::fs::write(&model, b"o rock").unwrap();

        let mut bank = AssetBank::new();
        let id = factory::create_asset(
            &mut bank,
            "rock",
            MeshDef {
                filepath: model,
                // Headless fabricates exactly one sub-mesh
                mesh_index: 4,
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        let err = bank.load::<MeshDef>(id, &mut backend).unwrap_err();
        assert!(matches!(err, AssetError::MalformedSource(_)));
        assert!(!bank.get::<MeshDef>(id).unwrap().is_loaded());
        assert_eq!(backend.meshes_created, 0);
    }
}
