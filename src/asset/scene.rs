//! Scene assets
//!
//! A scene is a list of entity descriptors: name, transform, and optional
//! mesh / material / camera component data referencing other assets by
//! identity. Loading pulls in every referenced mesh and material; the
//! runtime instance holds the live entity list the game or editor mutates,
//! and serialization snapshots that list back out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::container::{AnyAsset, Asset, AssetPayload};
use super::context::LoadContext;
use super::kind::AssetKind;
use super::material::MaterialDef;
use super::mesh::MeshDef;
use super::refs::AssetRef;
use super::uniform::UniformValue;
use crate::error::AssetError;
use crate::id::AssetId;

/// Position / rotation / scale of one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDef {
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for TransformDef {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
        }
    }
}

/// Mesh renderer component: a material plus per-instance overrides.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshRendererDef {
    #[serde(rename = "materialId")]
    pub material: AssetRef,
    /// Per-instance uniform overrides on top of the material defaults.
    #[serde(default)]
    pub uniforms: BTreeMap<String, UniformValue>,
    /// Per-instance texture overrides.
    #[serde(default)]
    pub textures: BTreeMap<String, AssetRef>,
}

/// Camera component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDef {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// One entity in a scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    pub name: String,
    #[serde(default)]
    pub transform: TransformDef,
    /// Mesh asset rendered by this entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_filter: Option<AssetRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_renderer: Option<MeshRendererDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraDef>,
}

/// Scene asset configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDef {
    #[serde(default)]
    pub entities: Vec<EntityDef>,
}

/// A loaded scene: the live entity list, with every referenced asset
/// loaded.
#[derive(Debug)]
pub struct SceneInstance {
    pub entities: Vec<EntityDef>,
}

impl AssetPayload for SceneDef {
    const KIND: AssetKind = AssetKind::Scene;
    type Runtime = SceneInstance;

    fn create(
        &self,
        id: AssetId,
        name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError> {
        for entity in &self.entities {
            if let Some(mesh) = entity.mesh_filter {
                ctx.load_dependency::<MeshDef>(mesh).map_err(|e| {
                    annotate(id, name, &entity.name, e)
                })?;
            }
            if let Some(renderer) = &entity.mesh_renderer {
                ctx.load_dependency::<MaterialDef>(renderer.material)
                    .map_err(|e| annotate(id, name, &entity.name, e))?;
                for texture_ref in renderer.textures.values() {
                    ctx.load_texture_dependency(*texture_ref)
                        .map_err(|e| annotate(id, name, &entity.name, e))?;
                }
            }
        }
        Ok(SceneInstance {
            entities: self.entities.clone(),
        })
    }

    fn snapshot(&self, instance: Option<&SceneInstance>) -> Self {
        match instance {
            Some(inst) => SceneDef {
                entities: inst.entities.clone(),
            },
            None => self.clone(),
        }
    }

    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>> {
        match any {
            AnyAsset::Scene(a) => Some(a),
            _ => None,
        }
    }

    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>> {
        match any {
            AnyAsset::Scene(a) => Some(a),
            _ => None,
        }
    }

    fn into_any(asset: Asset<Self>) -> AnyAsset {
        AnyAsset::Scene(asset)
    }
}

fn annotate(id: AssetId, name: &str, entity: &str, e: AssetError) -> AssetError {
    log::error!(
        "scene {} ('{}'): entity '{}' dependency failed: {}",
        id,
        name,
        entity,
        e
    );
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::shader::ShaderDef;
    use crate::backend::headless::Headless;
    use crate::bank::AssetBank;
    use crate::factory;
    use std::path::Path;

    fn populated_bank(dir: &Path) -> (AssetBank, AssetId, AssetId) {
        let shader_src = dir.join("lit.glsl");
        std::fs::write(&shader_src, "void main() {}").unwrap();
        let model = dir.join("crate.obj");
        std::fs::write(&model, b"o crate").unwrap();

        let mut bank = AssetBank::new();
        let shader = factory::create_asset(
            &mut bank,
            "lit",
            ShaderDef {
                filepath: shader_src,
                uniform_blocks: BTreeMap::new(),
            },
        )
        .unwrap();
        let material = factory::create_asset(
            &mut bank,
            "crate_mat",
            MaterialDef {
                shader: AssetRef::new(shader),
                ..Default::default()
            },
        )
        .unwrap();
        let mesh = factory::create_asset(
            &mut bank,
            "crate",
            MeshDef {
                filepath: model,
                mesh_index: 0,
            },
        )
        .unwrap();
        (bank, mesh, material)
    }

    #[test]
    fn test_scene_load_pulls_in_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        let (mut bank, mesh, material) = populated_bank(dir.path());

        let scene_id = factory::create_asset(
            &mut bank,
            "main",
            SceneDef {
                entities: vec![
                    EntityDef {
                        name: "crate".to_string(),
                        mesh_filter: Some(AssetRef::new(mesh)),
                        mesh_renderer: Some(MeshRendererDef {
                            material: AssetRef::new(material),
                            ..Default::default()
                        }),
                        ..Default::default()
                    },
                    EntityDef {
                        name: "camera".to_string(),
                        camera: Some(CameraDef::default()),
                        ..Default::default()
                    },
                ],
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        bank.load::<SceneDef>(scene_id, &mut backend).unwrap();
        assert_eq!(backend.meshes_created, 1);
        assert_eq!(backend.materials_created, 1);
        assert_eq!(backend.shaders_compiled, 1);
    }

    #[test]
    fn test_scene_with_dangling_mesh_fails_and_stays_unloaded() {
        let mut bank = AssetBank::new();
        let scene_id = factory::create_asset(
            &mut bank,
            "broken",
            SceneDef {
                entities: vec![EntityDef {
                    name: "ghost".to_string(),
                    mesh_filter: Some(AssetRef::new(AssetId::new(77))),
                    ..Default::default()
                }],
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        let err = bank.load::<SceneDef>(scene_id, &mut backend).unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
        assert!(!bank.get::<SceneDef>(scene_id).unwrap().is_loaded());
    }

    #[test]
    fn test_snapshot_reads_back_live_entity_edits() {
        let dir = tempfile::tempdir().unwrap();
        let (mut bank, mesh, _material) = populated_bank(dir.path());
        let scene_id = factory::create_asset(
            &mut bank,
            "main",
            SceneDef {
                entities: vec![EntityDef {
                    name: "crate".to_string(),
                    mesh_filter: Some(AssetRef::new(mesh)),
                    ..Default::default()
                }],
            },
        )
        .unwrap();

        let mut backend = Headless::new();
        bank.load::<SceneDef>(scene_id, &mut backend).unwrap();
        {
            let mut scene = bank.get_mut::<SceneDef>(scene_id).unwrap();
            let inst = scene.instance_mut().unwrap();
            inst.entities[0].transform.position = [0.0, 5.0, 0.0];
        }

        let scene = bank.get::<SceneDef>(scene_id).unwrap();
        let snap = scene.snapshot_payload();
        assert_eq!(snap.entities[0].transform.position, [0.0, 5.0, 0.0]);
        // configuration untouched
        assert_eq!(scene.payload().entities[0].transform.position, [0.0; 3]);
    }
}
