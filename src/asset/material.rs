//! Material assets
//!
//! A material references a shader plus uniform defaults and named texture
//! bindings. Loading resolves the shader (recursively loading it), loads
//! every bound texture, and asks the backend for the material-bound
//! runtime object. Uniform values and texture bindings live on the runtime
//! instance once loaded - that is what an editor mutates - so
//! serialization snapshots the live values, never the stale configuration.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use super::container::{AnyAsset, Asset, AssetPayload};
use super::context::LoadContext;
use super::kind::AssetKind;
use super::refs::AssetRef;
use super::shader::ShaderDef;
use super::uniform::UniformValue;
use crate::backend::MaterialHandle;
use crate::error::AssetError;
use crate::id::AssetId;

/// Material asset configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialDef {
    /// The shader this material binds.
    pub shader: AssetRef,
    /// Uniform name -> default value.
    #[serde(default)]
    pub uniforms: BTreeMap<String, UniformValue>,
    /// Sampler name -> texture asset (2D or cubemap).
    #[serde(default)]
    pub textures: BTreeMap<String, AssetRef>,
}

/// A constructed material: the backend object plus its live bindings.
#[derive(Debug)]
pub struct MaterialInstance {
    pub handle: MaterialHandle,
    /// Effective uniform values (editable while loaded).
    pub uniforms: BTreeMap<String, UniformValue>,
    /// Effective texture bindings (editable while loaded).
    pub textures: BTreeMap<String, AssetRef>,
}

impl AssetPayload for MaterialDef {
    const KIND: AssetKind = AssetKind::Material;
    type Runtime = MaterialInstance;

    fn create(
        &self,
        id: AssetId,
        name: &str,
        ctx: &mut LoadContext<'_>,
    ) -> Result<Self::Runtime, AssetError> {
        ctx.load_dependency::<ShaderDef>(self.shader)?;

        let (shader_handle, reflected) = {
            let shader = self.shader.resolve::<ShaderDef>(ctx.bank())?;
            let program = shader.instance().ok_or_else(|| {
                AssetError::InvalidReference(format!(
                    "material {} ('{}'): shader {} is not loaded",
                    id, name, self.shader
                ))
            })?;
            (program.handle, program.uniforms.clone())
        };

        // Backends without reflection return an empty list; skip validation
        if !reflected.is_empty() {
            for (uniform_name, value) in &self.uniforms {
                match reflected.iter().find(|u| &u.name == uniform_name) {
                    Some(info) if info.ty != value.ty() => warn!(
                        "material {} ('{}'): uniform '{}' is {} in the shader, {} here",
                        id,
                        name,
                        uniform_name,
                        info.ty,
                        value.ty()
                    ),
                    Some(_) => {}
                    None => warn!(
                        "material {} ('{}'): uniform '{}' is not declared by its shader",
                        id, name, uniform_name
                    ),
                }
            }
        }

        let mut texture_handles = Vec::with_capacity(self.textures.len());
        for (slot, texture_ref) in &self.textures {
            let handle = ctx.load_texture_dependency(*texture_ref)?;
            texture_handles.push((slot.clone(), handle));
        }

        let handle = ctx
            .backend
            .create_material(shader_handle, &self.uniforms, &texture_handles)
            .map_err(|e| {
                AssetError::MalformedSource(format!("material {} ('{}'): {}", id, name, e))
            })?;

        Ok(MaterialInstance {
            handle,
            uniforms: self.uniforms.clone(),
            textures: self.textures.clone(),
        })
    }

    fn snapshot(&self, instance: Option<&MaterialInstance>) -> Self {
        match instance {
            Some(inst) => MaterialDef {
                shader: self.shader,
                uniforms: inst.uniforms.clone(),
                textures: inst.textures.clone(),
            },
            None => self.clone(),
        }
    }

    fn from_any(any: &AnyAsset) -> Option<&Asset<Self>> {
        match any {
            AnyAsset::Material(a) => Some(a),
            _ => None,
        }
    }

    fn from_any_mut(any: &mut AnyAsset) -> Option<&mut Asset<Self>> {
        match any {
            AnyAsset::Material(a) => Some(a),
            _ => None,
        }
    }

    fn into_any(asset: Asset<Self>) -> AnyAsset {
        AnyAsset::Material(asset)
    }
}
